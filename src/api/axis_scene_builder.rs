use crate::core::primitives::format_plain_number;
use crate::core::{LinearScale, TimeScale, format_time_tick};
use crate::error::ChartResult;
use crate::render::{NodeId, NodeKind, Surface, TextAnchor};

use super::RenderStyle;
use super::axis_ticks::{ticks_within_span, time_tick_count, value_tick_count};

pub(super) const VALUE_AXIS_CLASS: &str = "yAxis";
pub(super) const TIME_AXIS_CLASS: &str = "xAxis";
pub(super) const AXIS_LABEL_CLASS: &str = "axis-label";
const TICK_CLASS: &str = "tick";
const DOMAIN_CLASS: &str = "domain";
const TICK_LABEL_PADDING_PX: f64 = 3.0;
/// Distance of the y-axis label from the top edge of the surface.
const VALUE_AXIS_LABEL_INSET_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy)]
pub(super) struct AxisSceneContext {
    pub content_width: f64,
    pub content_height: f64,
    pub margin: f64,
    pub style: RenderStyle,
}

/// Left axis: one tick group per nice value plus the domain line.
pub(super) fn append_value_axis(
    surface: &mut Surface,
    parent: NodeId,
    scale: LinearScale,
    ctx: AxisSceneContext,
) -> ChartResult<NodeId> {
    let style = ctx.style;
    let tick = style.tick_size_px;
    let axis = surface.create_node(
        Some(VALUE_AXIS_CLASS),
        NodeKind::Group {
            translate_x: 0.0,
            translate_y: 0.0,
        },
    );
    let axis_id = surface.append(Some(parent), axis)?;

    let (range_start, range_end) = scale.range();
    let domain = surface.create_node(
        Some(DOMAIN_CLASS),
        NodeKind::Path {
            data: format!("M{},{}H0V{}H{}", -tick, range_start, range_end, -tick),
            stroke: style.axis_color,
            stroke_width: style.axis_line_width,
            fill: None,
        },
    );
    surface.append(Some(axis_id), domain)?;

    let positioned = scale
        .ticks(value_tick_count(ctx.content_height))
        .into_iter()
        .map(|value| (value, scale.apply(value)))
        .collect();
    for (value, y) in ticks_within_span(positioned, ctx.content_height) {
        let group = surface.create_node(
            Some(TICK_CLASS),
            NodeKind::Group {
                translate_x: 0.0,
                translate_y: y,
            },
        );
        let group_id = surface.append(Some(axis_id), group)?;
        let mark = surface.create_node(
            None,
            NodeKind::Line {
                x1: 0.0,
                y1: 0.0,
                x2: -tick,
                y2: 0.0,
                stroke: style.axis_color,
                stroke_width: style.axis_line_width,
            },
        );
        surface.append(Some(group_id), mark)?;
        let text = surface.create_node(
            None,
            NodeKind::Text {
                text: format_plain_number(value),
                x: -(tick + TICK_LABEL_PADDING_PX),
                y: style.tick_label_font_size_px * 0.32,
                font_size_px: style.tick_label_font_size_px,
                color: style.axis_color,
                anchor: TextAnchor::End,
                rotate_deg: 0.0,
            },
        );
        surface.append(Some(group_id), text)?;
    }

    Ok(axis_id)
}

/// Bottom axis, translated to the bottom edge of the content box.
pub(super) fn append_time_axis(
    surface: &mut Surface,
    parent: NodeId,
    scale: TimeScale,
    ctx: AxisSceneContext,
) -> ChartResult<NodeId> {
    let style = ctx.style;
    let tick = style.tick_size_px;
    let axis = surface.create_node(
        Some(TIME_AXIS_CLASS),
        NodeKind::Group {
            translate_x: 0.0,
            translate_y: ctx.content_height,
        },
    );
    let axis_id = surface.append(Some(parent), axis)?;

    let (range_start, range_end) = scale.range();
    let domain = surface.create_node(
        Some(DOMAIN_CLASS),
        NodeKind::Path {
            data: format!("M{},{}V0H{}V{}", range_start, tick, range_end, tick),
            stroke: style.axis_color,
            stroke_width: style.axis_line_width,
            fill: None,
        },
    );
    surface.append(Some(axis_id), domain)?;

    let positioned = scale
        .ticks(time_tick_count(ctx.content_width))
        .into_iter()
        .map(|time| (time, scale.apply(time)))
        .collect();
    for (time, x) in ticks_within_span(positioned, ctx.content_width) {
        let group = surface.create_node(
            Some(TICK_CLASS),
            NodeKind::Group {
                translate_x: x,
                translate_y: 0.0,
            },
        );
        let group_id = surface.append(Some(axis_id), group)?;
        let mark = surface.create_node(
            None,
            NodeKind::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 0.0,
                y2: tick,
                stroke: style.axis_color,
                stroke_width: style.axis_line_width,
            },
        );
        surface.append(Some(group_id), mark)?;
        let text = surface.create_node(
            None,
            NodeKind::Text {
                text: format_time_tick(time),
                x: 0.0,
                y: tick + TICK_LABEL_PADDING_PX + style.tick_label_font_size_px * 0.71,
                font_size_px: style.tick_label_font_size_px,
                color: style.axis_color,
                anchor: TextAnchor::Middle,
                rotate_deg: 0.0,
            },
        );
        surface.append(Some(group_id), text)?;
    }

    Ok(axis_id)
}

/// Rotated y-axis label, centred against the content height inside the left margin.
pub(super) fn append_value_axis_label(
    surface: &mut Surface,
    value_axis: NodeId,
    label: &str,
    ctx: AxisSceneContext,
) -> ChartResult<NodeId> {
    let node = surface.create_node(
        Some(AXIS_LABEL_CLASS),
        NodeKind::Text {
            text: label.to_owned(),
            x: -ctx.content_height / 2.0,
            y: -ctx.margin + VALUE_AXIS_LABEL_INSET_PX,
            font_size_px: ctx.style.axis_label_font_size_px,
            color: ctx.style.axis_label_color,
            anchor: TextAnchor::Middle,
            rotate_deg: 270.0,
        },
    );
    surface.append(Some(value_axis), node)
}

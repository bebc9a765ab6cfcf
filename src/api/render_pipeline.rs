use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Dimensions, PlotPoint, ScalePair, polyline_path_data, project_line_points};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, NodeId, NodeKind, Surface};

use super::RenderStyle;
use super::axis_scene_builder::{
    AxisSceneContext, append_time_axis, append_value_axis, append_value_axis_label,
};

pub const SURFACE_CLASS: &str = "line-chart-svg";
pub const CONTENT_GROUP_CLASS: &str = "container";
pub const LINE_CLASS: &str = "line";
pub const MARKER_CLASS: &str = "tool-tip-dot";
pub const OVERLAY_CLASS: &str = "mouse-tracker";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PipelineState {
    #[default]
    Idle,
    Drawing,
}

/// Everything one pass draws from.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub points: &'a [PlotPoint],
    pub y_axis_label: &'a str,
    pub dimensions: Dimensions,
    pub style: RenderStyle,
}

/// Handles the pointer path needs from the pass that built the current surface.
///
/// Only valid until the next pass: node ids from a cleared surface are never
/// reused, so stale handles simply stop resolving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionLayer {
    pub dimensions: Dimensions,
    pub scales: ScalePair,
    pub content_group: NodeId,
    pub line: Option<NodeId>,
    pub marker: NodeId,
    pub value_axis: NodeId,
    pub time_axis: NodeId,
    pub overlay: NodeId,
}

/// Full-rebuild renderer: each pass discards the surface contents and draws
/// them again from the inputs.
#[derive(Debug, Default)]
pub struct RenderPipeline {
    state: PipelineState,
    completed_passes: u64,
}

impl RenderPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    #[must_use]
    pub fn completed_passes(&self) -> u64 {
        self.completed_passes
    }

    /// Runs one pass over `surface`.
    ///
    /// A pass that fails leaves the pipeline idle; the surface may be partially
    /// drawn and is fully rebuilt by the next successful pass.
    pub fn run(
        &mut self,
        surface: &mut Surface,
        input: RenderInput<'_>,
    ) -> ChartResult<InteractionLayer> {
        if self.state == PipelineState::Drawing {
            return Err(ChartError::RenderInProgress);
        }
        self.state = PipelineState::Drawing;
        let result = draw(surface, input);
        self.state = PipelineState::Idle;

        let layer = result?;
        self.completed_passes += 1;
        debug!(
            pass = self.completed_passes,
            points = input.points.len(),
            width = input.dimensions.width,
            height = input.dimensions.height,
            nodes = surface.node_count(),
            "render pass complete"
        );
        Ok(layer)
    }
}

fn draw(surface: &mut Surface, input: RenderInput<'_>) -> ChartResult<InteractionLayer> {
    let dimensions = input.dimensions;
    let style = input.style;

    surface.set_class(SURFACE_CLASS);
    surface.set_size(dimensions.width, dimensions.height);
    surface.clear();

    let group = surface.create_node(
        Some(CONTENT_GROUP_CLASS),
        NodeKind::Group {
            translate_x: dimensions.margin,
            translate_y: dimensions.margin,
        },
    );
    let content_group = surface.append(None, group)?;

    let scales = ScalePair::build(input.points, dimensions)?;

    // Marker goes in before the line; hovering raises it above.
    let marker = surface
        .create_node(
            Some(MARKER_CLASS),
            NodeKind::Circle {
                cx: 0.0,
                cy: 0.0,
                radius: style.marker_radius,
                fill: style.marker_fill,
                stroke: style.marker_stroke,
                stroke_width: style.marker_stroke_width,
            },
        )
        .with_opacity(0.0)
        .without_pointer_events();
    let marker = surface.append(Some(content_group), marker)?;

    // A zero-sized content box is an empty plot: no path, axes collapse.
    let line = if input.points.is_empty() || dimensions.is_content_empty() {
        None
    } else {
        let pixels = project_line_points(input.points, scales);
        let node = surface.create_node(
            Some(LINE_CLASS),
            NodeKind::Path {
                data: polyline_path_data(&pixels),
                stroke: style.line_color,
                stroke_width: style.line_width,
                fill: None,
            },
        );
        Some(surface.append(Some(content_group), node)?)
    };

    let axis_ctx = AxisSceneContext {
        content_width: dimensions.content_width,
        content_height: dimensions.content_height,
        margin: dimensions.margin,
        style,
    };
    let value_axis = append_value_axis(surface, content_group, scales.y, axis_ctx)?;
    let time_axis = append_time_axis(surface, content_group, scales.x, axis_ctx)?;
    append_value_axis_label(surface, value_axis, input.y_axis_label, axis_ctx)?;

    let overlay = surface
        .create_node(
            Some(OVERLAY_CLASS),
            NodeKind::Rect {
                x: 0.0,
                y: 0.0,
                width: dimensions.content_width,
                height: dimensions.content_height,
                fill: Some(Color::BLACK),
            },
        )
        .with_opacity(0.0);
    let overlay = surface.append(Some(content_group), overlay)?;

    Ok(InteractionLayer {
        dimensions,
        scales,
        content_group,
        line,
        marker,
        value_axis,
        time_axis,
        overlay,
    })
}

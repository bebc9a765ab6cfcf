use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use trendline::api::{
    ChartHost, ChartHostConfig, ChartProps, ContainerLayout, MARKER_CLASS, PipelineState,
    SeriesVariant,
};
use trendline::core::{ContainerSize, DataPoint};
use trendline::render::NullRenderer;
use trendline::{ChartError, ChartResult};

fn sample_data() -> Vec<DataPoint> {
    vec![
        DataPoint::new("2024-01-01", 10.0),
        DataPoint::new("2024-01-05", 20.0),
        DataPoint::new("2024-01-10", 5.0),
    ]
}

fn mounted_host(data: Vec<DataPoint>) -> ChartResult<ChartHost<NullRenderer>> {
    let mut host = ChartHost::new(NullRenderer::default(), ChartHostConfig::default())?
        .with_props(ChartProps::new(data).with_y_axis_label("Visitors"));
    host.container_ref()
        .set_layout(ContainerLayout::uniform(800.0, 400.0));
    host.mount()?;
    Ok(host)
}

#[test]
fn mount_measures_container_and_draws() {
    let host = mounted_host(sample_data()).expect("mounted host");

    assert!(host.is_mounted());
    assert!(host.container_ref().is_attached());
    assert_eq!(host.size(), ContainerSize::new(800.0, 500.0));

    let dims = host.dimensions().expect("dimensions after first pass");
    assert_eq!((dims.content_width, dims.content_height), (700.0, 400.0));
    assert_eq!(host.renderer().render_count, 1);
    assert_eq!(host.renderer().last_size, (800.0, 500.0));
    assert_eq!(host.completed_passes(), 1);
    assert_eq!(host.pipeline_state(), PipelineState::Idle);
}

#[test]
fn zero_width_skips_render_pass() {
    let mut host =
        ChartHost::new(NullRenderer::default(), ChartHostConfig::default()).expect("host init");
    host.mount().expect("mount without layout");

    assert_eq!(host.size(), ContainerSize::new(0.0, 500.0));
    assert!(host.surface().children.is_empty());
    assert_eq!(host.dimensions(), None);
    assert_eq!(host.completed_passes(), 0);
    assert_eq!(host.renderer().last_size, (0.0, 500.0));
}

#[test]
fn redraw_requires_mount() {
    let mut host =
        ChartHost::new(NullRenderer::default(), ChartHostConfig::default()).expect("host init");
    let err = host.redraw().expect_err("not mounted");
    assert!(matches!(err, ChartError::NotMounted));

    host.set_data(sample_data()).expect("props stored while unmounted");
    assert_eq!(host.renderer().render_count, 0);
}

#[test]
fn debounced_resize_triggers_single_redraw() {
    let start = Instant::now();
    let mut host = mounted_host(sample_data()).expect("mounted host");
    let container = host.container_ref();

    container.set_layout(ContainerLayout::uniform(900.0, 450.0));
    host.notify_resize(start);
    container.set_layout(ContainerLayout::uniform(950.0, 450.0));
    host.notify_resize(start + Duration::from_millis(60));
    container.set_layout(ContainerLayout::uniform(1000.0, 450.0));
    host.notify_resize(start + Duration::from_millis(120));

    assert!(!host.poll(start + Duration::from_millis(200)).expect("early poll"));
    assert_eq!(host.completed_passes(), 1);

    assert!(host.poll(start + Duration::from_millis(270)).expect("due poll"));
    assert_eq!(host.completed_passes(), 2);
    assert_eq!(host.size(), ContainerSize::new(1000.0, 500.0));
    assert!(!host.poll(start + Duration::from_secs(1)).expect("idle poll"));
    assert_eq!(host.next_deadline(), None);
}

#[test]
fn explicit_size_props_override_measurement() {
    let mut host = mounted_host(sample_data()).expect("mounted host");
    host.set_size(Some(320.0), None).expect("explicit width");

    assert_eq!(host.size(), ContainerSize::new(320.0, 500.0));
    assert_eq!(host.renderer().last_size, (320.0, 500.0));
}

#[test]
fn unmount_cancels_pending_resize_and_clears_surface() {
    let start = Instant::now();
    let mut host = mounted_host(sample_data()).expect("mounted host");
    let container = host.container_ref();

    host.notify_resize(start);
    host.unmount();

    assert!(!host.is_mounted());
    assert!(!container.is_attached());
    assert_eq!(container.measure(), None);
    assert_eq!(host.next_deadline(), None);
    assert!(host.surface().children.is_empty());
    assert!(!host.poll(start + Duration::from_secs(1)).expect("poll after unmount"));
    assert!(!host.notify_resize(start + Duration::from_secs(2)));
}

#[test]
fn invalid_date_fails_render_attempt() {
    let mut host = mounted_host(sample_data()).expect("mounted host");
    let before = host.surface().shape();

    let props = ChartProps::new(sample_data()).with_variant(SeriesVariant::Impressions);
    let err = host.set_props(props).expect_err("dates are not compact");
    assert!(matches!(err, ChartError::InvalidDate { .. }));
    assert_eq!(host.surface().shape(), before);
}

#[test]
fn preset_label_applies_without_caller_label() {
    let data = vec![
        DataPoint::new("20240101", 1.0),
        DataPoint::new("20240102", 3.0),
    ];
    let props = ChartProps::for_data_type(data, "test").expect("known data type");
    let mut host = mounted_host(Vec::new()).expect("mounted host");
    host.set_props(props).expect("render");

    let labels = host.surface().select_by_class("axis-label");
    assert_eq!(labels.len(), 1);
    assert!(matches!(
        &labels[0].kind,
        trendline::render::NodeKind::Text { text, .. } if text == "Test Label"
    ));
}

#[test]
fn pointer_move_highlights_nearest_point() {
    let mut host = mounted_host(sample_data()).expect("mounted host");
    let scales = host.scales().expect("scales");
    let pointer_x = scales.x.apply(scales.x.invert(300.0));

    let target = host
        .pointer_move(pointer_x, 120.0)
        .expect("pointer move")
        .expect("hover target");

    assert_eq!(target.index, 1);
    assert_eq!(target.value, 20.0);
    assert_abs_diff_eq!(target.x, 700.0 * 4.0 / 9.0, epsilon = 1e-9);
    assert_abs_diff_eq!(target.y, 0.0);

    let tooltip = host.tooltip();
    assert!(tooltip.visible);
    assert_eq!(tooltip.display(), "block");
    assert_eq!(tooltip.value_text, "20");
    assert_eq!(tooltip.date_text, "January 5, 2024");
    assert_abs_diff_eq!(tooltip.left, 50.0 + target.x, epsilon = 1e-9);
    assert_abs_diff_eq!(tooltip.top, 0.0);

    let content = &host.surface().children[0];
    let last = content.children.last().expect("content children");
    assert!(last.has_class(MARKER_CLASS));
    assert_eq!(last.opacity, 1.0);
    assert_eq!(host.renderer().render_count, 2);
}

#[test]
fn pointer_leave_hides_marker_and_tooltip() {
    let mut host = mounted_host(sample_data()).expect("mounted host");
    host.pointer_move(10.0, 10.0).expect("pointer move");
    host.pointer_leave().expect("pointer leave");

    assert!(!host.tooltip().visible);
    assert_eq!(host.tooltip().display(), "none");
    let marker = host.surface().select_by_class(MARKER_CLASS)[0];
    assert_eq!(marker.opacity, 0.0);
}

#[test]
fn pointer_outside_overlay_acts_as_leave() {
    let mut host = mounted_host(sample_data()).expect("mounted host");
    host.pointer_move(10.0, 10.0).expect("pointer move");

    let target = host.pointer_move(-5.0, 10.0).expect("pointer move outside");
    assert_eq!(target, None);
    assert!(!host.tooltip().visible);
}

#[test]
fn empty_series_pointer_move_performs_no_lookup() {
    let mut host = mounted_host(Vec::new()).expect("mounted host");
    let renders = host.renderer().render_count;

    let target = host.pointer_move(100.0, 100.0).expect("pointer move");
    assert_eq!(target, None);
    assert!(!host.tooltip().visible);
    assert_eq!(host.renderer().render_count, renders);
    assert_eq!(host.surface().select_by_class(MARKER_CLASS)[0].opacity, 0.0);
}

#[test]
fn redraw_resets_hover_state() {
    let mut host = mounted_host(sample_data()).expect("mounted host");
    host.pointer_move(10.0, 10.0).expect("pointer move");
    host.set_y_axis_label(Some("Sessions".to_owned()))
        .expect("redraw");

    assert!(!host.tooltip().visible);
    assert_eq!(host.surface().select_by_class(MARKER_CLASS)[0].opacity, 0.0);
    assert_eq!(host.surface().select_by_class(MARKER_CLASS).len(), 1);
}

#[test]
fn nan_value_fails_render_and_keeps_surface() {
    let mut host = mounted_host(sample_data()).expect("mounted host");
    let before = host.surface().shape();
    let passes = host.completed_passes();

    let data = vec![
        DataPoint::new("2024-01-01", 10.0),
        DataPoint::new("2024-01-05", f64::NAN),
        DataPoint::new("2024-01-10", 5.0),
    ];
    let err = host.set_data(data).expect_err("nan value");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(host.surface().shape(), before);
    assert_eq!(host.completed_passes(), passes);

    host.pointer_move(10.0, 10.0).expect("hover still works");
    host.pointer_leave().expect("leave still works");
}

#[test]
fn infinite_value_is_rejected_on_mount() {
    let data = vec![
        DataPoint::new("2024-01-01", f64::INFINITY),
        DataPoint::new("2024-01-05", 20.0),
    ];
    let err = mounted_host(data).err().expect("infinite value");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn remount_starts_from_initial_size() {
    let mut host =
        ChartHost::new(NullRenderer::default(), ChartHostConfig::default()).expect("host init")
            .with_props(ChartProps::new(sample_data()));
    let container = host.container_ref();

    container.set_layout(ContainerLayout::uniform(1200.0, 800.0));
    host.mount().expect("first mount");
    assert_eq!(host.size(), ContainerSize::new(1200.0, 800.0));
    host.unmount();

    container.set_layout(ContainerLayout::uniform(400.0, 300.0));
    host.mount().expect("remount");
    assert_eq!(host.size(), ContainerSize::new(400.0, 500.0));
    assert_eq!(host.renderer().last_size, (400.0, 500.0));
}

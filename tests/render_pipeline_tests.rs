use trendline::api::{
    CONTENT_GROUP_CLASS, LINE_CLASS, MARKER_CLASS, OVERLAY_CLASS, PipelineState, RenderInput,
    RenderPipeline, RenderStyle, SURFACE_CLASS,
};
use trendline::core::primitives::{date_to_unix_seconds, parse_calendar_date};
use trendline::core::{Dimensions, PlotPoint};
use trendline::render::{NodeKind, Surface};

fn day(date: &str) -> f64 {
    date_to_unix_seconds(parse_calendar_date(date, "%Y-%m-%d").expect("valid date"))
}

fn sample_series() -> Vec<PlotPoint> {
    vec![
        PlotPoint::new(day("2024-01-01"), 10.0),
        PlotPoint::new(day("2024-01-05"), 20.0),
        PlotPoint::new(day("2024-01-10"), 5.0),
    ]
}

fn input<'a>(points: &'a [PlotPoint], dims: Dimensions) -> RenderInput<'a> {
    RenderInput {
        points,
        y_axis_label: "Impressions",
        dimensions: dims,
        style: RenderStyle::default(),
    }
}

fn content_children(surface: &Surface) -> Vec<(&'static str, Option<String>)> {
    surface.children[0]
        .children
        .iter()
        .map(|node| (node.kind.name(), node.class.clone()))
        .collect()
}

#[test]
fn pass_builds_expected_scene() {
    let points = sample_series();
    let dims = Dimensions::compute(800.0, 500.0, 50.0);
    let mut surface = Surface::new();
    let mut pipeline = RenderPipeline::new();

    let layer = pipeline.run(&mut surface, input(&points, dims)).expect("render pass");

    assert_eq!(surface.class.as_deref(), Some(SURFACE_CLASS));
    assert_eq!((surface.width, surface.height), (800.0, 500.0));
    assert_eq!(surface.children.len(), 1);

    let content = &surface.children[0];
    assert_eq!(content.id, layer.content_group);
    assert_eq!(content.class.as_deref(), Some(CONTENT_GROUP_CLASS));
    assert_eq!(
        content.kind,
        NodeKind::Group {
            translate_x: 50.0,
            translate_y: 50.0
        }
    );
    assert_eq!(
        content_children(&surface),
        vec![
            ("circle", Some(MARKER_CLASS.to_owned())),
            ("path", Some(LINE_CLASS.to_owned())),
            ("g", Some("yAxis".to_owned())),
            ("g", Some("xAxis".to_owned())),
            ("rect", Some(OVERLAY_CLASS.to_owned())),
        ]
    );

    let marker = surface.find(layer.marker).expect("marker");
    assert_eq!(marker.opacity, 0.0);
    assert!(!marker.pointer_events);

    let overlay = surface.find(layer.overlay).expect("overlay");
    assert_eq!(overlay.opacity, 0.0);
    match &overlay.kind {
        NodeKind::Rect { width, height, .. } => assert_eq!((*width, *height), (700.0, 400.0)),
        other => panic!("unexpected overlay kind: {other:?}"),
    }

    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert_eq!(pipeline.completed_passes(), 1);
}

#[test]
fn line_path_visits_points_in_series_order() {
    let points = vec![
        PlotPoint::new(day("2024-01-01"), 10.0),
        PlotPoint::new(day("2024-01-03"), 20.0),
        PlotPoint::new(day("2024-01-05"), 5.0),
    ];
    let dims = Dimensions::compute(950.0, 500.0, 25.0);
    let mut surface = Surface::new();
    let layer = RenderPipeline::new()
        .run(&mut surface, input(&points, dims))
        .expect("render pass");

    let line = surface.find(layer.line.expect("line id")).expect("line node");
    match &line.kind {
        NodeKind::Path { data, fill, .. } => {
            assert_eq!(data, "M0,225L450,0L900,337.5");
            assert_eq!(*fill, None);
        }
        other => panic!("unexpected line kind: {other:?}"),
    }
}

#[test]
fn redraw_with_same_inputs_is_idempotent() {
    let points = sample_series();
    let dims = Dimensions::compute(800.0, 500.0, 50.0);
    let mut surface = Surface::new();
    let mut pipeline = RenderPipeline::new();

    pipeline.run(&mut surface, input(&points, dims)).expect("first pass");
    let first_shape = surface.shape();
    let first_count = surface.node_count();
    pipeline.run(&mut surface, input(&points, dims)).expect("second pass");

    assert_eq!(surface.shape(), first_shape);
    assert_eq!(surface.node_count(), first_count);
    assert_eq!(surface.select_by_class(LINE_CLASS).len(), 1);
    assert_eq!(surface.select_by_class(MARKER_CLASS).len(), 1);
    assert_eq!(surface.select_by_class(OVERLAY_CLASS).len(), 1);
    assert_eq!(surface.select_by_class("yAxis").len(), 1);
    assert_eq!(surface.select_by_class("xAxis").len(), 1);
}

#[test]
fn redraw_issues_fresh_node_ids() {
    let points = sample_series();
    let dims = Dimensions::compute(800.0, 500.0, 50.0);
    let mut surface = Surface::new();
    let mut pipeline = RenderPipeline::new();

    let first = pipeline.run(&mut surface, input(&points, dims)).expect("first pass");
    let second = pipeline.run(&mut surface, input(&points, dims)).expect("second pass");

    assert_ne!(first.marker, second.marker);
    assert!(surface.find(first.marker).is_none());
    assert!(surface.find(second.marker).is_some());
}

#[test]
fn empty_series_draws_no_path() {
    let dims = Dimensions::compute(800.0, 500.0, 50.0);
    let mut surface = Surface::new();
    let layer = RenderPipeline::new()
        .run(&mut surface, input(&[], dims))
        .expect("render pass");

    assert_eq!(layer.line, None);
    assert!(surface.select_by_class(LINE_CLASS).is_empty());
    assert_eq!(surface.select_by_class(MARKER_CLASS).len(), 1);
    assert_eq!(surface.select_by_class(OVERLAY_CLASS).len(), 1);
    surface.validate().expect("finite geometry");
}

#[test]
fn undersized_container_renders_empty_plot() {
    let points = sample_series();
    let dims = Dimensions::compute(60.0, 60.0, 50.0);
    let mut surface = Surface::new();
    RenderPipeline::new()
        .run(&mut surface, input(&points, dims))
        .expect("render pass");

    surface.validate().expect("finite geometry");
    assert!(surface.select_by_class(LINE_CLASS).is_empty());
    assert_eq!(surface.select_by_class(MARKER_CLASS).len(), 1);
    assert_eq!(surface.select_by_class(OVERLAY_CLASS).len(), 1);
}

#[test]
fn axes_carry_ticks_and_rotated_label() {
    let points = sample_series();
    let dims = Dimensions::compute(800.0, 500.0, 50.0);
    let mut surface = Surface::new();
    let layer = RenderPipeline::new()
        .run(&mut surface, input(&points, dims))
        .expect("render pass");

    let time_axis = surface.find(layer.time_axis).expect("time axis");
    assert_eq!(
        time_axis.kind,
        NodeKind::Group {
            translate_x: 0.0,
            translate_y: 400.0
        }
    );
    assert!(time_axis.children.iter().any(|node| node.has_class("domain")));
    assert!(time_axis.children.iter().filter(|node| node.has_class("tick")).count() >= 2);

    let value_axis = surface.find(layer.value_axis).expect("value axis");
    let tick_labels: Vec<String> = value_axis
        .children
        .iter()
        .filter(|node| node.has_class("tick"))
        .filter_map(|tick| {
            tick.children.iter().find_map(|node| match &node.kind {
                NodeKind::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
        })
        .collect();
    assert_eq!(tick_labels.first().map(String::as_str), Some("0"));
    assert_eq!(tick_labels.last().map(String::as_str), Some("20"));

    let label = value_axis
        .children
        .iter()
        .find(|node| node.has_class("axis-label"))
        .expect("axis label");
    match &label.kind {
        NodeKind::Text {
            text,
            x,
            y,
            rotate_deg,
            ..
        } => {
            assert_eq!(text, "Impressions");
            assert_eq!(*x, -200.0);
            assert_eq!(*y, -40.0);
            assert_eq!(*rotate_deg, 270.0);
        }
        other => panic!("unexpected label kind: {other:?}"),
    }
}

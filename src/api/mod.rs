mod axis_scene_builder;
mod axis_ticks;
mod chart_host;
mod config;
mod container_ref;
mod data_source;
mod pointer_controller;
mod render_pipeline;
mod resize_observer;
mod series_variant;

pub use chart_host::{ChartHost, ChartProps};
pub use config::{ChartHostConfig, RenderStyle};
pub use container_ref::{ContainerLayout, ContainerRef};
pub use data_source::{series_from_json_str, series_to_json_pretty};
pub use render_pipeline::{
    CONTENT_GROUP_CLASS, InteractionLayer, LINE_CLASS, MARKER_CLASS, OVERLAY_CLASS, PipelineState,
    RenderInput, RenderPipeline, SURFACE_CLASS,
};
pub use resize_observer::ResizeObserver;
pub use series_variant::{SeriesAccessors, SeriesVariant};

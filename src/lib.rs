//! trendline: responsive time-series line charts.
//!
//! A [`ChartHost`] measures its container through a debounced
//! [`ResizeObserver`](api::ResizeObserver), rebuilds a retained scene
//! ([`render::Surface`]) on every change to data or size, and answers pointer
//! moves with the nearest data point. Drawing is delegated to a
//! [`render::Renderer`] backend; [`render::SvgRenderer`] and
//! [`render::NullRenderer`] ship with the crate.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartHost, ChartHostConfig, ChartProps, SeriesVariant};
pub use error::{ChartError, ChartResult};

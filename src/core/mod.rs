pub mod dimensions;
pub mod line_series;
pub mod locator;
pub mod primitives;
pub mod scale;
pub mod scale_builder;
pub mod time_scale;
pub mod types;

pub use dimensions::Dimensions;
pub use line_series::{polyline_path_data, project_line_points};
pub use locator::{bisect_left, nearest_index, nearest_point};
pub use scale::LinearScale;
pub use scale_builder::{ScalePair, build_x_scale, build_y_scale};
pub use time_scale::{TimeInterval, TimeScale, format_time_tick};
pub use types::{ContainerSize, DataPoint, PlotPoint};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::primitives::SECONDS_PER_DAY;
use crate::core::{Dimensions, LinearScale, PlotPoint, TimeScale};
use crate::error::ChartResult;

/// Tick count used when rounding the value domain outward.
pub const DEFAULT_NICE_TICK_COUNT: usize = 10;

/// Time domain substituted for an empty series: the first day of the unix epoch.
pub const FALLBACK_TIME_DOMAIN: (f64, f64) = (0.0, SECONDS_PER_DAY);

/// Value domain substituted when the series has no positive finite maximum.
pub const FALLBACK_VALUE_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Scales for one render pass. Always rebuilt from the current series and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePair {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl ScalePair {
    pub fn build(points: &[PlotPoint], dimensions: Dimensions) -> ChartResult<Self> {
        Ok(Self {
            x: build_x_scale(points, (0.0, dimensions.content_width))?,
            y: build_y_scale(points, (dimensions.content_height, 0.0))?,
        })
    }

    /// Pixel position of a point inside the content box.
    #[must_use]
    pub fn project(self, point: PlotPoint) -> (f64, f64) {
        (self.x.apply(point.x), self.y.apply(point.y))
    }
}

/// Time scale over the extent of `points`, mapped onto `range`.
///
/// Range ends are clamped to be non-negative, and an empty series gets
/// [`FALLBACK_TIME_DOMAIN`].
pub fn build_x_scale(points: &[PlotPoint], range: (f64, f64)) -> ChartResult<TimeScale> {
    let (start, end) = time_extent(points).unwrap_or(FALLBACK_TIME_DOMAIN);
    TimeScale::new(start, end, clamp_range(range))
}

/// Linear scale over `[0, max(y)]` mapped onto `range`, rounded outward to nice ticks.
pub fn build_y_scale(points: &[PlotPoint], range: (f64, f64)) -> ChartResult<LinearScale> {
    let domain = match value_max(points) {
        Some(max) if max != 0.0 => (0.0, max),
        _ => FALLBACK_VALUE_DOMAIN,
    };
    Ok(LinearScale::new(domain, clamp_range(range))?.nice(DEFAULT_NICE_TICK_COUNT))
}

/// Minimum and maximum finite `x`, or `None` for an empty series.
#[must_use]
pub fn time_extent(points: &[PlotPoint]) -> Option<(f64, f64)> {
    let finite = points.iter().map(|point| point.x).filter(|x| x.is_finite());
    let min = finite.clone().min_by_key(|x| OrderedFloat(*x))?;
    let max = finite.max_by_key(|x| OrderedFloat(*x))?;
    Some((min, max))
}

/// Largest finite `y`, or `None` for an empty series.
#[must_use]
pub fn value_max(points: &[PlotPoint]) -> Option<f64> {
    points
        .iter()
        .map(|point| point.y)
        .filter(|y| y.is_finite())
        .max_by_key(|y| OrderedFloat(*y))
}

fn clamp_range(range: (f64, f64)) -> (f64, f64) {
    let clamp = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
    (clamp(range.0), clamp(range.1))
}

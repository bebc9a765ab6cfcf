use serde::{Deserialize, Serialize};

/// One record of a caller-supplied series.
///
/// `date` stays a string until a [`SeriesVariant`](crate::api::SeriesVariant)
/// parses it with its own date format. The numeric field is accepted under both
/// spellings that upstream payloads use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: String,
    #[serde(alias = "Impressions")]
    pub impressions: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(date: impl Into<String>, impressions: f64) -> Self {
        Self {
            date: date.into(),
            impressions,
        }
    }
}

/// A record after accessor resolution: `x` is unix seconds, `y` the plotted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered width/height of a container, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Per-axis maximum of two sizes.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

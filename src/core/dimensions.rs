use serde::{Deserialize, Serialize};

use crate::core::ContainerSize;

/// Outer size of a chart plus the content box left after a uniform margin.
///
/// Values are recomputed for every render pass and passed down explicitly;
/// nothing holds on to a `Dimensions` between passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub content_width: f64,
    pub content_height: f64,
}

impl Dimensions {
    /// Computes the content box for a container.
    ///
    /// Negative or non-finite inputs are treated as zero, and a container smaller
    /// than twice the margin yields a zero-sized content box instead of a negative one.
    #[must_use]
    pub fn compute(container_width: f64, container_height: f64, margin: f64) -> Self {
        let width = sanitize(container_width);
        let height = sanitize(container_height);
        let margin = sanitize(margin);

        Self {
            width,
            height,
            margin,
            content_width: (width - 2.0 * margin).max(0.0),
            content_height: (height - 2.0 * margin).max(0.0),
        }
    }

    #[must_use]
    pub fn from_container(size: ContainerSize, margin: f64) -> Self {
        Self::compute(size.width, size.height, margin)
    }

    /// `true` when there is no area left to plot in.
    #[must_use]
    pub fn is_content_empty(self) -> bool {
        self.content_width <= 0.0 || self.content_height <= 0.0
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

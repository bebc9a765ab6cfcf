use std::fmt::Write;

use crate::core::{PlotPoint, ScalePair};

/// Series length from which the `parallel-projection` feature fans out.
#[cfg(feature = "parallel-projection")]
pub const PARALLEL_PROJECTION_THRESHOLD: usize = 4_096;

/// Projects series points into content-box pixels, preserving series order.
///
/// The output feeds one open polyline; consumers must not reorder it.
#[must_use]
pub fn project_line_points(points: &[PlotPoint], scales: ScalePair) -> Vec<(f64, f64)> {
    #[cfg(feature = "parallel-projection")]
    {
        if points.len() >= PARALLEL_PROJECTION_THRESHOLD {
            use rayon::prelude::*;
            return points
                .par_iter()
                .map(|point| scales.project(*point))
                .collect();
        }
    }

    points.iter().map(|point| scales.project(*point)).collect()
}

/// SVG path data (`M x,y L x,y ...`) for an open polyline.
///
/// Returns an empty string for an empty input so callers can skip the path.
#[must_use]
pub fn polyline_path_data(pixels: &[(f64, f64)]) -> String {
    let mut data = String::with_capacity(pixels.len() * 16);
    for (index, (x, y)) in pixels.iter().enumerate() {
        if index > 0 {
            data.push('L');
        } else {
            data.push('M');
        }
        let _ = write!(data, "{x},{y}");
    }
    data
}

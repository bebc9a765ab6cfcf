use crate::core::PlotPoint;

/// Index of the first element whose `x` is not less than `target`.
///
/// `points` must be sorted ascending by `x`; the result is in `0..=points.len()`.
#[must_use]
pub fn bisect_left(points: &[PlotPoint], target: f64) -> usize {
    points.partition_point(|point| point.x < target)
}

/// Index of the point whose `x` is closest to `target`.
///
/// Binary-searches for the insertion index `i` of `target`, then compares the
/// neighbours at `i - 1` and `i`. Equal distances resolve to the earlier point.
/// Targets before the first or after the last point clamp to the ends.
/// Returns `None` for an empty series or a non-finite target.
#[must_use]
pub fn nearest_index(points: &[PlotPoint], target: f64) -> Option<usize> {
    if points.is_empty() || !target.is_finite() {
        return None;
    }

    let last = points.len() - 1;
    let index = bisect_left(&points[..last], target);
    if index == 0 {
        return Some(0);
    }

    let before = target - points[index - 1].x;
    let after = points[index].x - target;
    Some(if before <= after { index - 1 } else { index })
}

/// Closest point to `target`, see [`nearest_index`].
#[must_use]
pub fn nearest_point(points: &[PlotPoint], target: f64) -> Option<(usize, PlotPoint)> {
    nearest_index(points, target).map(|index| (index, points[index]))
}

pub(super) const AXIS_TIME_TARGET_SPACING_PX: f64 = 72.0;
pub(super) const AXIS_VALUE_TARGET_SPACING_PX: f64 = 40.0;
pub(super) const AXIS_MIN_TICKS: usize = 2;
pub(super) const AXIS_MAX_TICKS: usize = 10;

/// Tick count that keeps roughly `target_spacing_px` between ticks.
pub(super) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

pub(super) fn time_tick_count(content_width: f64) -> usize {
    axis_tick_target_count(
        content_width,
        AXIS_TIME_TARGET_SPACING_PX,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    )
}

pub(super) fn value_tick_count(content_height: f64) -> usize {
    axis_tick_target_count(
        content_height,
        AXIS_VALUE_TARGET_SPACING_PX,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    )
}

/// Keeps ticks whose pixel position lies inside `[0, span]`, tolerating rounding.
pub(super) fn ticks_within_span(ticks: Vec<(f64, f64)>, span_px: f64) -> Vec<(f64, f64)> {
    const EPSILON: f64 = 1e-6;
    ticks
        .into_iter()
        .filter(|(_, px)| px.is_finite() && *px >= -EPSILON && *px <= span_px + EPSILON)
        .collect()
}

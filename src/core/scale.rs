use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a domain interval onto a pixel range.
///
/// A collapsed domain (`start == end`) maps every value to the middle of the
/// range, and a collapsed range inverts to the middle of the domain, so neither
/// case produces NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let t = normalize(self.domain_start, self.domain_end, value);
        self.range_start + t * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let t = normalize(self.range_start, self.range_end, pixel);
        self.domain_start + t * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward so both ends land on round tick steps.
    ///
    /// Repeats until the step stabilises (at most ten passes), which mirrors how
    /// tick steps can change once the bounds themselves move.
    #[must_use]
    pub fn nice(self, tick_count: usize) -> Self {
        let (mut start, mut stop) = (self.domain_start, self.domain_end);
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let mut previous_step: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, tick_count);
            if previous_step == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous_step = Some(step);
        }

        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        Self {
            domain_start: start,
            domain_end: stop,
            ..self
        }
    }

    /// Round tick values inside the domain, approximately `tick_count` of them.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        let (start, stop) = (
            self.domain_start.min(self.domain_end),
            self.domain_start.max(self.domain_end),
        );
        if tick_count == 0 {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }

        let step = tick_increment(start, stop, tick_count);
        if step > 0.0 {
            let first = (start / step).ceil() as i64;
            let last = (stop / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        } else if step < 0.0 {
            let inverse = -step;
            let first = (start * inverse).ceil() as i64;
            let last = (stop * inverse).floor() as i64;
            (first..=last).map(|i| i as f64 / inverse).collect()
        } else {
            Vec::new()
        }
    }
}

fn normalize(start: f64, end: f64, value: f64) -> f64 {
    let span = end - start;
    if span == 0.0 {
        0.5
    } else {
        (value - start) / span
    }
}

/// Step between round ticks covering `[start, stop]` with roughly `count` ticks.
///
/// Positive results are the step itself; negative results encode `1 / -step`
/// so that sub-unit steps stay exact (`-10.0` means a step of `0.1`).
pub(crate) fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
    const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
    const E2: f64 = std::f64::consts::SQRT_2;

    if count == 0 || !(stop - start).is_finite() || stop <= start {
        return 0.0;
    }

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

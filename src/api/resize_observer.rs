use std::time::{Duration, Instant};

use tracing::trace;

use crate::core::ContainerSize;

/// Trailing-debounced container size observer with a "largest seen" policy.
///
/// Resize notifications only push a deadline forward; the container is
/// measured once, when a poll finds the deadline passed. Reported sizes never
/// shrink: each axis keeps the maximum of the previous report and the new
/// measurement, and a measurement that doesn't raise either axis is not
/// reported at all.
///
/// The observer never reads a clock itself, so hosts drive it with the
/// instants of their event loop and tests with synthetic ones.
#[derive(Debug, Clone)]
pub struct ResizeObserver {
    debounce: Duration,
    connected: bool,
    last_event_at: Option<Instant>,
    reported: ContainerSize,
}

impl ResizeObserver {
    #[must_use]
    pub fn new(debounce: Duration, initial: ContainerSize) -> Self {
        Self {
            debounce,
            connected: false,
            last_event_at: None,
            reported: initial,
        }
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn connect(&mut self) {
        self.connected = true;
    }

    /// Stops listening and drops any pending measurement.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.last_event_at = None;
    }

    /// Forgets the largest seen size and any pending burst.
    pub fn reset(&mut self, initial: ContainerSize) {
        self.last_event_at = None;
        self.reported = initial;
    }

    /// Last reported (largest seen) size.
    #[must_use]
    pub fn reported(&self) -> ContainerSize {
        self.reported
    }

    /// Records one resize event, restarting the quiet period.
    ///
    /// Returns `false` when the observer is disconnected and the event was ignored.
    pub fn notify(&mut self, now: Instant) -> bool {
        if !self.connected {
            return false;
        }
        self.last_event_at = Some(now);
        true
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.last_event_at.is_some()
    }

    /// When the pending burst becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.last_event_at.map(|last| last + self.debounce)
    }

    /// Fires the trailing call once the quiet period has elapsed.
    ///
    /// `measure` runs at most once per burst. A `None` measurement (container
    /// not mounted) consumes the burst without reporting anything.
    pub fn poll<F>(&mut self, now: Instant, measure: F) -> Option<ContainerSize>
    where
        F: FnOnce() -> Option<ContainerSize>,
    {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.last_event_at = None;
        self.measure_now(measure)
    }

    /// Measures immediately, bypassing the debounce.
    pub fn measure_now<F>(&mut self, measure: F) -> Option<ContainerSize>
    where
        F: FnOnce() -> Option<ContainerSize>,
    {
        let Some(measured) = measure() else {
            trace!("container not measurable, skipping resize");
            return None;
        };
        self.accept(measured)
    }

    fn accept(&mut self, measured: ContainerSize) -> Option<ContainerSize> {
        if !measured.is_finite() {
            return None;
        }
        let next = self.reported.max(measured);
        if next == self.reported {
            return None;
        }
        trace!(
            width = next.width,
            height = next.height,
            "container size grew"
        );
        self.reported = next;
        Some(next)
    }
}

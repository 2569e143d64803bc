//! Progress reporting.
//!
//! Codecs report completion as a fraction in `[0, 1]` through a
//! [`ProgressSink`]. Any `Fn(f64) + Sync` closure is a sink, so callers can
//! drive a progress bar, an atomic, or nothing at all.

/// Receiver for completion fractions in `[0, 1]`.
///
/// Sinks are shared between worker threads, hence the `Sync` bound.
pub trait ProgressSink: Sync {
    /// Report that `fraction` of the work is done.
    fn report(&self, fraction: f64);
}

impl<F> ProgressSink for F
where
    F: Fn(f64) + Sync,
{
    fn report(&self, fraction: f64) {
        self(fraction)
    }
}

/// A sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _fraction: f64) {}
}

/// Number of intermediate reports emitted during one scan.
pub const REPORTS_PER_SCAN: usize = 3;

/// Emits a report roughly every `total / 3` steps of a scan.
///
/// Scans shorter than three steps only get the final report.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    total: usize,
    interval: usize,
}

impl Cadence {
    /// Cadence for a scan over `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            interval: total / REPORTS_PER_SCAN,
        }
    }

    /// Fraction to report after `done` items, if this step is a reporting point.
    #[inline]
    pub fn at(&self, done: usize) -> Option<f64> {
        if self.total >= REPORTS_PER_SCAN && done % self.interval == 0 {
            Some(done as f64 / self.total as f64)
        } else {
            None
        }
    }
}

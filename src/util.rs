//! Timing helpers.

use std::time::{Duration, Instant};

/// RAII timer that logs elapsed time on drop.
///
/// # Example
/// ```
/// use mirror_plate::util::Timed;
///
/// let _t = Timed::info("Encode");
/// // ... do work ...
/// // logs "Encode: 1.234ms" when _t is dropped
/// ```
pub struct Timed {
    label: String,
    start: Instant,
    level: log::Level,
}

impl Timed {
    fn start(label: impl Into<String>, level: log::Level) -> Self {
        let label = label.into();
        log::trace!("{}...", label);
        Self {
            label,
            start: Instant::now(),
            level,
        }
    }

    /// Timer that reports at INFO level.
    pub fn info(label: impl Into<String>) -> Self {
        Self::start(label, log::Level::Info)
    }

    /// Timer that reports at DEBUG level, for per-frame work.
    pub fn debug(label: impl Into<String>) -> Self {
        Self::start(label, log::Level::Debug)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        log::log!(self.level, "{}: {:.3?}", self.label, self.elapsed());
    }
}

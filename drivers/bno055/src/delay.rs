use std::{thread, time::Duration};

/// Blocking millisecond delay.
pub trait DelayMs {
    /// Pauses execution for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Delay backed by `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayMs for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}

use std::fmt;
use std::io::{self, Write};

use imu_traits::OrientationReader;
use log::{debug, warn};

use crate::delay::DelayMs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Pause after every sample. The sensor fuses at 100 Hz.
    pub interval_ms: u32,
    /// Stop after this many iterations. `None` polls forever.
    pub max_samples: Option<u64>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig {
            interval_ms: 10,
            max_samples: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryStats {
    pub emitted: u64,
    pub failed: u64,
}

/// Polls an orientation source and prints every sample.
pub struct TelemetryLoop {
    config: TelemetryConfig,
}

impl TelemetryLoop {
    pub fn new(config: TelemetryConfig) -> Self {
        TelemetryLoop { config }
    }

    /// Runs until `max_samples` iterations have passed, or forever.
    ///
    /// A failed sample is logged and skipped. Only a failing `out` ends the
    /// loop early.
    pub fn run<R, D, W>(
        &self,
        reader: &mut R,
        delay: &mut D,
        out: &mut W,
    ) -> io::Result<TelemetryStats>
    where
        R: OrientationReader,
        R::Error: fmt::Display,
        D: DelayMs,
        W: Write,
    {
        let mut stats = TelemetryStats::default();
        debug!("Telemetry loop started");

        loop {
            if let Some(max) = self.config.max_samples {
                if stats.emitted + stats.failed >= max {
                    break;
                }
            }

            match reader.read_euler() {
                Ok(angles) => {
                    write!(out, "{}", angles)?;
                    writeln!(out)?;
                    out.flush()?;
                    stats.emitted += 1;
                }
                Err(e) => {
                    warn!("Failed to get euler angles: {}", e);
                    stats.failed += 1;
                }
            }

            delay.delay_ms(self.config.interval_ms);
        }

        debug!(
            "Telemetry loop finished: {} emitted, {} failed",
            stats.emitted, stats.failed
        );
        Ok(stats)
    }
}

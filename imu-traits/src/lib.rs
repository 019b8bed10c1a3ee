#![no_std]
#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
use std::fmt;

/// Fixed-point scale of the Euler angle output: 16 LSB per degree.
pub const EULER_LSB_PER_DEGREE: f64 = 16.0;

// --- Basic Types ---

/// Euler angles as the sensor reports them, before scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawEulerAngles {
    pub heading: i16,
    pub roll: i16,
    pub pitch: i16,
}

/// Euler angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
    /// Heading (yaw). Derived from the magnetometer, so only as good as its calibration.
    pub heading: f64,
    pub roll: f64,
    pub pitch: f64,
}

impl RawEulerAngles {
    pub fn new(heading: i16, roll: i16, pitch: i16) -> Self {
        Self {
            heading,
            roll,
            pitch,
        }
    }

    /// Converts the raw fixed-point sample to degrees.
    pub fn to_degrees(self) -> EulerAngles {
        EulerAngles {
            heading: raw_to_degrees(self.heading),
            roll: raw_to_degrees(self.roll),
            pitch: raw_to_degrees(self.pitch),
        }
    }
}

impl From<RawEulerAngles> for EulerAngles {
    fn from(raw: RawEulerAngles) -> Self {
        raw.to_degrees()
    }
}

/// Scales a single raw Euler component to degrees.
pub fn raw_to_degrees(raw: i16) -> f64 {
    raw as f64 / EULER_LSB_PER_DEGREE
}

#[cfg(feature = "std")]
impl fmt::Display for EulerAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Heading: {}", self.heading)?;
        writeln!(f, "Roll: {}", self.roll)?;
        writeln!(f, "Pitch: {}", self.pitch)
    }
}

// --- Reader seam ---

/// Anything that can produce a fused orientation sample on demand.
pub trait OrientationReader {
    type Error;

    /// Reads one raw Euler sample from the device.
    fn read_raw_euler(&mut self) -> Result<RawEulerAngles, Self::Error>;

    /// Reads one Euler sample and scales it to degrees.
    fn read_euler(&mut self) -> Result<EulerAngles, Self::Error> {
        self.read_raw_euler().map(RawEulerAngles::to_degrees)
    }
}

use crate::foundation::error::{SillageError, SillageResult};

pub use kurbo::{Affine, Point, Size, Vec2};

/// Zero-based index of a render tick in a simulated timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational tick rate of a render clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (ticks).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated tick rate.
    pub fn new(num: u32, den: u32) -> SillageResult<Self> {
        if den == 0 {
            return Err(SillageError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SillageError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Ticks per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one tick in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timestamp of `frames` ticks after zero.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Number of whole ticks elapsed at `secs`.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Scroll or pointer axis.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    #[default]
    Y,
}

impl Axis {
    /// Component of `v` along this axis.
    pub fn of_vec(self, v: Vec2) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    /// Component of `p` along this axis.
    pub fn of_point(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }

    /// Extent of `s` along this axis.
    pub fn of_size(self, s: Size) -> f64 {
        match self {
            Self::X => s.width,
            Self::Y => s.height,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

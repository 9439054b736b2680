use crate::{
    animation::ease::Ease,
    foundation::core::{FrameIndex, Point},
    foundation::error::{SillageError, SillageResult},
};

/// Values that can be linearly interpolated.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` by `t` (unclamped).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

/// A frame-indexed script of values, used to drive simulated host input.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keys sorted by frame.
    pub keys: Vec<Keyframe<T>>,
    /// Interpolation between keys.
    #[serde(default)]
    pub mode: InterpMode,
}

/// One scripted value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Frame at which the value is reached.
    pub frame: FrameIndex,
    /// Value at `frame`.
    pub value: T,
    /// Ease applied toward the next key.
    #[serde(default)]
    pub ease: Ease,
}

/// Interpolation mode between keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    /// Step to the next key's value when it is reached.
    Hold,
    /// Interpolate through the key's ease.
    #[default]
    Linear,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    /// Script holding `value` forever.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe {
                frame: FrameIndex(0),
                value,
                ease: Ease::Linear,
            }],
            mode: InterpMode::Hold,
        }
    }

    /// Linear script from `from` at frame 0 to `to` at `frames`.
    pub fn ramp(from: T, to: T, frames: u64, ease: Ease) -> Self {
        Self {
            keys: vec![
                Keyframe {
                    frame: FrameIndex(0),
                    value: from,
                    ease,
                },
                Keyframe {
                    frame: FrameIndex(frames),
                    value: to,
                    ease: Ease::Linear,
                },
            ],
            mode: InterpMode::Linear,
        }
    }

    /// Check that the script has keys and that they are sorted.
    pub fn validate(&self) -> SillageResult<()> {
        if self.keys.is_empty() {
            return Err(SillageError::validation(
                "Keyframes must have at least one key",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].frame.0 <= w[1].frame.0) {
            return Err(SillageError::validation(
                "Keyframes keys must be sorted by frame",
            ));
        }
        Ok(())
    }

    /// Value at `frame`; holds the first and last keys outside the scripted range.
    pub fn sample(&self, frame: FrameIndex) -> SillageResult<T> {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return Err(SillageError::validation("Keyframes has no keys"));
        };

        let f = frame.0;
        let idx = self.keys.partition_point(|k| k.frame.0 <= f);
        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(last.value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame.0.saturating_sub(a.frame.0);
        if denom == 0 {
            return Ok(a.value.clone());
        }

        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => {
                let t = ((f - a.frame.0) as f64) / (denom as f64);
                Ok(T::lerp(&a.value, &b.value, a.ease.apply(t)))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;

//! Piecewise-linear mapping from an input range to an output range.

use crate::{
    animation::ease::Ease,
    foundation::error::{SillageError, SillageResult},
    foundation::math::lerp,
};

/// Behaviour of a [`RangeMap`] outside its domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the outer segment's slope.
    #[default]
    Extend,
    /// Hold the outer codomain value.
    Clamp,
}

/// Serialized form of a [`RangeMap`]; validated on conversion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RangeMapSpec {
    /// Domain breakpoints, strictly increasing.
    pub input: Vec<f64>,
    /// Codomain breakpoints, same length as `input`.
    pub output: Vec<f64>,
    /// Per-segment easing: empty, one curve for every segment, or one per segment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ease: Vec<Ease>,
    /// Out-of-domain behaviour.
    #[serde(default)]
    pub extrapolate: Extrapolate,
}

/// Validated piecewise-linear map.
///
/// Construction rejects fewer than two breakpoints, mismatched lengths, non-finite values and
/// a domain that is not strictly increasing, so [`RangeMap::map`] never divides by zero.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RangeMapSpec", into = "RangeMapSpec")]
pub struct RangeMap {
    domain: Vec<f64>,
    codomain: Vec<f64>,
    ease: Vec<Ease>,
    extrapolate: Extrapolate,
}

impl RangeMap {
    /// Build a map through the given breakpoints with linear segments.
    pub fn new(domain: Vec<f64>, codomain: Vec<f64>) -> SillageResult<Self> {
        RangeMapSpec {
            input: domain,
            output: codomain,
            ease: Vec::new(),
            extrapolate: Extrapolate::Extend,
        }
        .try_into()
    }

    /// Two-point map `[d0, d1] -> [c0, c1]`.
    pub fn linear(d0: f64, d1: f64, c0: f64, c1: f64) -> SillageResult<Self> {
        Self::new(vec![d0, d1], vec![c0, c1])
    }

    /// Replace the out-of-domain behaviour.
    pub fn with_extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    /// Replace per-segment easing.
    pub fn with_ease(mut self, ease: Vec<Ease>) -> SillageResult<Self> {
        check_ease_len(ease.len(), self.segments())?;
        self.ease = ease;
        Ok(self)
    }

    /// Domain breakpoints.
    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    /// Codomain breakpoints.
    pub fn codomain(&self) -> &[f64] {
        &self.codomain
    }

    /// Out-of-domain behaviour.
    pub fn extrapolate(&self) -> Extrapolate {
        self.extrapolate
    }

    /// Number of linear segments.
    pub fn segments(&self) -> usize {
        self.domain.len() - 1
    }

    /// True when the codomain never changes direction.
    pub fn is_monotonic(&self) -> bool {
        let rising = self.codomain.windows(2).all(|w| w[0] <= w[1]);
        let falling = self.codomain.windows(2).all(|w| w[0] >= w[1]);
        rising || falling
    }

    /// Map `v` through the breakpoints. NaN input maps to the first codomain value.
    pub fn map(&self, v: f64) -> f64 {
        if v.is_nan() {
            return self.codomain[0];
        }

        let last = self.segments() - 1;
        let seg = self
            .domain
            .partition_point(|d| *d <= v)
            .saturating_sub(1)
            .min(last);

        let (d0, d1) = (self.domain[seg], self.domain[seg + 1]);
        let (c0, c1) = (self.codomain[seg], self.codomain[seg + 1]);
        let t = (v - d0) / (d1 - d0);

        let t = if (0.0..=1.0).contains(&t) {
            self.segment_ease(seg).apply(t)
        } else {
            match self.extrapolate {
                Extrapolate::Extend => t,
                Extrapolate::Clamp => t.clamp(0.0, 1.0),
            }
        };

        if t == 1.0 { c1 } else { lerp(c0, c1, t) }
    }

    fn segment_ease(&self, seg: usize) -> Ease {
        match self.ease.len() {
            0 => Ease::Linear,
            1 => self.ease[0],
            _ => self.ease[seg],
        }
    }
}

fn check_ease_len(len: usize, segments: usize) -> SillageResult<()> {
    if len > 1 && len != segments {
        return Err(SillageError::validation(format!(
            "range map has {segments} segments but {len} easing curves"
        )));
    }
    Ok(())
}

impl TryFrom<RangeMapSpec> for RangeMap {
    type Error = SillageError;

    fn try_from(spec: RangeMapSpec) -> SillageResult<Self> {
        if spec.input.len() < 2 {
            return Err(SillageError::validation(
                "range map domain needs at least 2 breakpoints",
            ));
        }
        if spec.input.len() != spec.output.len() {
            return Err(SillageError::validation(format!(
                "range map domain has {} breakpoints but codomain has {}",
                spec.input.len(),
                spec.output.len()
            )));
        }
        if spec.input.iter().chain(&spec.output).any(|v| !v.is_finite()) {
            return Err(SillageError::validation(
                "range map breakpoints must be finite",
            ));
        }
        if !spec.input.windows(2).all(|w| w[0] < w[1]) {
            return Err(SillageError::validation(
                "range map domain must be strictly increasing",
            ));
        }
        check_ease_len(spec.ease.len(), spec.input.len() - 1)?;

        Ok(Self {
            domain: spec.input,
            codomain: spec.output,
            ease: spec.ease,
            extrapolate: spec.extrapolate,
        })
    }
}

impl From<RangeMap> for RangeMapSpec {
    fn from(map: RangeMap) -> Self {
        Self {
            input: map.domain,
            output: map.codomain,
            ease: map.ease,
            extrapolate: map.extrapolate,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/range_map.rs"]
mod tests;

//! Damped spring used to smooth tick-sampled targets.
//!
//! The model is a mass on a spring with linear drag:
//! `a = (-stiffness * (x - target) - damping * v) / mass`.
//! It is integrated with semi-implicit (symplectic) Euler: velocity first, then position with
//! the new velocity. Each frame's elapsed time is clamped to `max_step` and split into
//! substeps short enough that `h * omega <= 0.5` and `h * damping / mass <= 0.5`, which keeps
//! the integrator inside its stability region for any valid parameters.

use crate::foundation::error::{SillageError, SillageResult};

const MAX_SUBSTEP_SECS: f64 = 1.0 / 240.0;
const MAX_SUBSTEPS: u32 = 256;
const STABILITY_FACTOR: f64 = 0.5;

fn default_mass() -> f64 {
    1.0
}

fn default_rest() -> f64 {
    0.001
}

fn default_max_step() -> f64 {
    1.0 / 15.0
}

/// Constants shaping the smoothing stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    /// Spring constant, > 0.
    pub stiffness: f64,
    /// Drag coefficient, > 0.
    pub damping: f64,
    /// Mass, > 0.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Distance to target under which the spring may settle.
    #[serde(default = "default_rest")]
    pub rest_delta: f64,
    /// Speed under which the spring may settle.
    #[serde(default = "default_rest")]
    pub rest_speed: f64,
    /// Longest frame interval integrated in one tick, in seconds.
    #[serde(default = "default_max_step")]
    pub max_step: f64,
}

impl SpringParams {
    /// Parameters with default mass, rest thresholds and step clamp.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: default_mass(),
            rest_delta: default_rest(),
            rest_speed: default_rest(),
            max_step: default_max_step(),
        }
    }

    /// Critically damped parameters for the given stiffness (unit mass).
    pub fn critical(stiffness: f64) -> Self {
        Self::new(stiffness, 2.0 * stiffness.max(0.0).sqrt())
    }

    /// Override the mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Override the per-tick integration clamp.
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; `>= 1` means no overshoot.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Reject parameters that cannot produce a stable trajectory.
    pub fn validate(&self) -> SillageResult<()> {
        fn positive(name: &str, v: f64) -> SillageResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(SillageError::validation(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
            Ok(())
        }
        fn non_negative(name: &str, v: f64) -> SillageResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(SillageError::validation(format!(
                    "spring {name} must be finite and >= 0, got {v}"
                )));
            }
            Ok(())
        }

        positive("stiffness", self.stiffness)?;
        positive("damping", self.damping)?;
        positive("mass", self.mass)?;
        positive("max_step", self.max_step)?;
        non_negative("rest_delta", self.rest_delta)?;
        non_negative("rest_speed", self.rest_speed)
    }

    fn substep_limit(&self) -> f64 {
        let omega = (self.stiffness / self.mass).sqrt();
        let drag = self.damping / self.mass;
        MAX_SUBSTEP_SECS
            .min(STABILITY_FACTOR / omega)
            .min(STABILITY_FACTOR / drag)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SpringState {
    position: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
}

/// Per-instance spring state. A fresh spring adopts its first target as its position.
#[derive(Clone, Debug)]
pub struct Spring {
    params: SpringParams,
    substep: f64,
    state: Option<SpringState>,
}

impl Spring {
    /// Build a spring, failing fast on invalid parameters.
    pub fn new(params: SpringParams) -> SillageResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            substep: params.substep_limit(),
            state: None,
        })
    }

    /// Parameters this spring was built with.
    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    /// Current position, or `None` before the first target.
    pub fn position(&self) -> Option<f64> {
        self.state.map(|s| s.position)
    }

    /// Current velocity (units per second).
    pub fn velocity(&self) -> f64 {
        self.state.map_or(0.0, |s| s.velocity)
    }

    /// True once the spring has settled on its target (or has no target yet).
    pub fn is_at_rest(&self) -> bool {
        self.state.is_none_or(|s| s.at_rest)
    }

    /// Reset position to `value` with zero velocity.
    pub fn jump(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.state = Some(SpringState {
            position: value,
            velocity: 0.0,
            target: value,
            at_rest: true,
        });
    }

    /// Advance toward `target` by `dt` seconds and return the new position.
    ///
    /// Non-finite targets are ignored; negative or non-finite `dt` counts as zero.
    pub fn step(&mut self, target: f64, dt: f64) -> f64 {
        let Some(mut s) = self.state else {
            if !target.is_finite() {
                return 0.0;
            }
            self.jump(target);
            return target;
        };

        if target.is_finite() && target != s.target {
            s.target = target;
            s.at_rest = false;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.params.max_step)
        } else {
            0.0
        };
        if s.at_rest || dt == 0.0 {
            self.state = Some(s);
            return s.position;
        }

        let mut n = (dt / self.substep).ceil().max(1.0) as u32;
        let mut span = dt;
        if n > MAX_SUBSTEPS {
            n = MAX_SUBSTEPS;
            span = self.substep * f64::from(n);
        }
        let h = span / f64::from(n);

        let SpringParams {
            stiffness,
            damping,
            mass,
            ..
        } = self.params;
        for _ in 0..n {
            let accel = (-stiffness * (s.position - s.target) - damping * s.velocity) / mass;
            s.velocity += accel * h;
            s.position += s.velocity * h;
        }

        if (s.target - s.position).abs() < self.params.rest_delta
            && s.velocity.abs() < self.params.rest_speed
        {
            s.position = s.target;
            s.velocity = 0.0;
            s.at_rest = true;
        }

        self.state = Some(s);
        s.position
    }
}

#[cfg(test)]
#[path = "../../tests/unit/smoothing/spring.rs"]
mod tests;

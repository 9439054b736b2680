use std::collections::BTreeSet;

use crate::{
    binding::bound::BindingSpec,
    binding::property::{Unit, VisualProperty},
    foundation::error::{SillageError, SillageResult},
    signal::source::SignalSpec,
    smoothing::spring::SpringParams,
    transform::range_map::RangeMap,
};

/// A motion effect: one signal fanned out to one binding per property.
///
/// Effects are pure data; they can be built programmatically with [`EffectBuilder`] or loaded
/// from JSON, and must pass [`EffectSpec::validate`] before they can be mounted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectSpec {
    /// Name used in logs and reports.
    pub name: String,
    /// Input signal.
    pub signal: SignalSpec,
    /// Bindings, at most one per property.
    pub bindings: Vec<BindingSpec>,
}

impl EffectSpec {
    /// Check the whole pipeline configuration.
    pub fn validate(&self) -> SillageResult<()> {
        if self.name.trim().is_empty() {
            return Err(SillageError::validation("effect name must not be empty"));
        }
        self.signal.validate()?;
        if self.bindings.is_empty() {
            return Err(SillageError::validation(format!(
                "effect '{}' has no bindings",
                self.name
            )));
        }
        let mut seen = BTreeSet::new();
        for binding in &self.bindings {
            if !seen.insert(binding.property) {
                return Err(SillageError::validation(format!(
                    "effect '{}' binds {} more than once",
                    self.name, binding.property
                )));
            }
            binding.validate().map_err(|err| {
                SillageError::validation(format!("effect '{}': {err}", self.name))
            })?;
        }
        Ok(())
    }

    /// Parse and validate an effect from JSON.
    pub fn from_json(json: &str) -> SillageResult<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }
}

/// Fluent construction of an [`EffectSpec`].
pub struct EffectBuilder {
    name: String,
    signal: SignalSpec,
    bindings: Vec<BindingSpec>,
}

impl EffectBuilder {
    /// Start an effect following `signal`.
    pub fn new(name: impl Into<String>, signal: SignalSpec) -> Self {
        Self {
            name: name.into(),
            signal,
            bindings: Vec::new(),
        }
    }

    /// Add a prepared binding.
    pub fn binding(mut self, binding: BindingSpec) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Bind `property` through a range map built from breakpoints.
    pub fn bind(
        self,
        property: VisualProperty,
        input: impl Into<Vec<f64>>,
        output: impl Into<Vec<f64>>,
    ) -> SillageResult<Self> {
        let map = RangeMap::new(input.into(), output.into())?;
        Ok(self.binding(BindingSpec::new(property, map)))
    }

    /// Set the unit of the most recently added binding.
    pub fn unit(mut self, unit: Unit) -> SillageResult<Self> {
        self.last_binding()?.unit = Some(unit);
        Ok(self)
    }

    /// Smooth the most recently added binding.
    pub fn spring(mut self, params: SpringParams) -> SillageResult<Self> {
        self.last_binding()?.spring = Some(params);
        Ok(self)
    }

    fn last_binding(&mut self) -> SillageResult<&mut BindingSpec> {
        self.bindings
            .last_mut()
            .ok_or_else(|| SillageError::validation("no binding to configure yet"))
    }

    /// Validate and return the effect.
    pub fn build(self) -> SillageResult<EffectSpec> {
        let spec = EffectSpec {
            name: self.name,
            signal: self.signal,
            bindings: self.bindings,
        };
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/spec.rs"]
mod tests;

use crate::{
    binding::property::{StyleValue, Unit, VisualProperty},
    foundation::error::{SillageError, SillageResult},
    smoothing::spring::{Spring, SpringParams},
    transform::range_map::RangeMap,
};

/// One signal-to-property binding: range map, optional spring, target property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BindingSpec {
    /// Written property.
    pub property: VisualProperty,
    /// Unit; the property's default when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    /// Signal to value mapping.
    pub map: RangeMap,
    /// Smoothing applied after mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spring: Option<SpringParams>,
}

impl BindingSpec {
    /// Unsmoothed binding in the property's default unit.
    pub fn new(property: VisualProperty, map: RangeMap) -> Self {
        Self {
            property,
            unit: None,
            map,
            spring: None,
        }
    }

    /// Override the unit.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Smooth the mapped value with a spring.
    pub fn with_spring(mut self, spring: SpringParams) -> Self {
        self.spring = Some(spring);
        self
    }

    /// Effective unit.
    pub fn unit(&self) -> Unit {
        self.unit.unwrap_or(self.property.default_unit())
    }

    /// Reject a unit the property cannot take or invalid spring constants.
    pub fn validate(&self) -> SillageResult<()> {
        let unit = self.unit();
        if !self.property.accepts(unit) {
            return Err(SillageError::validation(format!(
                "{} cannot be expressed in {unit:?}",
                self.property
            )));
        }
        if let Some(spring) = &self.spring {
            spring.validate()?;
        }
        Ok(())
    }

    /// Build the per-instance runtime state.
    pub fn instantiate(&self) -> SillageResult<Binding> {
        self.validate()?;
        let spring = self.spring.map(Spring::new).transpose()?;
        Ok(Binding {
            property: self.property,
            unit: self.unit(),
            map: self.map.clone(),
            spring,
        })
    }
}

/// Runtime state of one binding: owns its spring exclusively.
#[derive(Clone, Debug)]
pub struct Binding {
    property: VisualProperty,
    unit: Unit,
    map: RangeMap,
    spring: Option<Spring>,
}

impl Binding {
    /// Written property.
    pub fn property(&self) -> VisualProperty {
        self.property
    }

    /// Transform then smooth one signal value for a tick of `dt` seconds.
    pub fn evaluate(&mut self, signal: f64, dt: f64) -> StyleValue {
        let target = self.map.map(signal);
        let value = match &mut self.spring {
            Some(spring) => spring.step(target, dt),
            None => target,
        };
        StyleValue::new(self.property, value, self.unit)
    }

    /// True when unsmoothed or when the spring has settled.
    pub fn is_settled(&self) -> bool {
        self.spring.as_ref().is_none_or(Spring::is_at_rest)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/bound.rs"]
mod tests;

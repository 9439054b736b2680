use std::{fmt, str::FromStr};

use crate::{
    foundation::error::{SillageError, SillageResult},
    foundation::math::canonical_zero,
};

/// Visual property a binding may write.
///
/// Only compositor-friendly properties exist here, so a binding can never trigger layout.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum VisualProperty {
    /// Horizontal translation.
    TranslateX,
    /// Vertical translation.
    TranslateY,
    /// Vertical skew.
    SkewY,
    /// Uniform scale.
    Scale,
    /// Opacity in `[0, 1]`.
    Opacity,
}

impl VisualProperty {
    /// Every bindable property.
    pub const ALL: [VisualProperty; 5] = [
        VisualProperty::TranslateX,
        VisualProperty::TranslateY,
        VisualProperty::SkewY,
        VisualProperty::Scale,
        VisualProperty::Opacity,
    ];

    /// CSS name.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::SkewY => "skewY",
            Self::Scale => "scale",
            Self::Opacity => "opacity",
        }
    }

    /// Unit used when none is configured.
    pub fn default_unit(self) -> Unit {
        match self {
            Self::TranslateX | Self::TranslateY => Unit::Px,
            Self::SkewY => Unit::Deg,
            Self::Scale | Self::Opacity => Unit::None,
        }
    }

    /// Whether `unit` makes sense for this property.
    pub fn accepts(self, unit: Unit) -> bool {
        match self {
            Self::TranslateX | Self::TranslateY => matches!(unit, Unit::Px | Unit::Percent),
            Self::SkewY => unit == Unit::Deg,
            Self::Scale | Self::Opacity => unit == Unit::None,
        }
    }

    /// Value written when nothing is bound.
    pub fn identity(self) -> f64 {
        match self {
            Self::Scale | Self::Opacity => 1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for VisualProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for VisualProperty {
    type Err = SillageError;

    fn from_str(s: &str) -> SillageResult<Self> {
        let found = Self::ALL
            .into_iter()
            .find(|p| p.css_name().eq_ignore_ascii_case(s.trim()));
        found.ok_or_else(|| {
            SillageError::binding(format!(
                "'{s}' is not a compositable property; expected one of translateX, translateY, skewY, scale, opacity"
            ))
        })
    }
}

/// Unit suffix of a bound value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Pixels.
    Px,
    /// Percent of the node's own size.
    Percent,
    /// Degrees.
    Deg,
    /// Unitless.
    None,
}

impl Unit {
    /// CSS suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Deg => "deg",
            Self::None => "",
        }
    }
}

/// Final per-tick output of one binding.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StyleValue {
    /// Written property.
    pub property: VisualProperty,
    /// Scalar value in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: Unit,
}

impl StyleValue {
    /// Build a value.
    pub fn new(property: VisualProperty, value: f64, unit: Unit) -> Self {
        Self {
            property,
            value,
            unit,
        }
    }

    /// Value with its unit suffix, e.g. `-37.5%`.
    pub fn amount(&self) -> String {
        format!("{}{}", canonical_zero(self.value), self.unit.suffix())
    }

    /// CSS fragment: a transform function, or `opacity: v` for opacity.
    pub fn to_css(&self) -> String {
        match self.property {
            VisualProperty::Opacity => format!("opacity: {}", self.amount()),
            p => format!("{}({})", p.css_name(), self.amount()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/property.rs"]
mod tests;

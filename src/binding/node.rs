use std::{cell::RefCell, rc::Rc};

use crate::{
    binding::property::{StyleValue, Unit, VisualProperty},
    foundation::core::{Affine, Size, Vec2},
    foundation::math::{canonical_zero, clamp01},
};

/// A rendered node whose compositable style a binding writes every tick.
pub trait RenderNode {
    /// Write one property.
    fn apply(&mut self, value: StyleValue);
}

/// Shared handle to a mounted node. Bindings keep only a weak reference to it.
pub type NodeRef = Rc<RefCell<dyn RenderNode>>;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Translation along one axis with its unit.
pub struct Offset {
    /// Amount.
    pub value: f64,
    /// `Px` or `Percent`.
    pub unit: Unit,
}

impl Offset {
    fn resolve(self, extent: f64) -> f64 {
        match self.unit {
            Unit::Percent => self.value / 100.0 * extent,
            _ => self.value,
        }
    }

    /// Amount with unit suffix, e.g. `-37.5%`.
    pub fn amount(self) -> String {
        format!("{}{}", canonical_zero(self.value), self.unit.suffix())
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self {
            value: 0.0,
            unit: Unit::Px,
        }
    }
}

/// Compositable style of a node.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeStyle {
    /// Horizontal translation.
    pub translate_x: Offset,
    /// Vertical translation.
    pub translate_y: Offset,
    /// Vertical skew in degrees.
    pub skew_y_deg: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            translate_x: Offset::default(),
            translate_y: Offset::default(),
            skew_y_deg: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl NodeStyle {
    /// Store one value.
    pub fn set(&mut self, value: StyleValue) {
        match value.property {
            VisualProperty::TranslateX => {
                self.translate_x = Offset {
                    value: value.value,
                    unit: value.unit,
                }
            }
            VisualProperty::TranslateY => {
                self.translate_y = Offset {
                    value: value.value,
                    unit: value.unit,
                }
            }
            VisualProperty::SkewY => self.skew_y_deg = value.value,
            VisualProperty::Scale => self.scale = value.value,
            VisualProperty::Opacity => self.opacity = clamp01(value.value),
        }
    }

    /// Current value of one property.
    pub fn get(&self, property: VisualProperty) -> f64 {
        match property {
            VisualProperty::TranslateX => self.translate_x.value,
            VisualProperty::TranslateY => self.translate_y.value,
            VisualProperty::SkewY => self.skew_y_deg,
            VisualProperty::Scale => self.scale,
            VisualProperty::Opacity => self.opacity,
        }
    }

    /// CSS `transform` value, e.g. `translateX(-37.5%) translateY(0px) skewY(0deg) scale(1)`.
    pub fn css_transform(&self) -> String {
        format!(
            "translateX({}) translateY({}) skewY({}deg) scale({})",
            self.translate_x.amount(),
            self.translate_y.amount(),
            canonical_zero(self.skew_y_deg),
            canonical_zero(self.scale)
        )
    }

    /// Transform matrix for a node of `size`, applied about its center.
    ///
    /// Order matches CSS: translate, then skew, then scale.
    pub fn to_affine(&self, size: Size) -> Affine {
        let translate = Vec2::new(
            self.translate_x.resolve(size.width),
            self.translate_y.resolve(size.height),
        );
        let center = Vec2::new(size.width / 2.0, size.height / 2.0);
        let skew = Affine::skew(0.0, self.skew_y_deg.to_radians().tan());

        Affine::translate(translate)
            * Affine::translate(center)
            * skew
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

/// In-memory node recording its style and the number of writes it received.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledNode {
    /// Identifier for reports.
    pub id: String,
    /// Current style.
    pub style: NodeStyle,
    /// Total writes applied.
    pub writes: u64,
}

impl StyledNode {
    /// Node with identity style.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Wrap in a shared handle, keeping a typed handle for inspection.
    pub fn shared(id: impl Into<String>) -> (Rc<RefCell<StyledNode>>, NodeRef) {
        let typed = Rc::new(RefCell::new(Self::new(id)));
        let node: NodeRef = typed.clone();
        (typed, node)
    }
}

impl RenderNode for StyledNode {
    fn apply(&mut self, value: StyleValue) {
        self.style.set(value);
        self.writes += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/node.rs"]
mod tests;

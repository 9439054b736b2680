use super::*;
use crate::foundation::core::Point;

#[test]
fn css_transform_reflects_writes() {
    let mut node = StyledNode::new("gallery");
    node.apply(StyleValue::new(
        VisualProperty::TranslateX,
        -37.5,
        Unit::Percent,
    ));
    node.apply(StyleValue::new(VisualProperty::SkewY, 5.0, Unit::Deg));
    assert_eq!(node.writes, 2);
    assert_eq!(
        node.style.css_transform(),
        "translateX(-37.5%) translateY(0px) skewY(5deg) scale(1)"
    );
}

#[test]
fn opacity_is_clamped() {
    let mut style = NodeStyle::default();
    style.set(StyleValue::new(VisualProperty::Opacity, 1.7, Unit::None));
    assert_eq!(style.get(VisualProperty::Opacity), 1.0);
    style.set(StyleValue::new(VisualProperty::Opacity, -0.2, Unit::None));
    assert_eq!(style.get(VisualProperty::Opacity), 0.0);
}

#[test]
fn identity_style_is_identity_affine() {
    let style = NodeStyle::default();
    let a = style.to_affine(Size::new(200.0, 100.0));
    let p = a * Point::new(13.0, 7.0);
    assert!((p.x - 13.0).abs() < 1e-12 && (p.y - 7.0).abs() < 1e-12);
}

#[test]
fn percent_translation_uses_node_size() {
    let mut style = NodeStyle::default();
    style.set(StyleValue::new(
        VisualProperty::TranslateX,
        -75.0,
        Unit::Percent,
    ));
    style.set(StyleValue::new(VisualProperty::TranslateY, 10.0, Unit::Px));
    let p = style.to_affine(Size::new(400.0, 100.0)) * Point::ZERO;
    assert!((p.x + 300.0).abs() < 1e-9);
    assert!((p.y - 10.0).abs() < 1e-9);
}

#[test]
fn scale_is_about_center() {
    let mut style = NodeStyle::default();
    style.set(StyleValue::new(VisualProperty::Scale, 2.0, Unit::None));
    let center = style.to_affine(Size::new(100.0, 100.0)) * Point::new(50.0, 50.0);
    assert!((center.x - 50.0).abs() < 1e-9 && (center.y - 50.0).abs() < 1e-9);
}

#[test]
fn shared_handles_point_at_same_node() {
    let (typed, node) = StyledNode::shared("orb");
    node.borrow_mut()
        .apply(StyleValue::new(VisualProperty::Scale, 0.5, Unit::None));
    assert_eq!(typed.borrow().style.scale, 0.5);
    assert_eq!(typed.borrow().id, "orb");
}

use super::*;

#[test]
fn unsmoothed_binding_maps_directly() {
    let spec = BindingSpec::new(
        VisualProperty::TranslateX,
        RangeMap::linear(0.0, 1.0, 0.0, -75.0).unwrap(),
    )
    .with_unit(Unit::Percent);
    let mut b = spec.instantiate().unwrap();
    assert_eq!(b.evaluate(0.5, 1.0 / 60.0).amount(), "-37.5%");
    assert!(b.is_settled());
}

#[test]
fn smoothed_binding_starts_at_first_target() {
    let spec = BindingSpec::new(
        VisualProperty::SkewY,
        RangeMap::linear(-3000.0, 3000.0, -5.0, 5.0).unwrap(),
    )
    .with_spring(SpringParams::new(400.0, 50.0));
    let mut b = spec.instantiate().unwrap();
    assert_eq!(b.evaluate(3000.0, 1.0 / 60.0).value, 5.0);
    let next = b.evaluate(0.0, 1.0 / 60.0).value;
    assert!(next < 5.0 && next > 0.0);
    assert!(!b.is_settled());
}

#[test]
fn invalid_units_and_springs_fail_validation() {
    let map = RangeMap::linear(0.0, 1.0, 0.0, 1.0).unwrap();
    let bad_unit = BindingSpec::new(VisualProperty::Opacity, map.clone()).with_unit(Unit::Px);
    assert!(bad_unit.instantiate().is_err());

    let bad_spring =
        BindingSpec::new(VisualProperty::Scale, map).with_spring(SpringParams::new(0.0, 10.0));
    assert!(bad_spring.instantiate().is_err());
}

#[test]
fn json_form() {
    let spec: BindingSpec = serde_json::from_str(
        r#"{
            "property": "skewY",
            "map": { "input": [-3000, 3000], "output": [-5, 5] },
            "spring": { "stiffness": 400, "damping": 50 }
        }"#,
    )
    .unwrap();
    assert_eq!(spec.unit(), Unit::Deg);
    assert!(spec.validate().is_ok());
}

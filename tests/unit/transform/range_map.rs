use super::*;

#[test]
fn endpoints_are_exact() {
    let cases = [
        (0.0, 1.0, 0.0, -75.0),
        (-3000.0, 3000.0, -5.0, 5.0),
        (0.1, 0.7, 0.3, 0.1),
        (10.0, 20.0, 1.0, 1.0),
    ];
    for (d0, d1, c0, c1) in cases {
        let m = RangeMap::linear(d0, d1, c0, c1).unwrap();
        assert_eq!(m.map(d0), c0);
        assert_eq!(m.map(d1), c1);
    }
}

#[test]
fn gallery_offsets() {
    let m = RangeMap::linear(0.0, 1.0, 0.0, -75.0).unwrap();
    assert_eq!(m.map(0.0), 0.0);
    assert_eq!(m.map(1.0), -75.0);
    assert_eq!(m.map(0.5), -37.5);
}

#[test]
fn skew_is_symmetric() {
    let m = RangeMap::linear(-3000.0, 3000.0, -5.0, 5.0).unwrap();
    assert_eq!(m.map(3000.0), 5.0);
    assert_eq!(m.map(-3000.0), -5.0);
    assert_eq!(m.map(0.0), 0.0);
}

#[test]
fn monotonic_codomain_gives_monotonic_output() {
    let rising = RangeMap::new(vec![0.0, 0.3, 1.0], vec![0.0, 10.0, 12.0]).unwrap();
    let falling = RangeMap::linear(0.0, 1.0, 5.0, -5.0).unwrap();
    let bump = RangeMap::new(vec![0.0, 0.5, 1.0], vec![0.0, 1.0, 0.0]).unwrap();
    assert!(rising.is_monotonic());
    assert!(falling.is_monotonic());
    assert!(!bump.is_monotonic());

    let samples: Vec<f64> = (0..=100).map(|i| f64::from(i) / 100.0).collect();
    assert!(samples.windows(2).all(|w| rising.map(w[0]) <= rising.map(w[1])));
    assert!(samples.windows(2).all(|w| falling.map(w[0]) >= falling.map(w[1])));

    let bumped: Vec<f64> = samples.iter().map(|v| bump.map(*v)).collect();
    let up = bumped.windows(2).all(|w| w[0] <= w[1]);
    let down = bumped.windows(2).all(|w| w[0] >= w[1]);
    assert!(!up && !down);
}

#[test]
fn multi_segment_interpolates_inside_segment() {
    let m = RangeMap::new(vec![0.0, 0.5, 1.0], vec![0.0, 1.0, 0.0]).unwrap();
    assert_eq!(m.map(0.25), 0.5);
    assert_eq!(m.map(0.5), 1.0);
    assert_eq!(m.map(0.75), 0.5);
}

#[test]
fn extends_by_default_and_clamps_on_request() {
    let m = RangeMap::linear(-3000.0, 3000.0, -5.0, 5.0).unwrap();
    assert_eq!(m.extrapolate(), Extrapolate::Extend);
    assert_eq!(m.map(6000.0), 10.0);
    assert_eq!(m.map(-9000.0), -15.0);

    let clamped = m.with_extrapolate(Extrapolate::Clamp);
    assert_eq!(clamped.map(6000.0), 5.0);
    assert_eq!(clamped.map(-9000.0), -5.0);
}

#[test]
fn segment_easing_applies_inside_only() {
    let m = RangeMap::linear(0.0, 1.0, 0.0, 100.0)
        .unwrap()
        .with_ease(vec![Ease::InQuad])
        .unwrap();
    assert_eq!(m.map(0.5), 25.0);
    assert_eq!(m.map(2.0), 200.0);
}

#[test]
fn construction_fails_fast() {
    assert!(RangeMap::new(vec![0.0], vec![1.0]).is_err());
    assert!(RangeMap::new(vec![], vec![]).is_err());
    assert!(RangeMap::new(vec![0.0, 1.0], vec![1.0]).is_err());
    assert!(RangeMap::linear(1.0, 1.0, 0.0, 1.0).is_err());
    assert!(RangeMap::linear(1.0, 0.0, 0.0, 1.0).is_err());
    assert!(RangeMap::new(vec![0.0, 0.5, 0.5], vec![0.0, 1.0, 2.0]).is_err());
    assert!(RangeMap::linear(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    assert!(RangeMap::linear(0.0, 1.0, f64::NAN, 1.0).is_err());
    let m = RangeMap::new(vec![0.0, 0.5, 1.0], vec![0.0, 1.0, 0.0]).unwrap();
    assert!(m.with_ease(vec![Ease::Linear; 3]).is_err());
}

#[test]
fn nan_input_maps_to_first_output() {
    let m = RangeMap::linear(0.0, 1.0, 3.0, 4.0).unwrap();
    assert_eq!(m.map(f64::NAN), 3.0);
}

#[test]
fn deserialization_validates() {
    let ok: RangeMap =
        serde_json::from_str(r#"{ "input": [0, 1], "output": [0, -75] }"#).unwrap();
    assert_eq!(ok.map(0.5), -37.5);

    let bad = serde_json::from_str::<RangeMap>(r#"{ "input": [1, 0], "output": [0, 1] }"#);
    assert!(bad.is_err());
}

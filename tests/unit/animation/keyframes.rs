use super::*;

fn two_keys(mode: InterpMode) -> Keyframes<f64> {
    Keyframes {
        keys: vec![
            Keyframe {
                frame: FrameIndex(0),
                value: 1.0,
                ease: Ease::Linear,
            },
            Keyframe {
                frame: FrameIndex(10),
                value: 3.0,
                ease: Ease::Linear,
            },
        ],
        mode,
    }
}

#[test]
fn hold_is_constant_between_keys() {
    let kf = two_keys(InterpMode::Hold);
    assert_eq!(kf.sample(FrameIndex(5)).unwrap(), 1.0);
    assert_eq!(kf.sample(FrameIndex(10)).unwrap(), 3.0);
}

#[test]
fn linear_interpolates_and_holds_outside() {
    let kf = two_keys(InterpMode::Linear);
    assert_eq!(kf.sample(FrameIndex(5)).unwrap(), 2.0);
    assert_eq!(kf.sample(FrameIndex(99)).unwrap(), 3.0);
}

#[test]
fn unsorted_and_empty_scripts_are_rejected() {
    let mut kf = two_keys(InterpMode::Linear);
    kf.keys.reverse();
    assert!(kf.validate().is_err());

    let empty: Keyframes<f64> = Keyframes {
        keys: vec![],
        mode: InterpMode::Linear,
    };
    assert!(empty.validate().is_err());
    assert!(empty.sample(FrameIndex(0)).is_err());
}

#[test]
fn points_interpolate_componentwise() {
    let kf = Keyframes::ramp(Point::new(0.0, 0.0), Point::new(100.0, 50.0), 4, Ease::Linear);
    assert_eq!(kf.sample(FrameIndex(2)).unwrap(), Point::new(50.0, 25.0));
}

#[test]
fn json_defaults_to_linear_mode() {
    let kf: Keyframes<f64> = serde_json::from_str(
        r#"{ "keys": [ { "frame": 0, "value": 0.0 }, { "frame": 4, "value": 8.0 } ] }"#,
    )
    .unwrap();
    assert_eq!(kf.mode, InterpMode::Linear);
    assert_eq!(kf.sample(FrameIndex(1)).unwrap(), 2.0);
}

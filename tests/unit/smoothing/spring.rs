use super::*;

const DT: f64 = 1.0 / 60.0;

fn run(spring: &mut Spring, target: f64, secs: f64) -> f64 {
    let ticks = (secs / DT).round() as usize;
    let mut out = spring.position().unwrap_or(target);
    for _ in 0..ticks {
        out = spring.step(target, DT);
    }
    out
}

#[test]
fn first_target_becomes_position() {
    let mut s = Spring::new(SpringParams::new(400.0, 50.0)).unwrap();
    assert_eq!(s.position(), None);
    assert_eq!(s.step(12.5, DT), 12.5);
    assert_eq!(s.velocity(), 0.0);
    assert!(s.is_at_rest());
}

#[test]
fn converges_to_constant_target() {
    for params in [
        SpringParams::new(400.0, 50.0),
        SpringParams::new(100.0, 10.0),
        SpringParams::critical(170.0),
        SpringParams::new(20.0, 20.0),
    ] {
        let mut s = Spring::new(params).unwrap();
        s.step(0.0, DT);
        let out = run(&mut s, -75.0, 20.0);
        assert!((out + 75.0).abs() < 1e-3, "{params:?} ended at {out}");
        assert!(s.is_at_rest(), "{params:?}");
    }
}

#[test]
fn overdamped_spring_does_not_overshoot() {
    let params = SpringParams::new(400.0, 50.0);
    assert!(params.damping_ratio() >= 1.0);
    let mut s = Spring::new(params).unwrap();
    s.step(0.0, DT);
    for _ in 0..600 {
        let p = s.step(5.0, DT);
        assert!(p <= 5.0 + 1e-9, "overshot to {p}");
    }
}

#[test]
fn rejects_invalid_parameters() {
    assert!(Spring::new(SpringParams::new(0.0, 10.0)).is_err());
    assert!(Spring::new(SpringParams::new(-1.0, 10.0)).is_err());
    assert!(Spring::new(SpringParams::new(100.0, -0.5)).is_err());
    assert!(Spring::new(SpringParams::new(100.0, 0.0)).is_err());
    assert!(Spring::new(SpringParams::new(f64::NAN, 10.0)).is_err());
    assert!(Spring::new(SpringParams::new(100.0, 10.0).with_mass(0.0)).is_err());
    assert!(Spring::new(SpringParams::new(100.0, 10.0).with_max_step(0.0)).is_err());
}

#[test]
fn stays_bounded_under_irregular_frames() {
    let intervals = [DT, 0.0, 5.0, 1e-4, 0.25, -1.0, f64::INFINITY, DT * 3.0];
    for params in [
        SpringParams::new(1e9, 1e3),
        SpringParams::new(1.0, 1e6),
        SpringParams::new(100.0, 10.0),
    ] {
        let mut s = Spring::new(params).unwrap();
        let mut target: f64 = 1.0;
        for i in 0..2_000 {
            target = -target;
            let dt = intervals[i % intervals.len()];
            let p = s.step(target * 100.0, dt);
            assert!(p.is_finite(), "{params:?} diverged");
            assert!(p.abs() <= 10_000.0, "{params:?} reached {p}");
        }
    }
}

#[test]
fn long_pause_is_clamped() {
    let mut a = Spring::new(SpringParams::new(100.0, 20.0)).unwrap();
    let mut b = a.clone();
    a.step(0.0, DT);
    b.step(0.0, DT);
    let after_pause = a.step(10.0, 30.0);
    let after_max_step = b.step(10.0, 1.0 / 15.0);
    assert_eq!(after_pause, after_max_step);
}

#[test]
fn ignores_non_finite_targets_and_jumps() {
    let mut s = Spring::new(SpringParams::new(100.0, 20.0)).unwrap();
    assert_eq!(s.step(f64::NAN, DT), 0.0);
    assert_eq!(s.position(), None);
    s.step(2.0, DT);
    assert_eq!(s.step(f64::INFINITY, DT), 2.0);
    s.jump(7.0);
    assert_eq!(s.position(), Some(7.0));
    assert_eq!(s.velocity(), 0.0);
}

#[test]
fn params_deserialize_with_defaults() {
    let p: SpringParams = serde_json::from_str(r#"{ "stiffness": 400, "damping": 50 }"#).unwrap();
    assert_eq!(p, SpringParams::new(400.0, 50.0));
}

#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` inside `[a, b]` as a fraction; `0` when the span is empty.
#[inline]
pub(crate) fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span.abs() <= f64::EPSILON || !span.is_finite() {
        return 0.0;
    }
    (v - a) / span
}

#[inline]
pub(crate) fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Folds `-0.0` into `0.0` so formatted output never reads `-0`.
#[inline]
pub(crate) fn canonical_zero(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

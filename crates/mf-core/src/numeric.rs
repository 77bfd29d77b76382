use crate::{MfError, MfResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> MfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> MfResult<Real> {
    ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(MfError::OutOfRange {
            what,
            value: v,
            expected: "> 0",
        })
    }
}

/// Finite and not below zero.
pub fn ensure_non_negative(v: Real, what: &'static str) -> MfResult<Real> {
    ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(MfError::OutOfRange {
            what,
            value: v,
            expected: ">= 0",
        })
    }
}

/// Finite and inside the closed unit interval.
pub fn ensure_fraction(v: Real, what: &'static str) -> MfResult<Real> {
    ensure_finite(v, what)?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(MfError::OutOfRange {
            what,
            value: v,
            expected: "in [0, 1]",
        })
    }
}

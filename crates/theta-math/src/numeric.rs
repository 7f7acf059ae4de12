// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Numeric
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Floating-point helpers shared by the group generator and the series.

use num_complex::Complex64;
use theta_types::error::{ThetaError, ThetaResult};

/// `base^exp` by repeated multiplication.
///
/// Negative exponents multiply the reciprocal `1/base`, so `exp < 0` with
/// `base = 0` gives a non-finite result rather than an error.
pub fn int_pow(base: Complex64, exp: i32) -> Complex64 {
    let mut result = Complex64::new(1.0, 0.0);
    if exp >= 0 {
        for _ in 0..exp {
            result *= base;
        }
    } else {
        let inv = base.inv();
        for _ in exp..0 {
            result *= inv;
        }
    }
    result
}

/// Σ_{i=lo}^{hi} base^i over non-negative integer exponents.
pub fn pow_sum(base: usize, lo: u32, hi: u32) -> usize {
    let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
    let mut q = base.pow(lo);
    let mut sum = 0;
    for _ in lo..=hi {
        sum += q;
        q *= base;
    }
    sum
}

/// |x - y| <= tol.
#[inline]
pub fn equal_fp(x: f64, y: f64, tol: f64) -> bool {
    (x - y).abs() <= tol
}

/// Element-wise comparison of two sequences.
///
/// Errors with [`ThetaError::LengthMismatch`] when the lengths differ.
pub fn equal_collections<T, U, F>(xs: &[T], ys: &[U], mut equal: F) -> ThetaResult<bool>
where
    F: FnMut(&T, &U) -> bool,
{
    if xs.len() != ys.len() {
        return Err(ThetaError::LengthMismatch {
            left: xs.len(),
            right: ys.len(),
        });
    }
    Ok(xs.iter().zip(ys).all(|(x, y)| equal(x, y)))
}

/// Complex sequences equal within `tol` per element.
pub fn equal_complex_fp(xs: &[Complex64], ys: &[Complex64], tol: f64) -> ThetaResult<bool> {
    equal_collections(xs, ys, |x, y| (x - y).norm() <= tol)
}

/// Remove later elements equal (per `equal`) to an earlier kept one.
///
/// Stable: survivors keep their first-occurrence order. Quadratic in the
/// input length.
pub fn delete_duplicates<T, F>(items: &mut Vec<T>, mut equal: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if items.is_empty() {
        return;
    }
    let mut kept = 1;
    for i in 1..items.len() {
        if !(0..kept).any(|j| equal(&items[i], &items[j])) {
            items.swap(kept, i);
            kept += 1;
        }
    }
    items.truncate(kept);
}

/// First index holding a non-finite value.
pub fn check_finite(values: &[Complex64]) -> ThetaResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ThetaError::NonFinite { index }),
        None => Ok(()),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Mobius
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Möbius (linear-fractional) transformations z ↦ (az+b)/(cz+d).
//!
//! A transformation is stored as its 2x2 coefficient matrix. Composition is
//! the matrix product, so `f * g` acts as `z ↦ f(g(z))`. No operation here
//! checks for degeneracy: a vanishing determinant or denominator yields
//! non-finite coefficients that propagate through later arithmetic.

use num_complex::Complex64;
use std::fmt;
use std::ops::Mul;

/// 2x2 complex matrix (a, b; c, d) acting as a Möbius transformation.
///
/// `PartialEq` compares raw coefficients exactly. Use [`Transform::approx_eq`]
/// for the tolerance-based comparison on unit-determinant representatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl Transform {
    pub const fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Transform { a, b, c, d }
    }

    pub const fn identity() -> Self {
        Transform::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Real-coefficient transformation.
    pub fn from_real(a: f64, b: f64, c: f64, d: f64) -> Self {
        Transform::new(a.into(), b.into(), c.into(), d.into())
    }

    pub fn coefficients(&self) -> [Complex64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Matrix product `self · other`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform::new(
            self.a * other.a + self.b * other.c,
            self.a * other.b + self.b * other.d,
            self.c * other.a + self.d * other.c,
            self.c * other.b + self.d * other.d,
        )
    }

    /// (az + b) / (cz + d). Infinity is not special-cased.
    #[inline]
    pub fn apply(&self, z: Complex64) -> Complex64 {
        (self.a * z + self.b) / (self.c * z + self.d)
    }

    /// Apply to every point, returning a new vector.
    pub fn map(&self, zs: &[Complex64]) -> Vec<Complex64> {
        zs.iter().map(|&z| self.apply(z)).collect()
    }

    /// Adjugate (d, -b, -c, a). Same map as the matrix inverse, but the
    /// determinant is not divided out.
    pub fn invert(&self) -> Transform {
        Transform::new(self.d, -self.b, -self.c, self.a)
    }

    /// True matrix inverse. Non-finite when det ≈ 0.
    pub fn invert_as_matrix(&self) -> Transform {
        let k = self.det();
        Transform::new(self.d / k, -self.b / k, -self.c / k, self.a / k)
    }

    pub fn det(&self) -> Complex64 {
        self.a * self.d - self.b * self.c
    }

    /// Divide by the principal square root of the determinant.
    ///
    /// The result has det = 1, but the branch of the square root is not
    /// canonical: two matrices representing the same map can normalize to
    /// representatives that differ by an overall sign.
    pub fn normalize(&self) -> Transform {
        let k = self.det().sqrt();
        Transform::new(self.a / k, self.b / k, self.c / k, self.d / k)
    }

    /// Euclidean norm of the four coefficients.
    pub fn norm(&self) -> f64 {
        let sq = self.a.norm_sqr() + self.b.norm_sqr() + self.c.norm_sqr() + self.d.norm_sqr();
        sq.sqrt()
    }

    /// Euclidean distance between coefficient vectors. No normalization.
    pub fn distance(&self, other: &Transform) -> f64 {
        let sq = (self.a - other.a).norm_sqr()
            + (self.b - other.b).norm_sqr()
            + (self.c - other.c).norm_sqr()
            + (self.d - other.d).norm_sqr();
        sq.sqrt()
    }

    /// Distance between unit-determinant representatives is at most `tol`.
    pub fn approx_eq(&self, other: &Transform, tol: f64) -> bool {
        self.normalize().distance(&other.normalize()) <= tol
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.compose(&rhs)
    }
}

impl<'a> Mul<&'a Transform> for &'a Transform {
    type Output = Transform;

    fn mul(self, rhs: &'a Transform) -> Transform {
        self.compose(rhs)
    }
}

impl From<[Complex64; 4]> for Transform {
    fn from(c: [Complex64; 4]) -> Self {
        Transform::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Transform> for [Complex64; 4] {
    fn from(f: Transform) -> Self {
        f.coefficients()
    }
}

/// Row form `a b c d`; the alternate form (`{:#}`) prints the 2x2 table.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{} {}\n{} {}", self.a, self.b, self.c, self.d)
        } else {
            write!(f, "{} {} {} {}", self.a, self.b, self.c, self.d)
        }
    }
}

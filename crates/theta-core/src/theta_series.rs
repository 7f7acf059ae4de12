// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Theta Series
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Poincaré-type theta series over a finite set of group elements.
//!
//! θ(z) = Σ_g (h∘g)(z) · (c_g z + d_g)^(-2m)
//!
//! The sum runs in member order, which is the generation/dedup order of the
//! group elements. Floating-point addition is not associative, so a different
//! order can change the last bits of the result. No truncation error is
//! estimated; accuracy is controlled by the group depth.

use num_complex::Complex64;
use theta_math::mobius::Transform;
use theta_math::numeric::int_pow;

/// One summand: the composed map h∘g and the denominator (c, d) of g itself.
#[derive(Debug, Clone, Copy)]
struct Member {
    f: Transform,
    c: Complex64,
    d: Complex64,
}

/// Exponent −2m of the weight factor, `None` when it does not fit in `i32`.
pub fn weight_exponent(m: u32) -> Option<i32> {
    i32::try_from(m).ok()?.checked_mul(-2)
}

#[derive(Debug, Clone, Default)]
pub struct ThetaSeries {
    members: Vec<Member>,
    m: u32,
    exp: i32,
}

impl ThetaSeries {
    /// Build from weight `m`, leading transformation `h` and group elements.
    pub fn new<'a, I>(m: u32, h: &Transform, group: I) -> Self
    where
        I: IntoIterator<Item = &'a Transform>,
    {
        let mut series = ThetaSeries::default();
        series.rebuild(m, h, group);
        series
    }

    /// Replace weight and members.
    ///
    /// A weight whose exponent overflows `i32` saturates to `i32::MIN`;
    /// [`weight_exponent`] tells the caller in advance.
    pub fn rebuild<'a, I>(&mut self, m: u32, h: &Transform, group: I)
    where
        I: IntoIterator<Item = &'a Transform>,
    {
        self.m = m;
        self.exp = weight_exponent(m).unwrap_or(i32::MIN);
        self.members.clear();
        self.members.extend(group.into_iter().map(|g| Member {
            f: h.compose(g),
            c: g.c,
            d: g.d,
        }));
    }

    pub fn weight(&self) -> u32 {
        self.m
    }

    pub fn members_count(&self) -> usize {
        self.members.len()
    }

    /// θ(z). Zero for an empty series; m = 0 drops the weight factor.
    pub fn evaluate(&self, z: Complex64) -> Complex64 {
        let mut w = Complex64::new(0.0, 0.0);
        for member in &self.members {
            w += member.f.apply(z) * int_pow(member.c * z + member.d, self.exp);
        }
        w
    }

    pub fn map(&self, zs: &[Complex64]) -> Vec<Complex64> {
        zs.iter().map(|&z| self.evaluate(z)).collect()
    }

    /// Overwrite each point with θ at that point.
    pub fn transform_in_place(&self, zs: &mut [Complex64]) {
        for z in zs.iter_mut() {
            *z = self.evaluate(*z);
        }
    }
}

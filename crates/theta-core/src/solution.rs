// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Solution
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Automorphic solution built from two theta series over one group.
//!
//! Construction:
//! 1. Affine normalization z ↦ a·z + b with a = 1/(B−A), b = A/(A−B);
//!    the apex maps to ζ = a·C + b.
//! 2. Two upper-triangular generators T1, T2 from ζ and τ.
//! 3. Conjugation by P: S_k = normalize(P⁻¹ · T_k · P).
//! 4. Group generation to the requested depth, then dedup.
//! 5. θ1, θ2 over the same group with leading maps h1, h2.
//!
//! Evaluation f(z) = θ1(ζ_t)/θ2(ζ_t) − θ1(ζ_c)/θ2(ζ_c), where
//! ζ_c = P*(conj(z_L)), ζ_t = P*((z_L − τ·conj(z_L))/(1 − τ)), z_L = a·z + b
//! and P* is the adjugate of P.

use crate::theta_series::{weight_exponent, ThetaSeries};
use log::{debug, trace};
use num_complex::Complex64;
use theta_math::group::{generate_group, Generators};
use theta_math::mobius::Transform;
use theta_types::config::ProblemConfig;
use theta_types::constants::{DEFAULT_CHUNK_COUNT, DEFAULT_TOLERANCE};
use theta_types::error::{ThetaError, ThetaResult};
use theta_types::state::Triangle;

/// Everything needed to build a [`Solution`].
#[derive(Debug, Clone)]
pub struct SolutionConfig {
    pub tau: f64,
    pub triangle: Triangle,
    /// Base transformation P.
    pub base: Transform,
    pub depth: u32,
    pub weight: u32,
    /// Leading transformation of the numerator series.
    pub h1: Transform,
    /// Leading transformation of the denominator series.
    pub h2: Transform,
    /// Dedup tolerance on normalized coefficients.
    pub tolerance: f64,
}

impl SolutionConfig {
    /// Leading maps as set up by the command-line driver:
    /// h1(ζ) = 1/(ζ − p) with p = P*(a·z_s + b), h2 = identity.
    pub fn from_problem(problem: &ProblemConfig) -> Self {
        let base = Transform::from(problem.base_transform);
        let tr = &problem.triangle;
        let pole = base
            .invert()
            .apply((problem.singular_point - tr.a) / (tr.b - tr.a));
        let h1 = Transform::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            -pole,
        );
        SolutionConfig {
            tau: problem.tau,
            triangle: problem.triangle,
            base,
            depth: problem.depth,
            weight: problem.weight,
            h1,
            h2: Transform::identity(),
            tolerance: problem.tolerance,
        }
    }

    /// Identity base and leading maps with the default tolerance.
    pub fn with_identity_maps(tau: f64, triangle: Triangle, depth: u32, weight: u32) -> Self {
        SolutionConfig {
            tau,
            triangle,
            base: Transform::identity(),
            depth,
            weight,
            h1: Transform::identity(),
            h2: Transform::identity(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn validate(&self) -> ThetaResult<()> {
        if !self.tau.is_finite() || self.tau == 1.0 {
            return Err(ThetaError::Config(format!(
                "tau must be finite and != 1, got {}",
                self.tau
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ThetaError::Config(format!(
                "tolerance must be finite > 0, got {}",
                self.tolerance
            )));
        }
        if self.triangle.a == self.triangle.b {
            return Err(ThetaError::Config(
                "triangle vertices A and B must differ".to_string(),
            ));
        }
        if weight_exponent(self.weight).is_none() {
            return Err(ThetaError::Config(format!(
                "weight must be below 2^30, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

/// Upper-triangular generators (p, q; 0, 1) derived from the normalized
/// apex ζ and the modulus τ.
pub fn elliptic_generators(zeta: Complex64, tau: f64) -> (Transform, Transform) {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let zeta_c = zeta.conj();

    let a1 = (zeta - 1.0) / (zeta_c - 1.0);
    let b1 = Complex64::new(0.0, -2.0 * zeta.im) / (zeta_c - 1.0);
    let a2 = zeta / zeta_c;
    let b2 = zero;

    let t1 = Transform::new((a1 - tau) / (1.0 - tau), b1 / (1.0 - tau), zero, one);
    let t2 = Transform::new((a2 - tau) / (1.0 - tau), b2 / (1.0 - tau), zero, one);
    (t1, t2)
}

#[derive(Debug, Clone)]
pub struct Solution {
    a: Complex64,
    b: Complex64,
    zeta: Complex64,
    tau: f64,
    p: Transform,
    th1: ThetaSeries,
    th2: ThetaSeries,
}

impl Solution {
    pub fn new(config: &SolutionConfig) -> ThetaResult<Self> {
        let mut solution = Solution {
            a: Complex64::new(1.0, 0.0),
            b: Complex64::new(0.0, 0.0),
            zeta: Complex64::new(0.0, 0.0),
            tau: 0.0,
            p: Transform::identity(),
            th1: ThetaSeries::default(),
            th2: ThetaSeries::default(),
        };
        solution.rebuild(config)?;
        Ok(solution)
    }

    /// Rebuild every part in place. On a validation error `self` is unchanged.
    pub fn rebuild(&mut self, config: &SolutionConfig) -> ThetaResult<()> {
        config.validate()?;
        let tr = &config.triangle;

        self.a = 1.0 / (tr.b - tr.a);
        self.b = tr.a / (tr.a - tr.b);
        self.tau = config.tau;
        self.p = config.base;
        self.zeta = self.a * tr.c + self.b;

        let (t1, t2) = elliptic_generators(self.zeta, self.tau);
        let p_inv = self.p.invert_as_matrix();
        let s1 = (p_inv * t1 * self.p).normalize();
        let s2 = (p_inv * t2 * self.p).normalize();

        let group = generate_group(&Generators::new(s1, s2), config.depth, config.tolerance);

        self.th1.rebuild(config.weight, &config.h1, &group);
        self.th2.rebuild(config.weight, &config.h2, &group);

        debug!(
            "solution built: zeta={}, tau={}, depth={}, m={}, members={}",
            self.zeta,
            self.tau,
            config.depth,
            config.weight,
            self.members_count()
        );
        Ok(())
    }

    pub fn members_count(&self) -> usize {
        self.th1.members_count()
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Affine normalization coefficients (a, b).
    pub fn affine(&self) -> (Complex64, Complex64) {
        (self.a, self.b)
    }

    /// Normalized apex ζ = a·C + b.
    pub fn zeta(&self) -> Complex64 {
        self.zeta
    }

    pub fn numerator(&self) -> &ThetaSeries {
        &self.th1
    }

    pub fn denominator(&self) -> &ThetaSeries {
        &self.th2
    }

    /// (ζ_c, ζ_t) for a sample point.
    #[inline]
    fn twist(&self, p_adj: &Transform, z: Complex64) -> (Complex64, Complex64) {
        let z_l = self.a * z + self.b;
        let z_c = z_l.conj();
        let z_t = (z_l - self.tau * z_c) / (1.0 - self.tau);
        (p_adj.apply(z_c), p_adj.apply(z_t))
    }

    pub fn evaluate(&self, z: Complex64) -> Complex64 {
        let (zeta_c, zeta_t) = self.twist(&self.p.invert(), z);
        self.th1.evaluate(zeta_t) / self.th2.evaluate(zeta_t)
            - self.th1.evaluate(zeta_c) / self.th2.evaluate(zeta_c)
    }

    /// Sequential evaluation.
    pub fn map(&self, zs: &[Complex64]) -> Vec<Complex64> {
        zs.iter().map(|&z| self.evaluate(z)).collect()
    }

    /// Batched evaluation with the default chunking.
    pub fn parallel_map(&self, zs: &[Complex64]) -> Vec<Complex64> {
        let mut out = Vec::with_capacity(zs.len());
        self.evaluate_chunks(zs, DEFAULT_CHUNK_COUNT, &mut out);
        out
    }

    /// Batched evaluation over `chunks` contiguous chunks plus a remainder.
    pub fn parallel_map_with_chunks(
        &self,
        zs: &[Complex64],
        chunks: usize,
    ) -> ThetaResult<Vec<Complex64>> {
        if chunks == 0 {
            return Err(ThetaError::Config("chunk count must be >= 1".to_string()));
        }
        let mut out = Vec::with_capacity(zs.len());
        self.evaluate_chunks(zs, chunks, &mut out);
        Ok(out)
    }

    fn evaluate_chunks(&self, zs: &[Complex64], chunks: usize, out: &mut Vec<Complex64>) {
        // More chunks than points would only add empty slices.
        let chunks = chunks.min(zs.len()).max(1);
        let quot = zs.len() / chunks;
        let p_adj = self.p.invert();

        // Chunks run one after another; only the four series sweeps of a
        // chunk run concurrently.
        for i in 0..chunks {
            self.evaluate_chunk(&p_adj, &zs[i * quot..(i + 1) * quot], out);
        }
        self.evaluate_chunk(&p_adj, &zs[chunks * quot..], out);
    }

    fn evaluate_chunk(&self, p_adj: &Transform, chunk: &[Complex64], out: &mut Vec<Complex64>) {
        if chunk.is_empty() {
            return;
        }
        trace!("evaluating chunk of {} points", chunk.len());

        let (mut th1_c, mut th1_t): (Vec<Complex64>, Vec<Complex64>) =
            chunk.iter().map(|&z| self.twist(p_adj, z)).unzip();
        let mut th2_c = th1_c.clone();
        let mut th2_t = th1_t.clone();

        rayon::join(
            || {
                rayon::join(
                    || self.th1.transform_in_place(&mut th1_c),
                    || self.th2.transform_in_place(&mut th2_c),
                )
            },
            || {
                rayon::join(
                    || self.th1.transform_in_place(&mut th1_t),
                    || self.th2.transform_in_place(&mut th2_t),
                )
            },
        );

        out.extend(
            th1_t
                .iter()
                .zip(&th2_t)
                .zip(th1_c.iter().zip(&th2_c))
                .map(|((n_t, d_t), (n_c, d_c))| n_t / d_t - n_c / d_c),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_triangle() -> Triangle {
        Triangle::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.5, 0.5),
        )
    }

    fn sample_points(n: usize) -> Vec<Complex64> {
        (0..n)
            .map(|k| {
                let t = k as f64 / n.max(1) as f64;
                Complex64::new(0.1 + 0.8 * t, 0.05 + 0.3 * (1.0 - t))
            })
            .collect()
    }

    #[test]
    fn test_affine_normalization_maps_base_to_unit_interval() {
        let tr = Triangle::new(
            Complex64::new(1.0, 1.0),
            Complex64::new(3.0, 2.0),
            Complex64::new(2.0, 4.0),
        );
        let cfg = SolutionConfig::with_identity_maps(0.5, tr, 0, 1);
        let sol = Solution::new(&cfg).unwrap();
        let (a, b) = sol.affine();
        assert!((a * tr.a + b).norm() < 1e-14);
        assert!((a * tr.b + b - 1.0).norm() < 1e-14);
        assert!((sol.zeta() - (a * tr.c + b)).norm() < 1e-15);
    }

    #[test]
    fn test_elliptic_generators_closed_form() {
        let (t1, t2) = elliptic_generators(Complex64::new(0.5, 0.5), 0.5);
        assert!((t1.a - Complex64::new(-1.0, -2.0)).norm() < 1e-14);
        assert!((t1.b - Complex64::new(2.0, 2.0)).norm() < 1e-14);
        assert!((t2.a - Complex64::new(-1.0, 2.0)).norm() < 1e-14);
        assert_eq!(t2.b, Complex64::new(0.0, 0.0));
        for t in [t1, t2] {
            assert_eq!(t.c, Complex64::new(0.0, 0.0));
            assert_eq!(t.d, Complex64::new(1.0, 0.0));
        }
    }

    #[test]
    fn test_reference_scenario_depth_zero() {
        let cfg = SolutionConfig::with_identity_maps(0.5, reference_triangle(), 0, 1);
        let sol = Solution::new(&cfg).unwrap();
        assert_eq!(sol.members_count(), 5);
        assert_eq!(sol.denominator().members_count(), 5);
        let w = sol.evaluate(Complex64::new(0.3, 0.2));
        assert!(w.is_finite(), "f(z) = {w}");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = ProblemConfig::from_text("0.3 (0,0) (1,0) (0.4,0.6) (0.5,0.1) 2 1").unwrap();
        let sol = Solution::new(&SolutionConfig::from_problem(&problem)).unwrap();
        for n in [0usize, 1, 3, 4, 5, 17] {
            let zs = sample_points(n);
            let seq = sol.map(&zs);
            let par = sol.parallel_map(&zs);
            assert_eq!(par.len(), n);
            for (k, (s, p)) in seq.iter().zip(&par).enumerate() {
                assert!((s - p).norm() <= 1e-12 * (1.0 + s.norm()), "n={n}, k={k}: {s} vs {p}");
            }
        }
    }

    #[test]
    fn test_chunk_count_does_not_change_result() {
        let mut cfg = SolutionConfig::with_identity_maps(-0.4, reference_triangle(), 1, 2);
        cfg.h1 = Transform::from_real(0.0, 1.0, 1.0, -3.0);
        let sol = Solution::new(&cfg).unwrap();
        let zs = sample_points(11);
        let reference = sol.map(&zs);
        for chunks in [1usize, 2, 4, 7, 11, 20] {
            let out = sol.parallel_map_with_chunks(&zs, chunks).unwrap();
            assert_eq!(out.len(), zs.len());
            for (s, p) in reference.iter().zip(&out) {
                assert!((s - p).norm() <= 1e-12 * (1.0 + s.norm()));
            }
        }
    }

    #[test]
    fn test_more_chunks_than_points() {
        let cfg = SolutionConfig::with_identity_maps(0.5, reference_triangle(), 0, 1);
        let sol = Solution::new(&cfg).unwrap();
        let zs = sample_points(3);
        let reference = sol.map(&zs);
        for chunks in [4usize, 1 << 40, usize::MAX] {
            let out = sol.parallel_map_with_chunks(&zs, chunks).unwrap();
            assert_eq!(out.len(), zs.len());
            for (s, p) in reference.iter().zip(&out) {
                assert!((s - p).norm() <= 1e-12 * (1.0 + s.norm()), "chunks={chunks}");
            }
        }
        assert!(sol.parallel_map_with_chunks(&[], usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_zero_chunks_rejected() {
        let cfg = SolutionConfig::with_identity_maps(0.5, reference_triangle(), 0, 1);
        let sol = Solution::new(&cfg).unwrap();
        let err = sol.parallel_map_with_chunks(&sample_points(3), 0).unwrap_err();
        assert!(matches!(err, ThetaError::Config(_)));
    }

    #[test]
    fn test_invalid_tau_rejected_and_rebuild_keeps_state() {
        let cfg = SolutionConfig::with_identity_maps(0.5, reference_triangle(), 0, 1);
        let mut sol = Solution::new(&cfg).unwrap();

        let mut bad = cfg.clone();
        bad.tau = 1.0;
        assert!(matches!(Solution::new(&bad), Err(ThetaError::Config(_))));
        assert!(sol.rebuild(&bad).is_err());
        assert_eq!(sol.members_count(), 5);
        assert_eq!(sol.tau(), 0.5);

        let mut deeper = cfg.clone();
        deeper.depth = 1;
        sol.rebuild(&deeper).unwrap();
        assert!(sol.members_count() > 5);
    }

    #[test]
    fn test_validate_rejects_degenerate_config() {
        let cfg = SolutionConfig::with_identity_maps(0.5, reference_triangle(), 0, 1);
        cfg.validate().unwrap();

        let mut bad = cfg.clone();
        bad.tolerance = 0.0;
        assert!(matches!(bad.validate(), Err(ThetaError::Config(_))));

        let mut bad = cfg.clone();
        bad.triangle.b = bad.triangle.a;
        assert!(matches!(bad.validate(), Err(ThetaError::Config(_))));

        let mut bad = cfg.clone();
        bad.weight = 1 << 30;
        assert!(matches!(Solution::new(&bad), Err(ThetaError::Config(_))));
    }

    #[test]
    fn test_from_problem_leading_maps() {
        let problem = ProblemConfig::from_text("0.5 (0,0) (2,0) (1,1) (1,0.5) 0 1").unwrap();
        let cfg = SolutionConfig::from_problem(&problem);
        assert_eq!(cfg.h2, Transform::identity());
        // h1 has its pole at P*((z_s - A)/(B - A)).
        let pole = cfg.base.invert().apply(Complex64::new(0.5, 0.25));
        assert!((cfg.h1.c * pole + cfg.h1.d).norm() < 1e-14);
        assert_eq!(cfg.base, Transform::from(problem.base_transform));
    }
}

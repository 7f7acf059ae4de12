// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Property-Based Tests (proptest) for theta-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for theta-types using proptest.
//!
//! Covers: Mesh construction invariants, mesh text parsing.

use proptest::prelude::*;
use theta_types::config::MeshConfig;
use theta_types::state::Mesh;

// ── Mesh Construction Invariants ─────────────────────────────────────

proptest! {
    /// Point count is the product of the axis counts.
    #[test]
    fn mesh_point_count(
        nx in 0usize..40,
        ny in 0usize..40,
    ) {
        let mesh = Mesh::new(-1.0, 1.0, nx, 0.0, 2.0, ny);
        prop_assert_eq!(mesh.len(), nx * ny);
        prop_assert_eq!(mesh.points().len(), nx * ny);
    }

    /// Mesh corners hit the requested bounds.
    #[test]
    fn mesh_corner_values(
        nx in 2usize..32,
        ny in 2usize..32,
        x_min in -5.0f64..0.0,
        y_min in -5.0f64..0.0,
    ) {
        let x_max = x_min + 3.0;
        let y_max = y_min + 2.0;
        let mesh = Mesh::new(x_min, x_max, nx, y_min, y_max, ny);
        let pts = mesh.points();

        prop_assert!((pts[0].re - x_min).abs() < 1e-12);
        prop_assert!((pts[0].im - y_min).abs() < 1e-12);
        let last = pts[pts.len() - 1];
        prop_assert!((last.re - x_max).abs() < 1e-12);
        prop_assert!((last.im - y_max).abs() < 1e-12);
    }

    /// Points are x-major: consecutive points share x within a row of ny.
    #[test]
    fn mesh_is_x_major(nx in 1usize..16, ny in 1usize..16) {
        let mesh = Mesh::new(0.0, 1.0, nx, 0.0, 1.0, ny);
        let pts = mesh.points();
        for (k, p) in pts.iter().enumerate() {
            prop_assert_eq!(p.re, mesh.x[k / ny]);
            prop_assert_eq!(p.im, mesh.y[k % ny]);
        }
    }
}

// ── Mesh Text Parsing ────────────────────────────────────────────────

proptest! {
    /// Formatting then parsing the text layout recovers the counts.
    #[test]
    fn mesh_text_counts(nx in 1usize..500, ny in 1usize..500) {
        let text = format!("0.0 1.0 {nx}\n-0.5 0.5 {ny}\n");
        let cfg = MeshConfig::from_text(&text).unwrap();
        prop_assert_eq!(cfg.x_count, nx);
        prop_assert_eq!(cfg.y_count, ny);
        prop_assert!(cfg.validate().is_ok());
    }
}

// ─────────────────────────────────────────────────────────────────────
// Theta Solver — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Triangle whose vertices define the boundary value problem.
/// A and B are mapped to 0 and 1 by the affine normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    #[serde(rename = "A")]
    pub a: Complex64,
    #[serde(rename = "B")]
    pub b: Complex64,
    #[serde(rename = "C")]
    pub c: Complex64,
}

impl Triangle {
    pub fn new(a: Complex64, b: Complex64, c: Complex64) -> Self {
        Triangle { a, b, c }
    }
}

/// Rectangular sample mesh in the complex plane.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub x: Array1<f64>, // linspace(x_min, x_max, x_count)
    pub y: Array1<f64>, // linspace(y_min, y_max, y_count)
}

impl Mesh {
    /// A count of 1 yields only the lower bound on that axis.
    pub fn new(
        x_min: f64,
        x_max: f64,
        x_count: usize,
        y_min: f64,
        y_max: f64,
        y_count: usize,
    ) -> Self {
        Mesh {
            x: Array1::linspace(x_min, x_max, x_count),
            y: Array1::linspace(y_min, y_max, y_count),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len() * self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened sample points, x-major: for each x, every y in order.
    pub fn points(&self) -> Vec<Complex64> {
        let mut points = Vec::with_capacity(self.len());
        for &x in self.x.iter() {
            for &y in self.y.iter() {
                points.push(Complex64::new(x, y));
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_x_major_order() {
        let mesh = Mesh::new(0.0, 1.0, 2, 0.0, 2.0, 3);
        let pts = mesh.points();
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Complex64::new(0.0, 0.0));
        assert_eq!(pts[1], Complex64::new(0.0, 1.0));
        assert_eq!(pts[2], Complex64::new(0.0, 2.0));
        assert_eq!(pts[3], Complex64::new(1.0, 0.0));
        assert_eq!(pts[5], Complex64::new(1.0, 2.0));
    }

    #[test]
    fn test_mesh_single_count_uses_lower_bound() {
        let mesh = Mesh::new(0.25, 0.75, 1, -1.0, 1.0, 1);
        let pts = mesh.points();
        assert_eq!(pts, vec![Complex64::new(0.25, -1.0)]);
    }

    #[test]
    fn test_mesh_zero_count_is_empty() {
        let mesh = Mesh::new(0.0, 1.0, 0, 0.0, 1.0, 5);
        assert!(mesh.is_empty());
        assert!(mesh.points().is_empty());
    }
}

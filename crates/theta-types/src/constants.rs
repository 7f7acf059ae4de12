// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use num_complex::Complex64;

/// Default dedup tolerance on the normalized-coefficient distance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Number of contiguous chunks used by the batched evaluator
/// (a remainder chunk covers the tail).
pub const DEFAULT_CHUNK_COUNT: usize = 4;

/// Default problem file name when none is given on the command line.
pub const DEFAULT_PROBLEM_FILE: &str = "args.txt";

/// Default mesh file name when none is given on the command line.
pub const DEFAULT_MESH_FILE: &str = "mesh.txt";

/// Default base transformation P = (2+7i, 9; 6i, 11).
pub const DEFAULT_BASE_TRANSFORM: [Complex64; 4] = [
    Complex64::new(2.0, 7.0),
    Complex64::new(9.0, 0.0),
    Complex64::new(0.0, 6.0),
    Complex64::new(11.0, 0.0),
];

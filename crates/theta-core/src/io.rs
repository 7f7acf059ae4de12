// ─────────────────────────────────────────────────────────────────────
// Theta Solver — IO
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Raw binary dumps of complex sequences.
//!
//! Each record is one `Complex64` (re, im) in native endianness; the file has
//! no header and no length prefix.

use num_complex::Complex64;
use std::path::{Path, PathBuf};
use theta_types::error::{ThetaError, ThetaResult};

const RECORD_BYTES: usize = std::mem::size_of::<Complex64>();

pub fn write_complex_dump(path: impl AsRef<Path>, values: &[Complex64]) -> ThetaResult<()> {
    std::fs::write(path, bytemuck::cast_slice::<Complex64, u8>(values))?;
    Ok(())
}

pub fn read_complex_dump(path: impl AsRef<Path>) -> ThetaResult<Vec<Complex64>> {
    let bytes = std::fs::read(path)?;
    if bytes.len() % RECORD_BYTES != 0 {
        return Err(ThetaError::Parse(format!(
            "dump length {} is not a multiple of {RECORD_BYTES}",
            bytes.len()
        )));
    }
    let mut values = vec![Complex64::new(0.0, 0.0); bytes.len() / RECORD_BYTES];
    bytemuck::cast_slice_mut::<Complex64, u8>(&mut values).copy_from_slice(&bytes);
    Ok(values)
}

/// Output file names `mesh[<mesh>].dat` and `values[<problem>][<mesh>].dat`
/// inside `out_dir`, keyed by the input file names.
pub fn output_paths(out_dir: &Path, problem: &Path, mesh: &Path) -> (PathBuf, PathBuf) {
    let name = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| p.display().to_string())
    };
    let (problem, mesh) = (name(problem), name(mesh));
    (
        out_dir.join(format!("mesh[{mesh}].dat")),
        out_dir.join(format!("values[{problem}][{mesh}].dat")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(stem: &str) -> PathBuf {
        let epoch_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "theta_{stem}_{}_{}.dat",
            std::process::id(),
            epoch_ns
        ))
    }

    #[test]
    fn test_dump_layout_is_raw_pairs() {
        let values = vec![Complex64::new(1.5, -2.0), Complex64::new(0.0, 3.25)];
        let path = temp_path("layout");
        write_complex_dump(&path, &values).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 2 * RECORD_BYTES);
        assert_eq!(&bytes[0..8], &1.5f64.to_ne_bytes());
        assert_eq!(&bytes[8..16], &(-2.0f64).to_ne_bytes());
        assert_eq!(&bytes[24..32], &3.25f64.to_ne_bytes());

        let back = read_complex_dump(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back, values);
    }

    #[test]
    fn test_empty_dump() {
        let path = temp_path("empty");
        write_complex_dump(&path, &[]).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
        assert!(read_complex_dump(&path).unwrap().is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_truncated_dump_rejected() {
        let path = temp_path("truncated");
        std::fs::write(&path, [0u8; 20]).unwrap();
        let err = read_complex_dump(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ThetaError::Parse(_)));
    }

    #[test]
    fn test_output_paths_use_file_names() {
        let (mesh, values) = output_paths(
            Path::new("out"),
            Path::new("inputs/args.txt"),
            Path::new("inputs/mesh.txt"),
        );
        assert_eq!(mesh, Path::new("out").join("mesh[mesh.txt].dat"));
        assert_eq!(values, Path::new("out").join("values[args.txt][mesh.txt].dat"));
    }
}

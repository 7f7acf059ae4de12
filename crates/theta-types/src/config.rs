// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Problem and mesh configuration.
//!
//! Both files are accepted either as JSON (`.json` extension) or as the
//! whitespace-separated text layout of the legacy `args.txt` / `mesh.txt`
//! inputs. Complex numbers in text form are written `(re,im)` or as a bare
//! real number.

use crate::constants::{DEFAULT_BASE_TRANSFORM, DEFAULT_TOLERANCE};
use crate::error::{ThetaError, ThetaResult};
use crate::state::{Mesh, Triangle};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// Problem parameters.
/// Text layout: `tau A B C z_singular depth weight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemConfig {
    /// Modulus of the conjugate twist. Must not equal 1.
    pub tau: f64,
    pub triangle: Triangle,
    /// Point mapped to infinity by the first leading transformation.
    pub singular_point: Complex64,
    /// Number of generations grown after generation 0.
    pub depth: u32,
    /// Theta series weight m; each term is scaled by (cz+d)^(-2m).
    pub weight: u32,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Coefficients (a, b, c, d) of the base transformation P.
    #[serde(default = "default_base_transform")]
    pub base_transform: [Complex64; 4],
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
fn default_base_transform() -> [Complex64; 4] {
    DEFAULT_BASE_TRANSFORM
}

impl ProblemConfig {
    /// Load from JSON (by extension) or legacy text.
    pub fn from_file(path: impl AsRef<Path>) -> ThetaResult<Self> {
        let path = path.as_ref();
        let contents = read_input(path)?;
        let config = if is_json(path) {
            serde_json::from_str(&contents)?
        } else {
            Self::from_text(&contents)?
        };
        Ok(config)
    }

    pub fn from_text(text: &str) -> ThetaResult<Self> {
        let mut tokens = Tokens::new(text);
        let tau = tokens.real("tau")?;
        let a = tokens.complex("A")?;
        let b = tokens.complex("B")?;
        let c = tokens.complex("C")?;
        let singular_point = tokens.complex("z_singular")?;
        let depth = tokens.u32("depth")?;
        let weight = tokens.u32("weight")?;
        Ok(ProblemConfig {
            tau,
            triangle: Triangle::new(a, b, c),
            singular_point,
            depth,
            weight,
            tolerance: DEFAULT_TOLERANCE,
            base_transform: DEFAULT_BASE_TRANSFORM,
        })
    }

    /// File-level checks: every value finite and P invertible. Constraints
    /// of the construction itself are checked when the solution is built.
    pub fn validate(&self) -> ThetaResult<()> {
        if !self.tau.is_finite() {
            return Err(ThetaError::Config(format!(
                "tau must be finite, got {}",
                self.tau
            )));
        }
        let tr = &self.triangle;
        let points = [
            ("A", tr.a),
            ("B", tr.b),
            ("C", tr.c),
            ("z_singular", self.singular_point),
        ];
        if let Some((name, z)) = points.iter().find(|(_, z)| !z.is_finite()) {
            return Err(ThetaError::Config(format!(
                "{name} must be finite, got {z}"
            )));
        }
        let [a, b, c, d] = self.base_transform;
        let det = a * d - b * c;
        if !det.is_finite() || det == Complex64::new(0.0, 0.0) {
            return Err(ThetaError::Config(format!(
                "base transform must be finite and non-singular, got {:?}",
                self.base_transform
            )));
        }
        Ok(())
    }
}

/// Mesh bounds.
/// Text layout: `x_min x_max x_count y_min y_max y_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub x_count: usize,
    pub y_min: f64,
    pub y_max: f64,
    pub y_count: usize,
}

impl MeshConfig {
    pub fn from_file(path: impl AsRef<Path>) -> ThetaResult<Self> {
        let path = path.as_ref();
        let contents = read_input(path)?;
        let config = if is_json(path) {
            serde_json::from_str(&contents)?
        } else {
            Self::from_text(&contents)?
        };
        Ok(config)
    }

    pub fn from_text(text: &str) -> ThetaResult<Self> {
        let mut tokens = Tokens::new(text);
        Ok(MeshConfig {
            x_min: tokens.real("x_min")?,
            x_max: tokens.real("x_max")?,
            x_count: tokens.count("x_count")?,
            y_min: tokens.real("y_min")?,
            y_max: tokens.real("y_max")?,
            y_count: tokens.count("y_count")?,
        })
    }

    pub fn validate(&self) -> ThetaResult<()> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(ThetaError::Config(format!(
                "mesh bounds must be finite, got {bounds:?}"
            )));
        }
        Ok(())
    }

    pub fn create_mesh(&self) -> Mesh {
        Mesh::new(
            self.x_min,
            self.x_max,
            self.x_count,
            self.y_min,
            self.y_max,
            self.y_count,
        )
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn read_input(path: &Path) -> ThetaResult<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ThetaError::MissingInput {
            path: path.display().to_string(),
        },
        _ => ThetaError::Io(e),
    })
}

/// Whitespace tokenizer that keeps a parenthesized `(re, im)` group together.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens { rest: text }
    }

    fn next_token(&mut self, name: &str) -> ThetaResult<&'a str> {
        let s = self.rest.trim_start();
        if s.is_empty() {
            return Err(ThetaError::Parse(format!("missing value for {name}")));
        }
        let end = if s.starts_with('(') {
            match s.find(')') {
                Some(i) => i + 1,
                None => {
                    return Err(ThetaError::Parse(format!(
                        "unterminated complex value for {name}"
                    )))
                }
            }
        } else {
            s.find(char::is_whitespace).unwrap_or(s.len())
        };
        let (token, rest) = s.split_at(end);
        self.rest = rest;
        Ok(token)
    }

    fn real(&mut self, name: &str) -> ThetaResult<f64> {
        let token = self.next_token(name)?;
        parse_real(token, name)
    }

    fn count(&mut self, name: &str) -> ThetaResult<usize> {
        let token = self.next_token(name)?;
        token
            .parse::<usize>()
            .map_err(|e| ThetaError::Parse(format!("{name}: '{token}' is not a count: {e}")))
    }

    fn u32(&mut self, name: &str) -> ThetaResult<u32> {
        let token = self.next_token(name)?;
        token
            .parse::<u32>()
            .map_err(|e| ThetaError::Parse(format!("{name}: '{token}' is not a u32: {e}")))
    }

    fn complex(&mut self, name: &str) -> ThetaResult<Complex64> {
        let token = self.next_token(name)?;
        let Some(inner) = token.strip_prefix('(') else {
            return Ok(Complex64::new(parse_real(token, name)?, 0.0));
        };
        let inner = inner.trim_end_matches(')');
        match inner.split_once(',') {
            Some((re, im)) => Ok(Complex64::new(
                parse_real(re.trim(), name)?,
                parse_real(im.trim(), name)?,
            )),
            None => Ok(Complex64::new(parse_real(inner.trim(), name)?, 0.0)),
        }
    }
}

fn parse_real(token: &str, name: &str) -> ThetaResult<f64> {
    token
        .parse::<f64>()
        .map_err(|e| ThetaError::Parse(format!("{name}: '{token}' is not a number: {e}")))
}

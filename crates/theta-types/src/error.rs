// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThetaError {
    #[error("File '{path}' not found")]
    MissingInput { path: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("The collections must be the same length: left={left}, right={right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Non-finite value at index {index}")]
    NonFinite { index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ThetaResult<T> = Result<T, ThetaError>;

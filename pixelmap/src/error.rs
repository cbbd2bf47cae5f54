use thiserror::Error;

use crate::model::Dart;

#[derive(Debug, Error)]
pub enum GmapError {
    #[error("dart {dart} out of range (map has {n_darts} darts)")]
    DartOutOfRange { dart: Dart, n_darts: usize },
    #[error("dart {0} has been removed")]
    RemovedDart(Dart),
    #[error("pixel ({row}, {col}) out of range")]
    PixelOutOfRange { row: usize, col: usize },
    #[error("involution index {0} must be 0, 1 or 2")]
    InvalidInvolution(usize),
    #[error("{0}-cells cannot be removed")]
    UnsupportedDimension(usize),
    #[error("negative weight {weight} at dart {dart}")]
    NegativeWeight { dart: Dart, weight: i64 },
    #[error("unsupported accumulation direction: {0}")]
    UnsupportedAccumulation(String),
    #[error("grid shape {rows}x{cols} has no pixels")]
    EmptyShape { rows: usize, cols: usize },
    #[error("grid needs {n_darts} darts, above the supported maximum")]
    TooLarge { n_darts: usize },
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("stride must be at least 1")]
    InvalidStride,
    #[error("stride {stride} expands a {rows}x{cols} image past the supported size")]
    StrideTooLarge { stride: usize, rows: usize, cols: usize },
    #[error("reduction factor {0} outside [0, 1]")]
    InvalidReductionFactor(f64),
    #[error("{dim}-cell at dart {dart} is not removable")]
    NotRemovable { dim: usize, dart: Dart },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid map document: {0}")]
    Format(String),
}

impl GmapError {
    /// Stable machine-readable code, used by the wasm bindings.
    pub fn code(&self) -> &'static str {
        match self {
            GmapError::DartOutOfRange { .. } | GmapError::PixelOutOfRange { .. } => "out_of_range",
            GmapError::RemovedDart(_) => "removed_dart",
            GmapError::InvalidInvolution(_) | GmapError::UnsupportedDimension(_) => "invalid_dimension",
            GmapError::NegativeWeight { .. } => "negative_weight",
            GmapError::UnsupportedAccumulation(_) => "invalid_accumulation",
            GmapError::EmptyShape { .. } | GmapError::TooLarge { .. } => "invalid_shape",
            GmapError::SizeMismatch { .. } => "size_mismatch",
            GmapError::InvalidStride | GmapError::StrideTooLarge { .. } => "invalid_stride",
            GmapError::InvalidReductionFactor(_) => "invalid_reduction_factor",
            GmapError::NotRemovable { .. } => "not_removable",
            GmapError::Json(_) | GmapError::Format(_) => "invalid_document",
        }
    }

    /// Failed removability predicate; bulk reductions skip these.
    pub fn is_structural(&self) -> bool {
        matches!(self, GmapError::NotRemovable { .. })
    }
}

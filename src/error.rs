use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    #[error("{stage} failed after {iterations} iterations")]
    Convergence {
        stage: &'static str,
        iterations: usize,
    },

    #[error("Invalid shape: {0}")]
    Shape(String),
}

/// A batch conversion failure, reported against the first failing input.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("point {index}: {source}")]
pub struct BatchError {
    /// Index of the lowest failing input point.
    pub index: usize,
    #[source]
    pub source: ConvertError,
}

impl BatchError {
    pub fn new(index: usize, source: ConvertError) -> Self {
        Self { index, source }
    }
}

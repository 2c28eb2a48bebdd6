//! Error types for projection and resampling.

use thiserror::Error;

/// Error type for grid operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Invalid projector or engine configuration (axis choice, target shape).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Invalid argument value (matrix length, non-finite coefficient).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Grid dimensionality the operation does not handle.
    #[error("unsupported dimensionality: {0}D (expected 2D or 3D)")]
    UnsupportedDimensionality(usize),

    /// Element type the operation is undefined for.
    #[error("{op} is undefined for {kind} samples")]
    UnsupportedElementType {
        /// Element type description
        kind: String,
        /// Operation name
        op: String,
    },

    /// The operation could not be carried out.
    #[error("could not {op}: {reason}")]
    ProcessingFailure {
        /// Operation name
        op: String,
        /// Diagnostic message
        reason: String,
    },

    /// Error from the grid data model.
    #[error(transparent)]
    Core(#[from] ndimg_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::Configuration`] error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates an [`OpsError::InvalidArgument`] error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an [`OpsError::ProcessingFailure`] error.
    pub fn processing_failure(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProcessingFailure {
            op: op.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the caller supplied a bad configuration or argument.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::InvalidArgument(_)
                | Self::UnsupportedDimensionality(_)
                | Self::UnsupportedElementType { .. }
        )
    }
}

/// Result type for grid operations.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            OpsError::UnsupportedDimensionality(4).to_string(),
            "unsupported dimensionality: 4D (expected 2D or 3D)"
        );
        let err = OpsError::processing_failure("affine transform", "singular matrix");
        assert_eq!(err.to_string(), "could not affine transform: singular matrix");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_core_conversion() {
        let err: OpsError = ndimg_core::Error::DuplicateAxis(2).into();
        assert!(matches!(err, OpsError::Core(_)));
        assert_eq!(err.to_string(), "axis 2 requested twice");
    }
}

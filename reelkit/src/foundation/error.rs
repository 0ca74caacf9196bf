/// Convenience result type used across reelkit.
pub type ReelkitResult<T> = Result<T, ReelkitError>;

/// Top-level error taxonomy used by boundary APIs.
///
/// Pure frame computations never return these; they clamp or saturate instead.
#[derive(thiserror::Error, Debug)]
pub enum ReelkitError {
    /// Invalid user-provided props or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating scene state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The external renderer failed to produce output.
    #[error("render backend error: {0}")]
    Backend(String),

    /// A referenced media path could not be resolved by the backend.
    #[error("asset error: {0}")]
    Asset(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelkitError {
    /// Build a [`ReelkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelkitError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelkitError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`ReelkitError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

impl From<serde_json::Error> for ReelkitError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

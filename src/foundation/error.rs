/// Convenience result type used across qrylic.
pub type QrylicResult<T> = Result<T, QrylicError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// `Config` fails an invocation before any stage runs; `Stage` and `Fetch` are
/// recoverable inside the pipeline, where the failing stage degrades to a
/// pass-through of its input buffer.
#[derive(thiserror::Error, Debug)]
pub enum QrylicError {
    /// Invalid user-provided configuration or input geometry.
    #[error("configuration error: {0}")]
    Config(String),

    /// Recoverable failure inside a single pipeline stage.
    #[error("stage failure: {0}")]
    Stage(String),

    /// Logo or asset retrieval failure (network, filesystem, size cap).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QrylicError {
    /// Build a [`QrylicError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`QrylicError::Stage`] value.
    pub fn stage(msg: impl Into<String>) -> Self {
        Self::Stage(msg.into())
    }

    /// Build a [`QrylicError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result type used across svgvidgen.
pub type SvgvidgenResult<T> = Result<T, SvgvidgenError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SvgvidgenError {
    /// Invalid user-provided data (render parameters, element ids, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// The durable key-value store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Malformed HTTP traffic on the render service socket.
    #[error("http error: {0}")]
    Http(String),

    /// Invalid pipeline run transitions or failed backend work.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgvidgenError {
    /// Build a [`SvgvidgenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SvgvidgenError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`SvgvidgenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`SvgvidgenError::Http`] value.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Build a [`SvgvidgenError::Pipeline`] value.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

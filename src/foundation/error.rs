/// Convenience result type used across sillage.
pub type SillageResult<T> = Result<T, SillageError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum SillageError {
    /// Invalid effect, range map, spring or scene configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while registering or sampling host signal channels.
    #[error("signal error: {0}")]
    Signal(String),

    /// Errors while binding values to render nodes.
    #[error("binding error: {0}")]
    Binding(String),

    /// Errors reported by an external backend collaborator.
    #[error("backend error: {0}")]
    Backend(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SillageError {
    /// Build a [`SillageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SillageError::Signal`] value.
    pub fn signal(msg: impl Into<String>) -> Self {
        Self::Signal(msg.into())
    }

    /// Build a [`SillageError::Binding`] value.
    pub fn binding(msg: impl Into<String>) -> Self {
        Self::Binding(msg.into())
    }

    /// Build a [`SillageError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`SillageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SillageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

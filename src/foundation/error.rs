/// Convenience result type used across Nottie.
pub type NottieResult<T> = Result<T, NottieError>;

/// Top-level error taxonomy used by the toolchain APIs.
#[derive(thiserror::Error, Debug)]
pub enum NottieError {
    /// Markup could not be ingested: no root `<svg>` element, malformed XML,
    /// or malformed path data.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid user-provided state data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid keyframe timeline.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NottieError {
    /// Build a [`NottieError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`NottieError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NottieError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`NottieError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for NottieError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

/// Convenience result type used across the crate.
pub type PaleoResult<T> = Result<T, PaleoError>;

/// Shown when the silhouette image could not be fetched or decoded.
pub const FETCH_USER_MESSAGE: &str =
    "The image server is not responding correctly. Try another species.";

/// Shown when the pixel buffer could not be read back after drawing the silhouette.
pub const MASK_USER_MESSAGE: &str = "Browser security prevented processing this image.";

/// Top-level error taxonomy.
#[derive(thiserror::Error, Debug)]
pub enum PaleoError {
    /// The source image could not be retrieved or decoded.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The surface pixels could not be read back for masking.
    #[error("mask processing error: {0}")]
    MaskProcessing(String),

    /// Invalid configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaleoError {
    /// Build a [`PaleoError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`PaleoError::MaskProcessing`] value.
    pub fn mask_processing(msg: impl Into<String>) -> Self {
        Self::MaskProcessing(msg.into())
    }

    /// Build a [`PaleoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PaleoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Fixed text a player sees when a load ends in this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MaskProcessing(_) => MASK_USER_MESSAGE,
            _ => FETCH_USER_MESSAGE,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

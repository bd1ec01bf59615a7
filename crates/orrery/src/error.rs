//! Error types for scene construction and asset handling.

use thiserror::Error;

/// Result type for fallible orrery operations.
pub type Result<T> = std::result::Result<T, OrreryError>;

/// Errors that can occur while building or feeding a scene.
///
/// Only construction is fallible. The per-frame path (`tick`, `advance`,
/// transform composition, draw-list building) never returns an error.
#[derive(Error, Debug)]
pub enum OrreryError {
    /// The rasterizer context is unavailable, or the scene was driven before init. Fatal.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A texture failed to decode. The texture keeps its placeholder color.
    #[error("texture '{texture}' failed to load: {reason}")]
    AssetLoad { texture: String, reason: String },

    /// Degenerate generator or configuration arguments.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl OrreryError {
    /// Build an `InvalidParameter` error and log it at error level.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::error!("rejected parameter: {}", msg);
        OrreryError::InvalidParameter(msg)
    }

    /// Whether the render loop can keep going after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, OrreryError::AssetLoad { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_asset_failures_are_recoverable() {
        let asset = OrreryError::AssetLoad {
            texture: "sun".into(),
            reason: "404".into(),
        };
        assert!(asset.is_recoverable());
        assert!(!OrreryError::Initialization("no context".into()).is_recoverable());
        assert!(!OrreryError::invalid("bands = 0").is_recoverable());
    }

    #[test]
    fn messages_name_the_texture() {
        let err = OrreryError::AssetLoad {
            texture: "earth".into(),
            reason: "decode error".into(),
        };
        assert_eq!(err.to_string(), "texture 'earth' failed to load: decode error");
    }

    #[test]
    fn json_errors_convert() {
        let err: OrreryError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, OrreryError::Config(_)));
    }
}

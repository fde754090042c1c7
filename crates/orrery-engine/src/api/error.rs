/// Errors raised while applying a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but carries an out-of-range value.
    #[error("invalid config: {0}")]
    Invalid(String),

    /// Configuration arrived after the scene was built.
    #[error("config must be applied before the scene is initialized")]
    AlreadyInitialized,
}

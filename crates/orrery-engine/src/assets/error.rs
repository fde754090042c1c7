/// Errors raised while loading assets supplied by the host.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A malformed line in an OBJ document (1-based line number).
    #[error("obj line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A face references a vertex or normal that does not exist.
    #[error("obj line {line}: index {index} out of range")]
    IndexOutOfRange { line: usize, index: i64 },

    /// The document contained no faces.
    #[error("obj contains no faces")]
    Empty,

    /// The asset manifest is not valid JSON for the expected shape.
    #[error("failed to parse manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// A mesh was supplied that the game never asked for.
    #[error("unknown mesh: {0}")]
    UnknownMesh(String),
}

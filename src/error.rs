use thiserror::Error;

/// Errors raised when an input batch fails basic shape requirements.
///
/// These are the only conditions rejected before any pipeline stage runs;
/// everything else degrades into findings and repair attempts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("node at position {position} has an empty id")]
    MissingId { position: usize },

    #[error("node '{node_id}' has an empty title")]
    MissingTitle { node_id: String },

    #[error("duplicate node id '{0}'")]
    DuplicateId(String),
}

/// Errors raised while converting a custom caller format into a draft node
/// sequence via [`crate::graph::IntoSymbolicFlow`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("invalid flow input: {0}")]
    ValidationError(String),

    #[error("node '{node_id}' has an unknown kind '{kind}'")]
    UnknownKind { node_id: String, kind: String },
}

/// Errors raised while persisting or loading a converged graph artifact.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("artifact error: {0}")]
    Generic(String),
}

/// Umbrella error for the two fallible engine boundaries. The pipeline
/// itself never fails: structural problems come back as findings.
#[derive(Error, Debug, Clone)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

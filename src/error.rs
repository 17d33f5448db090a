use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifyError {
    #[error("sign in required to perform this action")]
    AuthRequired,

    #[error("not authenticated: {0}")]
    Unauthenticated(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("artwork '{0}' not found")]
    NotFound(String),

    #[error("an operation on artwork '{0}' is already in progress")]
    OperationInProgress(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl ArtifyError {
    /// Whether a manual retry of the same request could reasonably succeed.
    ///
    /// Nothing in the crate retries on its own; this only feeds the
    /// "try again" hint shown next to failure notifications.
    pub fn is_retryable(&self) -> bool {
        match self {
            ArtifyError::Network(_) => true,
            ArtifyError::Remote { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArtifyError>;

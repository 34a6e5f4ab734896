use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Not signed in: {0}")]
    NotSignedIn(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Result unavailable for transaction {hash}")]
    ResultUnavailable { hash: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("RPC error {code} ({name}): {message}")]
    Rpc {
        code: i64,
        name: String,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl GatewayError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn not_signed_in(msg: impl Into<String>) -> Self {
        Self::NotSignedIn(msg.into())
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    pub fn result_unavailable(hash: impl Into<String>) -> Self {
        Self::ResultUnavailable { hash: hash.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_not_signed_in(&self) -> bool {
        matches!(self, Self::NotSignedIn(_))
    }

    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission(_))
    }

    pub fn is_result_unavailable(&self) -> bool {
        matches!(self, Self::ResultUnavailable { .. })
    }
}

// conversion from dialoguer::Error
impl From<dialoguer::Error> for GatewayError {
    fn from(err: dialoguer::Error) -> Self {
        GatewayError::Dialog(err.to_string())
    }
}

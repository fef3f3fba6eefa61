use thiserror::Error;

/// Errors returned by gateway operations.
#[derive(Debug, Error)]
pub enum EcpayError {
    #[error("option \"{0}\" is required")]
    MissingCredential(&'static str),

    #[error("param \"{0}\" is required")]
    MissingParameter(String),

    #[error("invalid environment '{0}': expected test or production")]
    InvalidEnvironment(String),

    #[error("invalid digest algorithm '{0}': expected md5 or sha256")]
    InvalidDigestAlgorithm(String),

    #[error("invalid logistics sub type: {0}")]
    InvalidLogisticSubType(String),

    #[error("response CheckMacValue does not match")]
    ChecksumMismatch,

    /// An operation was resolved against a registry that does not know it.
    #[error("operation {operation} is not part of the {family} endpoint table")]
    UnknownOperation {
        operation: &'static str,
        family: &'static str,
    },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("http error: {0}")]
    HttpError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Auth server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("hasSubscription is {has_subscription} but subscription present is {subscription_present}")]
    InconsistentSubscription {
        has_subscription: bool,
        subscription_present: bool,
    },

    #[error("errorType given without an error message")]
    ErrorTypeWithoutError,
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("webhook error: {0}")]
    Webhook(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    pub fn webhook_error(msg: impl Into<String>) -> Self {
        RelayError::Webhook(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        RelayError::Config(msg.into())
    }
}

pub type RelayResult<T> = Result<T, RelayError>;

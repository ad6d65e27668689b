use thiserror::Error;

/// Failure taxonomy for outbound API calls: transport, server-reported,
/// or undecodable body. Callers map these to fixed user-facing strings;
/// the detail here is for the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {detail}")]
    Server { status: u16, detail: String },
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("invalid API url {url}: {message}")]
    Url { url: String, message: String },
}

impl ApiError {
    /// Non-2xx responses carry their HTTP status.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

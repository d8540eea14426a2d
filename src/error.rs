use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("invalid option format: {0} (expected key=value)")]
    InvalidOptionFormat(String),

    #[error("missing credential: {0} is required")]
    MissingCredential(&'static str),

    #[error("target url is required")]
    MissingTargetUrl,

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl CaptureError {
    /// True for failures detected before any request leaves the process.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CaptureError::InvalidOptionFormat(_)
                | CaptureError::MissingCredential(_)
                | CaptureError::MissingTargetUrl
                | CaptureError::Configuration(_)
        )
    }

    /// Process exit status used by the CLI.
    ///
    /// Usage and configuration problems exit with 2, everything that went
    /// wrong talking to the service or writing output exits with 1.
    pub fn exit_code(&self) -> i32 {
        if self.is_client_error() {
            2
        } else {
            1
        }
    }
}

impl From<reqwest::Error> for CaptureError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CaptureError::Decode(err.to_string())
        } else if err.is_timeout() {
            CaptureError::Transport(format!("request timed out: {err}"))
        } else {
            CaptureError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(err: serde_json::Error) -> Self {
        CaptureError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Io(err.to_string())
    }
}

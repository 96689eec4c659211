use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfilensError {
    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Status check failed: {0}")]
    StatusCheck(String),

    #[error("Analysis failed: {0}")]
    JobFailed(String),

    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProfilensError>;

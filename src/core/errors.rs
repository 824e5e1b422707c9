use thiserror::Error;

#[derive(Error, Debug)]
pub enum OboeruError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Text service returned no usable text")]
    EmptyAssistResponse,

    #[error("OboeruError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for OboeruError {
    fn from(error: std::io::Error) -> Self {
        OboeruError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for OboeruError {
    fn from(error: reqwest::Error) -> Self {
        OboeruError::Reqwest(Box::new(error))
    }
}

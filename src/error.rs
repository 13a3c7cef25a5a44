use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocnavError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} refused: {size} bytes exceeds the document size limit")]
    TooLarge { url: String, size: u64 },

    #[error("invalid document location: {0}")]
    Url(#[from] url::ParseError),

    #[error("markdown conversion failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, DocnavError>;

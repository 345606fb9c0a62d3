use thiserror::Error;

#[derive(Debug, Error)]
pub enum VariatorError {
    #[error("API key not set: export GEMINI_API_KEY or API_KEY")]
    MissingApiKey,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    EmptyResponse(&'static str),

    #[error("Failed to decode image data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Unsupported image type for {0}: expected PNG, JPEG or WebP")]
    UnsupportedMime(String),

    #[error("Malformed data URL")]
    InvalidDataUrl,

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("No result at index {0}")]
    NoSuchResult(usize),

    #[error("{0}")]
    InvalidCommand(String),
}

pub type Result<T> = std::result::Result<T, VariatorError>;

use std::fmt;

/// Errors raised while loading viewer assets and configuration
#[derive(Debug)]
pub enum ViewerError {
    /// Mapping or config source could not be reached over HTTP
    Network { url: String, reason: String },
    /// HTTP source answered with a non-success status
    HttpStatus { url: String, status: u16 },
    /// Image asset could not be decoded
    Image { path: String, reason: String },
    /// Configuration values are unusable
    InvalidConfig { reason: String },
    /// IO error
    Io(std::io::Error),
    /// JSON parse error
    Json(serde_json::Error),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Network { url, reason } => {
                write!(f, "Failed to fetch {url}: {reason}")
            }
            ViewerError::HttpStatus { url, status } => {
                write!(f, "Server returned status {status} for {url}")
            }
            ViewerError::Image { path, reason } => {
                write!(f, "Failed to decode image {path}: {reason}")
            }
            ViewerError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            ViewerError::Io(err) => write!(f, "IO error: {err}"),
            ViewerError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Io(err) => Some(err),
            ViewerError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::Io(err)
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;

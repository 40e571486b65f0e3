use thiserror::Error;

#[derive(Error, Debug)]
pub enum KagoError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] refinery::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl KagoError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            KagoError::HttpError(_) => Some(
                "Check your internet connection, or try:\n  kago price <URL>"
            ),
            KagoError::ItemNotFound(_) => Some(
                "Run `kago list` to see your shopping list"
            ),
            KagoError::InvalidPrice(_) => Some(
                "Use a number like 19.99, or `auto` to look the price up from the link"
            ),
            KagoError::DatabaseError(_) => Some(
                "The shopping-list database may be corrupted; check the path with `kago list`"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, KagoError>;

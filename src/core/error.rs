use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid catalogue: {0}")]
    InvalidCatalogue(String),

    #[error("Invalid day count: {0} (must be at least 1)")]
    InvalidDayCount(u32),

    #[error("Catalogue exhausted while filling day {day}; the plan has more days than chapters")]
    CatalogueExhausted { day: u32 },

    #[error("Day {0} is not part of the reading plan")]
    UnknownDay(u32),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Remote sync error: {0}")]
    Remote(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for TrackerError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

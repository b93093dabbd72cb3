use std::fmt;

/// Result type for opsdeck-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// Query against a present store failed
    Database(rusqlite::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => {
                let msg = err.to_string();
                // Producers migrate their schemas on their own release cadence
                if msg.contains("no such column") || msg.contains("no such table") {
                    write!(
                        f,
                        "Store schema mismatch: {}. The producing service likely migrated; update the report SQL for this store.",
                        msg
                    )
                } else {
                    write!(f, "Store error: {}", err)
                }
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

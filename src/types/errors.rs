use std::fmt;

// === StorageError ===

/// Errors raised by a preference store backend.
#[derive(Debug)]
pub enum StorageError {
    /// The store could not be opened or is not available in this session.
    Unavailable(String),
    /// A read or write against the database failed.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Preference store unavailable: {}", msg),
            StorageError::DatabaseError(msg) => {
                write!(f, "Preference store database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

// === SettingsError ===

/// Errors related to reader configuration management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === ReaderError ===

/// Reasons a page does not get a reader-mode controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    /// The page has no article content region.
    NotAnArticle,
    /// The page is a chapter index, which never offers reader mode.
    ChapterIndex,
    /// Reader mode was switched off for this page (no toggle button rendered).
    MissingToggle,
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::NotAnArticle => write!(f, "Page has no article content"),
            ReaderError::ChapterIndex => write!(f, "Chapter index pages have no reader mode"),
            ReaderError::MissingToggle => write!(f, "Reader mode is disabled for this page"),
        }
    }
}

impl std::error::Error for ReaderError {}

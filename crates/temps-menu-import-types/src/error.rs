//! Error types for the menu import system

use std::path::PathBuf;
use thiserror::Error;

/// Result type for a whole import run
pub type ImportResult<T> = Result<T, MenuImportError>;

/// Result type for content store calls
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that abort an entire import run
///
/// Everything below the file/parse/connectivity level degrades to a skipped
/// item or menu and is reported through the `ImportReport` instead.
#[derive(Error, Debug)]
pub enum MenuImportError {
    /// The menu definition file does not exist
    #[error("File to import doesn't exist: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The menu definition file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or does not have the expected shape
    #[error("Malformed JSON at {path}: {message}")]
    MalformedJson { path: String, message: String },

    /// The content store cannot be reached
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    /// The site base URL cannot be used to resolve relative links
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<serde_path_to_error::Error<serde_json::Error>> for MenuImportError {
    fn from(error: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = error.path().to_string();
        MenuImportError::MalformedJson {
            path,
            message: error.into_inner().to_string(),
        }
    }
}

/// Errors reported by a `ContentStore`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store refused this one operation
    #[error("Store rejected operation: {0}")]
    Rejected(String),

    /// The store cannot be reached at all
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    /// The run-aborting error for this store failure, if it is fatal
    pub fn to_fatal(&self) -> Option<MenuImportError> {
        match self {
            StoreError::Unavailable(msg) => Some(MenuImportError::StoreUnavailable(msg.clone())),
            StoreError::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_fatality() {
        assert!(StoreError::Unavailable("down".to_string()).is_fatal());
        assert!(!StoreError::Rejected("bad item".to_string()).is_fatal());
    }

    #[test]
    fn test_only_unavailable_converts_to_fatal() {
        match StoreError::Unavailable("down".to_string()).to_fatal() {
            Some(MenuImportError::StoreUnavailable(msg)) => assert_eq!(msg, "down"),
            other => panic!("unexpected conversion: {:?}", other),
        }
        assert!(StoreError::Rejected("bad item".to_string())
            .to_fatal()
            .is_none());
    }

    #[test]
    fn test_file_not_found_message() {
        let error = MenuImportError::FileNotFound(PathBuf::from("menus.json"));
        assert_eq!(
            error.to_string(),
            "File to import doesn't exist: menus.json"
        );
    }
}

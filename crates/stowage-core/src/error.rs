//! Error types module
//!
//! `UploadError` covers the failures that abort a pipeline call: no usable file in
//! the request, an inconsistent configuration, an unusable upload directory, or a
//! failed move. Rule violations are
//! not errors; they are collected into a `ValidationResult` and returned to the caller.

use std::io;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors caused by the request itself
    Debug,
    /// Warning level - for misconfiguration the operator can fix
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// by a host application that maps it to an HTTP response
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NO_FILE_SELECTED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("No upload path is provided")]
    UploadDirNotConfigured,

    #[error("Upload path doesn't exist: {}", .0.display())]
    UploadDirMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ErrorMetadata for UploadError {
    fn http_status_code(&self) -> u16 {
        match self {
            UploadError::NoFileSelected | UploadError::InvalidFileName(_) => 400,
            _ => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            UploadError::NoFileSelected => "NO_FILE_SELECTED",
            UploadError::InvalidFileName(_) => "INVALID_FILE_NAME",
            UploadError::UploadDirNotConfigured => "UPLOAD_DIR_NOT_CONFIGURED",
            UploadError::UploadDirMissing(_) => "UPLOAD_DIR_MISSING",
            UploadError::Config(_) => "INVALID_CONFIGURATION",
            UploadError::Storage(_) => "STORAGE_ERROR",
            UploadError::Io(_) => "IO_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::NoFileSelected | UploadError::InvalidFileName(_) => self.to_string(),
            // Server-side paths and IO details stay in the logs
            _ => "The file could not be stored".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::NoFileSelected | UploadError::InvalidFileName(_) => LogLevel::Debug,
            UploadError::UploadDirNotConfigured
            | UploadError::UploadDirMissing(_)
            | UploadError::Config(_) => LogLevel::Warn,
            UploadError::Storage(_) | UploadError::Io(_) => LogLevel::Error,
        }
    }
}

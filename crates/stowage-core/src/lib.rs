//! Stowage Core Library
//!
//! This crate provides the domain model, configuration, message catalog and error
//! types shared by the storage, processing and CLI crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;

// Re-export commonly used types
pub use config::{ConfigError, UploadConfig};
pub use error::{ErrorMetadata, LogLevel, UploadError};
pub use messages::MessageCatalog;
pub use models::{Dimensions, FileDescriptor, Rule, ValidationResult, Violation};

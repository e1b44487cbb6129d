//! Stowage Storage Library
//!
//! This crate provides the storage abstraction for accepted uploads and its local
//! filesystem implementation.
//!
//! # File naming
//!
//! Accepted files land directly in the upload directory, either as
//! `{unix_timestamp}_{name}` (unique-name mode, the default) or as `{name}`, silently
//! replacing an existing file. Naming is centralized in the `keys` module.
//!
//! Timestamps have one-second resolution, so two uploads with the same name in the
//! same second still collide in unique-name mode.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::storage_file_name;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};

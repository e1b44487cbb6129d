//! Upload pipeline: guard → validate → rename → store.
//!
//! Operational problems abort the call with an [`UploadError`]: no usable file, an
//! inconsistent configuration, an unusable upload directory or a failed move. Rule
//! violations do not: they come back in the [`UploadOutcome`] so the end user can fix
//! every problem in one round trip, and nothing is stored.

use std::path::{Path, PathBuf};

use stowage_core::{FileDescriptor, MessageCatalog, UploadConfig, UploadError, ValidationResult};
use stowage_storage::{create_storage, storage_file_name, Storage};

use crate::intake;
use crate::naming;
use crate::validator::UploadValidator;

/// Result of a pipeline call that did not fail operationally.
#[derive(Clone, Debug)]
pub struct UploadOutcome {
    pub validation: ValidationResult,
    /// Filename after name transforms, before any timestamp prefix.
    pub file_name: String,
    /// Set iff the file was accepted and stored.
    pub stored_path: Option<PathBuf>,
}

impl UploadOutcome {
    pub fn is_stored(&self) -> bool {
        self.stored_path.is_some()
    }

    pub fn is_accepted(&self) -> bool {
        self.validation.is_accepted()
    }

    pub fn stored_path(&self) -> Option<&Path> {
        self.stored_path.as_deref()
    }

    /// Error messages in rule order; empty iff accepted.
    pub fn errors(&self) -> Vec<String> {
        self.validation.messages().map(str::to_string).collect()
    }
}

/// One configured upload acceptance pipeline
#[derive(Clone, Debug)]
pub struct UploadPipeline {
    config: UploadConfig,
    messages: MessageCatalog,
}

impl UploadPipeline {
    pub fn new(config: UploadConfig, messages: MessageCatalog) -> Self {
        Self { config, messages }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Run the pipeline against the configured `upload_dir`
    pub async fn run(&self, mut file: FileDescriptor) -> Result<UploadOutcome, UploadError> {
        intake::prepare(&mut file)?;
        self.config.validate()?;
        let storage = create_storage(&self.config).await?;
        self.process(file, storage.as_ref()).await
    }

    /// Run the pipeline against an explicit storage backend
    ///
    /// The backend stands in for `upload_dir`, so the directory guard is skipped.
    pub async fn run_with_storage(
        &self,
        mut file: FileDescriptor,
        storage: &dyn Storage,
    ) -> Result<UploadOutcome, UploadError> {
        intake::prepare(&mut file)?;
        self.config.validate()?;
        self.process(file, storage).await
    }

    async fn process(
        &self,
        mut file: FileDescriptor,
        storage: &dyn Storage,
    ) -> Result<UploadOutcome, UploadError> {
        let validation = UploadValidator::new(&self.config, &self.messages).validate(&file);
        naming::apply(&self.config, &mut file);

        if !validation.is_accepted() {
            tracing::warn!(
                file_name = %file.name,
                error_count = validation.len(),
                "Upload rejected"
            );
            return Ok(UploadOutcome {
                validation,
                file_name: file.name,
                stored_path: None,
            });
        }

        let target = storage_file_name(
            &file.name,
            self.config.unique_name(),
            chrono::Utc::now().timestamp(),
        );

        let stored_path = storage
            .store(&file.temp_path, &target)
            .await
            .map_err(|e| {
                tracing::error!(
                    file_name = %file.name,
                    target = %target,
                    error = %e,
                    "Failed to store upload"
                );
                UploadError::from(e)
            })?;

        tracing::info!(
            file_name = %file.name,
            path = %stored_path.display(),
            size_bytes = file.size_bytes,
            "Upload stored"
        );

        Ok(UploadOutcome {
            validation,
            file_name: file.name,
            stored_path: Some(stored_path),
        })
    }
}

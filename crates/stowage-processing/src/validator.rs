use stowage_core::{
    Dimensions, FileDescriptor, MessageCatalog, Rule, UploadConfig, ValidationResult,
};

/// Upload rule evaluator
///
/// Each rule runs only when its configuration key is present. Rules never
/// short-circuit each other: every failing rule contributes one message, in the
/// order types, max_size, min_dimension, max_dimension.
pub struct UploadValidator<'a> {
    config: &'a UploadConfig,
    messages: &'a MessageCatalog,
}

impl<'a> UploadValidator<'a> {
    pub fn new(config: &'a UploadConfig, messages: &'a MessageCatalog) -> Self {
        Self { config, messages }
    }

    /// Run every configured rule against the file
    pub fn validate(&self, file: &FileDescriptor) -> ValidationResult {
        let mut result = ValidationResult::new();

        let checks = [
            (Rule::Types, self.check_type(file)),
            (Rule::MaxSize, self.check_size(file)),
            (Rule::MinDimension, self.check_min_dimension(file)),
            (Rule::MaxDimension, self.check_max_dimension(file)),
        ];

        for (rule, failure) in checks {
            if let Some(message) = failure {
                tracing::debug!(
                    rule = %rule,
                    file_name = %file.name,
                    mime_type = %file.mime_type,
                    "Upload rule failed"
                );
                result.push(rule, message);
            }
        }

        result
    }

    /// Validate the MIME subtype against `types`
    ///
    /// Matching is exact and case-sensitive. A MIME type without a `/` has no
    /// subtype and never matches.
    pub fn check_type(&self, file: &FileDescriptor) -> Option<String> {
        let allowed = self.config.allowed_types.as_ref()?;

        let permitted = file
            .subtype()
            .map(|subtype| allowed.contains(subtype))
            .unwrap_or(false);

        (!permitted).then(|| self.messages.types_message())
    }

    /// Validate size against `max_size` (decimal kilobytes)
    pub fn check_size(&self, file: &FileDescriptor) -> Option<String> {
        let max_kb = self.config.max_size_kb?;
        let max_bytes = self.config.max_size_bytes()?;

        (file.size_bytes > max_bytes).then(|| self.messages.max_size_message(max_kb))
    }

    /// Validate image dimensions against `min_dimension`
    pub fn check_min_dimension(&self, file: &FileDescriptor) -> Option<String> {
        let min = self.config.min_dimension?;
        let dims = image_dimensions(file)?;

        dims.falls_short_of(&min)
            .then(|| self.messages.min_dimension_message(min))
    }

    /// Validate image dimensions against `max_dimension`
    pub fn check_max_dimension(&self, file: &FileDescriptor) -> Option<String> {
        let max = self.config.max_dimension?;
        let dims = image_dimensions(file)?;

        dims.exceeds(&max)
            .then(|| self.messages.max_dimension_message(max))
    }
}

/// Dimensions only count for `image/*` files that could be decoded
fn image_dimensions(file: &FileDescriptor) -> Option<Dimensions> {
    if file.is_image() {
        file.dimensions
    } else {
        None
    }
}

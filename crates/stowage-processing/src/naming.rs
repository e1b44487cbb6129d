//! Optional filename rewrites applied before storage.

use stowage_core::{FileDescriptor, UploadConfig};

/// Rewrite a filename. Uppercasing runs before space replacement.
pub fn transform_name(name: &str, uppercase: bool, no_spaces: bool) -> String {
    let mut name = if uppercase {
        name.to_uppercase()
    } else {
        name.to_string()
    };

    if no_spaces {
        name = name.replace(' ', "-");
    }

    name
}

/// Apply the configured rewrites to the file in place
pub fn apply(config: &UploadConfig, file: &mut FileDescriptor) {
    if !config.name_uppercase() && !config.no_spaces() {
        return;
    }

    let renamed = transform_name(&file.name, config.name_uppercase(), config.no_spaces());
    if renamed != file.name {
        tracing::debug!(from = %file.name, to = %renamed, "Renamed upload");
        file.name = renamed;
    }
}

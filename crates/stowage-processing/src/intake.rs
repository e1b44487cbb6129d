//! Intake: turn a received upload into a `FileDescriptor`.

use std::path::PathBuf;

use stowage_core::{FileDescriptor, UploadError};

use crate::image::probe_dimensions;

/// Reject a descriptor that stands for an empty file field
pub fn ensure_present(file: &FileDescriptor) -> Result<(), UploadError> {
    if file.is_empty() {
        return Err(UploadError::NoFileSelected);
    }
    Ok(())
}

/// Last path component of a client filename.
///
/// Browsers may send a full client-side path; only the final component is kept, with
/// either `/` or `\` as the separator. Names that leave nothing storable are rejected.
pub fn client_file_name(name: &str) -> Result<&str, UploadError> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base {
        "" | "." | ".." => Err(UploadError::InvalidFileName(name.to_string())),
        _ if base.contains('\0') => Err(UploadError::InvalidFileName(name.to_string())),
        _ => Ok(base),
    }
}

/// Check the file is present and reduce its name to the final path component
pub fn prepare(file: &mut FileDescriptor) -> Result<(), UploadError> {
    ensure_present(file)?;

    let base = client_file_name(&file.name)?;
    if base != file.name {
        tracing::debug!(
            from = %file.name,
            to = %base,
            "Stripped directories from client filename"
        );
        file.name = base.to_string();
    }
    Ok(())
}

/// Describe a file the web layer has already written to a temporary location
///
/// Size comes from the filesystem. Dimensions are probed only for `image/*` types
/// and stay absent when the content cannot be decoded as an image.
pub async fn describe_temp_file(
    name: impl Into<String>,
    mime_type: impl Into<String>,
    temp_path: impl Into<PathBuf>,
) -> Result<FileDescriptor, UploadError> {
    let name = name.into();
    if name.is_empty() {
        return Err(UploadError::NoFileSelected);
    }
    let name = client_file_name(&name)?.to_string();

    let temp_path = temp_path.into();
    let meta = tokio::fs::metadata(&temp_path).await?;

    let mut file = FileDescriptor::new(name, mime_type, meta.len(), temp_path);
    if file.is_image() {
        file.dimensions = probe_dimensions(file.temp_path.clone()).await;
    }

    tracing::debug!(
        file_name = %file.name,
        mime_type = %file.mime_type,
        size_bytes = file.size_bytes,
        dimensions = ?file.dimensions,
        "Described upload"
    );

    Ok(file)
}

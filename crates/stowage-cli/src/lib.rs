//! Stowage CLI: validate a local file against upload rules and store it.

pub mod render;

use std::path::Path;

use tempfile::TempPath;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Copy `source` to a temporary file so the pipeline can move it without
/// touching the original. The copy is removed when the returned path is dropped,
/// unless it was moved away first.
pub fn stage_copy(source: &Path) -> std::io::Result<TempPath> {
    let staged = tempfile::Builder::new()
        .prefix("stowage-")
        .tempfile()?
        .into_temp_path();
    std::fs::copy(source, &staged)?;
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_copy_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.txt");
        std::fs::write(&source, b"hello").unwrap();

        let staged = stage_copy(&source).unwrap();
        assert_eq!(std::fs::read(&staged).unwrap(), b"hello");
        assert!(source.exists());

        let staged_path = staged.to_path_buf();
        drop(staged);
        assert!(!staged_path.exists());
    }
}

//! Image dimension probing

use image::{ImageError, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};
use stowage_core::Dimensions;

/// Read pixel dimensions from an image file header without decoding the pixels
pub fn read_dimensions(path: &Path) -> Result<Dimensions, ImageError> {
    let (width, height) = ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(Dimensions::new(width, height))
}

/// MIME type for an image file, guessed from its extension
pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type())
}

/// Probe dimensions off the async pool. Files that are not decodable images yield `None`.
pub async fn probe_dimensions(path: PathBuf) -> Option<Dimensions> {
    let shown = path.display().to_string();

    match tokio::task::spawn_blocking(move || read_dimensions(&path)).await {
        Ok(Ok(dims)) => Some(dims),
        Ok(Err(e)) => {
            tracing::debug!(path = %shown, error = %e, "Could not read image dimensions");
            None
        }
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "Image probe task failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_test_image(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    #[test]
    fn test_read_dimensions() {
        let dir = tempdir().unwrap();
        // Temp uploads have no extension; the format is sniffed from content
        let path = dir.path().join("upload-1234");
        write_test_image(&path, 90, 200);

        assert_eq!(read_dimensions(&path).unwrap(), Dimensions::new(90, 200));
    }

    #[test]
    fn test_read_dimensions_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upload-5678");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(read_dimensions(&path).is_err());
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("a.png")), Some("image/png"));
        assert_eq!(guess_mime_type(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(guess_mime_type(Path::new("a.pdf")), None);
        assert_eq!(guess_mime_type(Path::new("noextension")), None);
    }

    #[tokio::test]
    async fn test_probe_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("img");
        write_test_image(&path, 16, 8);

        assert_eq!(probe_dimensions(path).await, Some(Dimensions::new(16, 8)));
        assert_eq!(probe_dimensions(dir.path().join("missing")).await, None);
    }
}

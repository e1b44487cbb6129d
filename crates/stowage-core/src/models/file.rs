use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants::DIMENSION_SEPARATOR;

/// Pixel dimensions, written as `W*H` in configuration and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either side is smaller than the corresponding side of `min`.
    pub fn falls_short_of(&self, min: &Dimensions) -> bool {
        self.width < min.width || self.height < min.height
    }

    /// True if either side is larger than the corresponding side of `max`.
    pub fn exceeds(&self, max: &Dimensions) -> bool {
        self.width > max.width || self.height > max.height
    }
}

impl FromStr for Dimensions {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidDimensions(s.to_string());

        let (width, height) = s.split_once(DIMENSION_SEPARATOR).ok_or_else(invalid)?;
        let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = height.trim().parse::<u32>().map_err(|_| invalid())?;

        Ok(Dimensions { width, height })
    }
}

impl TryFrom<String> for Dimensions {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dimensions> for String {
    fn from(value: Dimensions) -> Self {
        value.to_string()
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}{}", self.width, DIMENSION_SEPARATOR, self.height)
    }
}

/// One uploaded file as seen by the acceptance pipeline.
///
/// The temporary file at `temp_path` belongs to whoever received the upload; the
/// pipeline only moves it once the file has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Client filename; rewritten by the name transformer before storage.
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub temp_path: PathBuf,
    /// Present only for decodable images.
    pub dimensions: Option<Dimensions>,
}

impl FileDescriptor {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        temp_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            temp_path: temp_path.into(),
            dimensions: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some(Dimensions::new(width, height));
        self
    }

    /// An empty client filename means the form field was submitted without a file.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Top-level MIME type (`image` in `image/png`), if the type has a `/` separator.
    pub fn top_level_type(&self) -> Option<&str> {
        self.mime_type.split_once('/').map(|(top, _)| top)
    }

    /// MIME subtype (`png` in `image/png`), if the type has a `/` separator.
    pub fn subtype(&self) -> Option<&str> {
        self.mime_type.split_once('/').map(|(_, sub)| sub)
    }

    pub fn is_image(&self) -> bool {
        self.top_level_type() == Some("image")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_parse_and_display() {
        let dims: Dimensions = "100*200".parse().unwrap();
        assert_eq!(dims, Dimensions::new(100, 200));
        assert_eq!(dims.to_string(), "100*200");

        let spaced: Dimensions = " 640 * 480 ".parse().unwrap();
        assert_eq!(spaced, Dimensions::new(640, 480));
    }

    #[test]
    fn test_dimensions_parse_invalid() {
        assert!("100x200".parse::<Dimensions>().is_err());
        assert!("100*".parse::<Dimensions>().is_err());
        assert!("*100".parse::<Dimensions>().is_err());
        assert!("-1*100".parse::<Dimensions>().is_err());
        assert!("".parse::<Dimensions>().is_err());
    }

    #[test]
    fn test_dimensions_bounds_use_either_side() {
        let min = Dimensions::new(100, 100);
        assert!(Dimensions::new(90, 200).falls_short_of(&min));
        assert!(Dimensions::new(200, 90).falls_short_of(&min));
        assert!(!Dimensions::new(100, 100).falls_short_of(&min));

        let max = Dimensions::new(800, 600);
        assert!(Dimensions::new(801, 10).exceeds(&max));
        assert!(Dimensions::new(10, 601).exceeds(&max));
        assert!(!Dimensions::new(800, 600).exceeds(&max));
    }

    #[test]
    fn test_mime_parts() {
        let file = FileDescriptor::new("photo.png", "image/png", 10, "/tmp/upload123");
        assert_eq!(file.top_level_type(), Some("image"));
        assert_eq!(file.subtype(), Some("png"));
        assert!(file.is_image());

        let odd = FileDescriptor::new("blob", "octet", 10, "/tmp/upload124");
        assert_eq!(odd.top_level_type(), None);
        assert_eq!(odd.subtype(), None);
        assert!(!odd.is_image());
    }

    #[test]
    fn test_empty_name_means_no_file() {
        let file = FileDescriptor::new("", "", 0, "");
        assert!(file.is_empty());
    }
}

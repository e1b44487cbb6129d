#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;

/// Temporary upload area plus destination directory for one test
pub struct TestDirs {
    pub incoming: TempDir,
    pub uploads: TempDir,
}

impl TestDirs {
    pub fn new() -> Self {
        Self {
            incoming: tempfile::tempdir().expect("incoming dir"),
            uploads: tempfile::tempdir().expect("uploads dir"),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        self.uploads.path()
    }

    /// Write bytes as a temporary upload, named like a web server would
    pub fn stage(&self, temp_name: &str, data: &[u8]) -> PathBuf {
        let path = self.incoming.path().join(temp_name);
        std::fs::write(&path, data).expect("stage upload");
        path
    }

    /// Write a real PNG of the given size as a temporary upload
    pub fn stage_png(&self, temp_name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.incoming.path().join(temp_name);
        RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))
            .save_with_format(&path, ImageFormat::Png)
            .expect("stage png");
        path
    }

    pub fn stored_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads.path())
            .expect("read uploads")
            .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Split `{timestamp}_{name}` and return both parts
pub fn split_unique_name(file_name: &str) -> (i64, &str) {
    let (ts, name) = file_name.split_once('_').expect("timestamp prefix");
    (ts.parse().expect("numeric timestamp"), name)
}

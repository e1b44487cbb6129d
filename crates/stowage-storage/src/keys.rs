//! File naming policy for stored uploads.

/// Name a file is stored under.
///
/// In unique-name mode this is `{timestamp}_{name}`; otherwise the name is used as is
/// and any existing file with that name is replaced.
pub fn storage_file_name(name: &str, unique: bool, timestamp: i64) -> String {
    if unique {
        format!("{}_{}", timestamp, name)
    } else {
        name.to_string()
    }
}

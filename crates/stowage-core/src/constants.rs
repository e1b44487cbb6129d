//! Configuration keys, placeholder tokens and default messages.

/// Decimal kilobyte multiplier used by the size rule.
pub const BYTES_PER_KB: u64 = 1000;

/// Separator between allowed subtypes in the `types` key (`"png|jpg"`).
pub const TYPES_SEPARATOR: char = '|';

/// Separator between width and height in dimension keys (`"100*100"`).
pub const DIMENSION_SEPARATOR: char = '*';

/// Prefix for environment configuration (`STOWAGE_UPLOAD_DIR`, `STOWAGE_TYPES`, ...).
pub const ENV_PREFIX: &str = "STOWAGE_";

pub const SIZE_PLACEHOLDER: &str = ":size";
pub const MIN_DIMENSION_PLACEHOLDER: &str = ":min_dimension";
pub const MAX_DIMENSION_PLACEHOLDER: &str = ":max_dimension";

pub const DEFAULT_TYPES_MESSAGE: &str = "File type is not allowed";

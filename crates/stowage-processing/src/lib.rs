//! Stowage Processing Library
//!
//! The upload acceptance pipeline: intake → directory guard → rules → name
//! transforms → store.

pub mod image;
pub mod intake;
pub mod naming;
pub mod pipeline;
pub mod validator;

pub use intake::describe_temp_file;
pub use naming::transform_name;
pub use pipeline::{UploadOutcome, UploadPipeline};
pub use validator::UploadValidator;

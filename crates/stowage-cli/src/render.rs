//! Presentation of validation errors.
//!
//! The pipeline only returns an ordered list of messages; these helpers turn that
//! list into the markup a page or terminal expects.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ErrorFormat {
    /// One message per line
    Text,
    /// Each message followed by `<br />`
    Plain,
    /// Each message wrapped in `--start-tag` / `--end-tag`, followed by `<br />`
    Tagged,
    /// Each message in a Bootstrap danger alert
    Alert,
}

pub fn text(errors: &[String]) -> String {
    errors.join("\n")
}

pub fn plain(errors: &[String]) -> String {
    errors.iter().map(|e| format!("{}<br />", e)).collect()
}

pub fn tagged(errors: &[String], start_tag: &str, end_tag: &str) -> String {
    errors
        .iter()
        .map(|e| format!("{}{}{}<br />", start_tag, e, end_tag))
        .collect()
}

pub fn alert(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("<div class=\"alert alert-danger\">{}</div>", e))
        .collect()
}

pub fn render(errors: &[String], format: ErrorFormat, start_tag: &str, end_tag: &str) -> String {
    match format {
        ErrorFormat::Text => text(errors),
        ErrorFormat::Plain => plain(errors),
        ErrorFormat::Tagged => tagged(errors, start_tag, end_tag),
        ErrorFormat::Alert => alert(errors),
    }
}

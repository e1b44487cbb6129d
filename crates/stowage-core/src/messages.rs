//! Custom validation messages
//!
//! A catalog maps rule keys (`types`, `max_size`, `min_dimension`, `max_dimension`)
//! to message templates. Templates may carry the rule's placeholder token, which is
//! replaced by the configured threshold when the message is emitted:
//!
//! | key             | placeholder      | value         |
//! |-----------------|------------------|---------------|
//! | `types`         | none             |               |
//! | `max_size`      | `:size`          | `max_size`    |
//! | `min_dimension` | `:min_dimension` | `W*H`         |
//! | `max_dimension` | `:max_dimension` | `W*H`         |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants::{
    DEFAULT_TYPES_MESSAGE, MAX_DIMENSION_PLACEHOLDER, MIN_DIMENSION_PLACEHOLDER, SIZE_PLACEHOLDER,
};
use crate::models::{Dimensions, Rule};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    templates: HashMap<Rule, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_message(mut self, rule: Rule, template: impl Into<String>) -> Self {
        self.templates.insert(rule, template.into());
        self
    }

    pub fn template(&self, rule: Rule) -> Option<&str> {
        self.templates.get(&rule).map(String::as_str)
    }

    pub fn types_message(&self) -> String {
        self.template(Rule::Types)
            .unwrap_or(DEFAULT_TYPES_MESSAGE)
            .to_string()
    }

    pub fn max_size_message(&self, max_size_kb: u64) -> String {
        match self.template(Rule::MaxSize) {
            Some(t) => t.replace(SIZE_PLACEHOLDER, &max_size_kb.to_string()),
            None => format!(
                "File size must be less than or equal to {} kb",
                max_size_kb
            ),
        }
    }

    pub fn min_dimension_message(&self, min: Dimensions) -> String {
        match self.template(Rule::MinDimension) {
            Some(t) => t.replace(MIN_DIMENSION_PLACEHOLDER, &min.to_string()),
            None => format!(
                "The image dimension must not be less than the minimum dimension of {} pixels",
                min
            ),
        }
    }

    pub fn max_dimension_message(&self, max: Dimensions) -> String {
        match self.template(Rule::MaxDimension) {
            Some(t) => t.replace(MAX_DIMENSION_PLACEHOLDER, &max.to_string()),
            None => format!(
                "The image dimension must not exceed the maximum dimension of {} pixels",
                max
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messages() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.types_message(), "File type is not allowed");
        assert_eq!(
            catalog.max_size_message(500),
            "File size must be less than or equal to 500 kb"
        );
        assert_eq!(
            catalog.min_dimension_message(Dimensions::new(100, 100)),
            "The image dimension must not be less than the minimum dimension of 100*100 pixels"
        );
        assert_eq!(
            catalog.max_dimension_message(Dimensions::new(1920, 1080)),
            "The image dimension must not exceed the maximum dimension of 1920*1080 pixels"
        );
    }

    #[test]
    fn test_custom_templates_substitute_placeholder() {
        let catalog = MessageCatalog::from_json_str(
            r#"{
                "types": "Only images please",
                "max_size": "Keep it under :size KB",
                "min_dimension": "At least :min_dimension",
                "max_dimension": "At most :max_dimension"
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.types_message(), "Only images please");
        assert_eq!(catalog.max_size_message(100), "Keep it under 100 KB");
        assert_eq!(
            catalog.min_dimension_message(Dimensions::new(10, 20)),
            "At least 10*20"
        );
        assert_eq!(
            catalog.max_dimension_message(Dimensions::new(30, 40)),
            "At most 30*40"
        );
    }

    #[test]
    fn test_template_without_placeholder_is_verbatim() {
        let catalog = MessageCatalog::new().with_message(Rule::MaxSize, "Too big");
        assert_eq!(catalog.max_size_message(100), "Too big");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(MessageCatalog::from_json_str(r#"{"colour": "nope"}"#).is_err());
    }
}

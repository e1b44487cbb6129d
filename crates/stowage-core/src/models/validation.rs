use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Configuration-gated validation rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Types,
    MaxSize,
    MinDimension,
    MaxDimension,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Rule::Types,
        Rule::MaxSize,
        Rule::MinDimension,
        Rule::MaxDimension,
    ];

    /// Key shared by the configuration bundle and the message catalog.
    pub fn key(&self) -> &'static str {
        match self {
            Rule::Types => "types",
            Rule::MaxSize => "max_size",
            Rule::MinDimension => "min_dimension",
            Rule::MaxDimension => "max_dimension",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.key())
    }
}

/// A failed rule together with the message shown to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

/// Ordered outcome of the rule evaluator. Accepted iff there are no violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule, message: impl Into<String>) {
        self.violations.push(Violation {
            rule,
            message: message.into(),
        });
    }

    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has_violation(&self, rule: Rule) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }

    /// Messages in evaluation order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.message.as_str())
    }

    pub fn into_messages(self) -> Vec<String> {
        self.violations.into_iter().map(|v| v.message).collect()
    }
}

//! Invocation matching.
//!
//! Matches the free text of a calling row against a scenario's name
//! template, extracting one argument per placeholder.

use crate::template::NameTemplate;
use regex::Regex;
use scena_core::{Result, ScenaError};

/// A name template compiled for matching
#[derive(Debug, Clone)]
pub struct InvocationMatcher {
    regex: Regex,
}

impl InvocationMatcher {
    pub fn new(template: NameTemplate) -> Result<Self> {
        let regex = Regex::new(&template.pattern())
            .map_err(|e| ScenaError::syntax(format!("Invalid scenario name pattern: {}", e)))?;
        Ok(Self { regex })
    }

    /// Captures in left-to-right order when the whole phrase matches.
    ///
    /// A template without placeholders only matches the identical phrase and
    /// yields an empty capture list.
    pub fn captures(&self, phrase: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(phrase)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }

    pub fn is_match(&self, phrase: &str) -> bool {
        self.regex.is_match(phrase)
    }
}

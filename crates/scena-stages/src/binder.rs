//! Argument binding for scenario calls.
use scena_core::{Result, ScenaError};
use std::collections::HashMap;

/// Input name to argument value, for one call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallBinding {
    values: HashMap<String, String>,
}

impl CallBinding {
    /// Bind arguments supplied by name. Every name must be a declared input.
    pub fn named(inputs: &[String], args: &HashMap<String, String>) -> Result<Self> {
        let mut names: Vec<&String> = args.keys().collect();
        names.sort();
        for name in names {
            if !inputs.contains(name) {
                return Err(not_an_input(name));
            }
        }
        Ok(Self {
            values: args.clone(),
        })
    }

    /// Bind arguments by position, pairing declared inputs with values
    /// until either side runs out.
    pub fn positional(inputs: &[String], args: &[String]) -> Self {
        Self {
            values: inputs
                .iter()
                .zip(args)
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }

    /// Take a map as-is, without checking it against any declaration
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub(crate) fn not_an_input(name: &str) -> ScenaError {
    ScenaError::syntax(format!("The argument {} is not an input to the scenario.", name))
}

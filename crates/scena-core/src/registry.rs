//! Scenario registry: scenario name to definition, scoped to one document.
use crate::assertion::Assertion;
use crate::error::Result;
use crate::factory::CallSite;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A registered, callable scenario
pub trait Scenario {
    /// Canonical name the scenario is registered under
    fn name(&self) -> &str;

    /// Declared inputs in declaration order
    fn inputs(&self) -> &[String];

    fn outputs(&self) -> &HashSet<String>;

    /// Positional arguments if `phrase` invokes this scenario
    fn match_parameters(&self, phrase: &str) -> Option<Vec<String>>;

    /// Expand the body with arguments bound by name
    fn call_named(&self, args: &HashMap<String, String>, site: &CallSite) -> Result<Vec<Assertion>>;

    /// Expand the body with arguments bound by position
    fn call_positional(&self, args: &[String], site: &CallSite) -> Result<Vec<Assertion>>;
}

/// Name-keyed scenario store. Entries are replaced, never removed.
#[derive(Default)]
pub struct ScenarioRegistry {
    scenarios: HashMap<String, Rc<dyn Scenario>>,
    order: Vec<String>,
}

impl ScenarioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `scenario` under `name`, returning the entry it replaced
    pub fn add(&mut self, name: &str, scenario: Rc<dyn Scenario>) -> Option<Rc<dyn Scenario>> {
        let previous = self.scenarios.insert(name.to_string(), scenario);
        if previous.is_none() {
            self.order.push(name.to_string());
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn Scenario>> {
        self.scenarios.get(name).cloned()
    }

    /// All current entries in first-registration order
    pub fn all(&self) -> Vec<Rc<dyn Scenario>> {
        self.order
            .iter()
            .filter_map(|name| self.scenarios.get(name).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

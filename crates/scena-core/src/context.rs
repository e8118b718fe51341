//! Execution Context: state shared by every table of one test document
use crate::registry::{Scenario, ScenarioRegistry};
use crate::summary::{ExecutionResult, TestSummary};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Capabilities every table interpreter sees while building and running
/// assertions.
///
/// Methods take `&self`; implementations keep their state behind interior
/// mutability because contexts are shared by nested interpreters.
pub trait TestContext {
    fn symbol(&self, name: &str) -> Option<String>;

    fn set_symbol(&self, name: &str, value: &str);

    fn add_scenario(&self, name: &str, scenario: Rc<dyn Scenario>);

    fn scenario(&self, name: &str) -> Option<Rc<dyn Scenario>>;

    fn scenarios(&self) -> Vec<Rc<dyn Scenario>>;

    fn increment_passed(&self) {
        self.increment(ExecutionResult::Pass);
    }

    fn increment_failed(&self) {
        self.increment(ExecutionResult::Fail);
    }

    fn increment_errored(&self) {
        self.increment(ExecutionResult::Error);
    }

    fn increment_ignored(&self) {
        self.increment(ExecutionResult::Ignore);
    }

    fn increment(&self, result: ExecutionResult);

    fn increment_summary(&self, summary: &TestSummary);
}

/// Root context of one document execution
#[derive(Default)]
pub struct DocumentContext {
    pub run_id: String,
    symbols: RefCell<HashMap<String, String>>,
    registry: RefCell<ScenarioRegistry>,
    summary: RefCell<TestSummary>,
}

impl DocumentContext {
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            ..Self::default()
        }
    }

    /// Tally of every outcome counted so far, nested scenarios included
    pub fn summary(&self) -> TestSummary {
        *self.summary.borrow()
    }
}

impl TestContext for DocumentContext {
    fn symbol(&self, name: &str) -> Option<String> {
        self.symbols.borrow().get(name).cloned()
    }

    fn set_symbol(&self, name: &str, value: &str) {
        self.symbols
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn add_scenario(&self, name: &str, scenario: Rc<dyn Scenario>) {
        if self.registry.borrow_mut().add(name, scenario).is_some() {
            tracing::debug!(run_id = %self.run_id, scenario = name, "scenario redefined");
        }
    }

    fn scenario(&self, name: &str) -> Option<Rc<dyn Scenario>> {
        self.registry.borrow().get(name)
    }

    fn scenarios(&self) -> Vec<Rc<dyn Scenario>> {
        self.registry.borrow().all()
    }

    fn increment(&self, result: ExecutionResult) {
        self.summary.borrow_mut().add(result);
    }

    fn increment_summary(&self, summary: &TestSummary) {
        self.summary.borrow_mut().add_summary(summary);
    }
}

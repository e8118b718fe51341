//! Scenario context: decides the verdict of one scenario call.
//!
//! Wraps the caller's context. Every outcome raised while the expanded body
//! runs is forwarded to the caller, so document totals stay exact, and is
//! also counted in a private tally that yields the call's own verdict.

use scena_core::{ExecutionResult, Scenario, TestContext, TestSummary};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct ScenarioContext {
    parent: Rc<dyn TestContext>,
    summary: RefCell<TestSummary>,
    closed: Cell<bool>,
}

impl ScenarioContext {
    pub fn new(parent: Rc<dyn TestContext>) -> Self {
        Self {
            parent,
            summary: RefCell::new(TestSummary::default()),
            closed: Cell::new(false),
        }
    }

    /// Outcomes counted for this call so far
    pub fn summary(&self) -> TestSummary {
        *self.summary.borrow()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Read the rolled-up verdict. Closes the local tally.
    pub fn execution_result(&self) -> ExecutionResult {
        self.closed.set(true);
        self.summary.borrow().execution_result()
    }

    fn record(&self, apply: impl FnOnce(&mut TestSummary)) {
        if self.closed.get() {
            tracing::warn!("outcome reported after the scenario verdict was read");
            return;
        }
        apply(&mut *self.summary.borrow_mut());
    }
}

impl TestContext for ScenarioContext {
    fn symbol(&self, name: &str) -> Option<String> {
        self.parent.symbol(name)
    }

    fn set_symbol(&self, name: &str, value: &str) {
        self.parent.set_symbol(name, value);
    }

    fn add_scenario(&self, name: &str, scenario: Rc<dyn Scenario>) {
        self.parent.add_scenario(name, scenario);
    }

    fn scenario(&self, name: &str) -> Option<Rc<dyn Scenario>> {
        self.parent.scenario(name)
    }

    fn scenarios(&self) -> Vec<Rc<dyn Scenario>> {
        self.parent.scenarios()
    }

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

    fn increment(&self, result: ExecutionResult) {
        self.parent.increment(result);
        self.record(|summary| summary.add(result));
    }

    fn increment_summary(&self, summary: &TestSummary) {
        self.parent.increment_summary(summary);
        self.record(|local| local.add_summary(summary));
    }
}

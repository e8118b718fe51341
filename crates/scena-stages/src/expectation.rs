//! Deferred roll-up of a scenario call onto its calling row.
//!
//! Attached to the no-op assertion that closes every expanded body, so it is
//! evaluated after all of the body's own assertions.

use crate::aggregator::ScenarioContext;
use scena_core::{ChildInterpreter, ExecutionResult, Expectation, ReturnValue};
use std::rc::Rc;

pub struct ScenarioExpectation {
    child: Box<dyn ChildInterpreter>,
    context: Rc<ScenarioContext>,
    row: usize,
    declares_outputs: bool,
}

impl ScenarioExpectation {
    pub fn new(
        child: Box<dyn ChildInterpreter>,
        context: Rc<ScenarioContext>,
        row: usize,
        declares_outputs: bool,
    ) -> Self {
        Self {
            child,
            context,
            row,
            declares_outputs,
        }
    }
}

impl Expectation for ScenarioExpectation {
    /// Marks the calling row when the scenario has no outputs to report
    /// success through, or when it did not pass.
    fn evaluate(&self, _returned: &ReturnValue) -> Option<ExecutionResult> {
        let verdict = self.context.execution_result();
        if self.declares_outputs && verdict.is_pass() {
            return None;
        }

        match self.child.parent_table() {
            Some(parent) => parent.borrow_mut().mark_row(self.row, verdict),
            None => tracing::warn!(row = self.row, "scenario child has no calling table"),
        }
        Some(verdict)
    }
}

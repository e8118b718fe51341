//! Assertion Runner: evaluates assertions strictly in order
use crate::assertion::{Assertion, Instruction, ReturnValue};
use crate::error::Result;
use crate::summary::ExecutionResult;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Bridge to the fixture side. The runner never sends it a no-op.
pub trait FixtureInvoker {
    fn invoke(&mut self, instruction: &Instruction) -> Result<Option<String>>;
}

/// Record of one evaluated assertion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionOutcome {
    pub instruction_id: String,
    pub result: Option<ExecutionResult>,
    pub latency_ms: u64,
}

pub struct AssertionRunner {
    assertions: Vec<Assertion>,
}

impl AssertionRunner {
    pub fn new(assertions: Vec<Assertion>) -> Self {
        Self { assertions }
    }

    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    pub fn run(&self, invoker: &mut dyn FixtureInvoker) -> Vec<AssertionOutcome> {
        let mut outcomes = Vec::with_capacity(self.assertions.len());

        for assertion in &self.assertions {
            let start = Instant::now();
            let returned = if assertion.instruction.is_noop() {
                ReturnValue::Void
            } else {
                match invoker.invoke(&assertion.instruction) {
                    Ok(Some(value)) => ReturnValue::Value(value),
                    Ok(None) => ReturnValue::Void,
                    Err(e) => {
                        tracing::debug!(instruction = assertion.instruction.id(), error = %e, "fixture call failed");
                        ReturnValue::Exception(e.to_string())
                    }
                }
            };

            let result = assertion.expectation.evaluate(&returned);
            outcomes.push(AssertionOutcome {
                instruction_id: assertion.instruction.id().to_string(),
                result,
                latency_ms: start.elapsed().as_millis() as u64,
            });
        }

        outcomes
    }
}

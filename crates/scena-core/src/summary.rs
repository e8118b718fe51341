//! Execution results and running tallies.
//!
//! A `TestSummary` counts right/wrong/ignored/exception outcomes; an
//! `ExecutionResult` is the single verdict derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict of one assertion, one row or a whole nested execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionResult {
    Pass,
    Fail,
    Error,
    Ignore,
}

impl ExecutionResult {
    /// Roll a tally up into one verdict.
    ///
    /// Error outranks fail, fail outranks ignore, ignore outranks pass.
    /// An empty tally is a pass.
    pub fn from_summary(summary: &TestSummary) -> Self {
        if summary.exceptions > 0 {
            ExecutionResult::Error
        } else if summary.wrong > 0 {
            ExecutionResult::Fail
        } else if summary.ignores > 0 {
            ExecutionResult::Ignore
        } else {
            ExecutionResult::Pass
        }
    }

    pub fn is_pass(self) -> bool {
        self == ExecutionResult::Pass
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            ExecutionResult::Pass => "pass",
            ExecutionResult::Fail => "fail",
            ExecutionResult::Error => "error",
            ExecutionResult::Ignore => "ignore",
        };
        f.write_str(label)
    }
}

/// Counts of outcomes produced while running assertions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub right: u32,
    pub wrong: u32,
    pub ignores: u32,
    pub exceptions: u32,
}

impl TestSummary {
    pub fn new(right: u32, wrong: u32, ignores: u32, exceptions: u32) -> Self {
        Self {
            right,
            wrong,
            ignores,
            exceptions,
        }
    }

    /// Count a single outcome
    pub fn add(&mut self, result: ExecutionResult) {
        match result {
            ExecutionResult::Pass => self.right += 1,
            ExecutionResult::Fail => self.wrong += 1,
            ExecutionResult::Error => self.exceptions += 1,
            ExecutionResult::Ignore => self.ignores += 1,
        }
    }

    /// Merge another tally into this one
    pub fn add_summary(&mut self, other: &TestSummary) {
        self.right += other.right;
        self.wrong += other.wrong;
        self.ignores += other.ignores;
        self.exceptions += other.exceptions;
    }

    pub fn total(&self) -> u32 {
        self.right + self.wrong + self.ignores + self.exceptions
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn execution_result(&self) -> ExecutionResult {
        ExecutionResult::from_summary(self)
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} right, {} wrong, {} ignored, {} exceptions",
            self.right, self.wrong, self.ignores, self.exceptions
        )
    }
}

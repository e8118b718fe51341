//! Assertions: an instruction for the fixture side paired with the
//! expectation that judges its return value.

use crate::summary::ExecutionResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction sent to the fixture side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Does nothing; the runner never forwards it to an invoker
    Noop { id: String },
    /// Call `method` on the fixture `instance`
    Call {
        id: String,
        instance: String,
        method: String,
        args: Vec<String>,
    },
}

impl Instruction {
    pub fn noop(id: impl Into<String>) -> Self {
        Instruction::Noop { id: id.into() }
    }

    pub fn call(
        id: impl Into<String>,
        instance: impl Into<String>,
        method: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Instruction::Call {
            id: id.into(),
            instance: instance.into(),
            method: method.into(),
            args,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Instruction::Noop { id } | Instruction::Call { id, .. } => id,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Instruction::Noop { .. })
    }
}

/// What came back from the fixture side for one instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnValue {
    Void,
    Value(String),
    Exception(String),
}

impl ReturnValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ReturnValue::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Judges a return value.
///
/// Implementations report their outcome to whatever context they were built
/// with; the returned verdict is informational for the runner.
pub trait Expectation {
    fn evaluate(&self, returned: &ReturnValue) -> Option<ExecutionResult>;
}

pub struct Assertion {
    pub instruction: Instruction,
    pub expectation: Box<dyn Expectation>,
}

impl Assertion {
    pub fn new(instruction: Instruction, expectation: Box<dyn Expectation>) -> Self {
        Self {
            instruction,
            expectation,
        }
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("instruction", &self.instruction)
            .finish_non_exhaustive()
    }
}

//! Scena Core: execution context, table model, assertions and runner
//!
//! Shared ground for the scenario interpreter: everything a table
//! interpreter needs to build assertions and everything the runner needs to
//! evaluate them.

pub mod assertion;
pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod logging;
pub mod registry;
pub mod runner;
pub mod summary;
pub mod table;

pub use assertion::{Assertion, Expectation, Instruction, ReturnValue};
pub use config::RunnerConfig;
pub use context::{DocumentContext, TestContext};
pub use error::{Result, ScenaError};
pub use factory::{CallSite, ChildInterpreter, ChildSpec, InterpreterFactory, TableKind};
pub use registry::{Scenario, ScenarioRegistry};
pub use runner::{AssertionOutcome, AssertionRunner, FixtureInvoker};
pub use summary::{ExecutionResult, TestSummary};
pub use table::{SharedTable, Table};

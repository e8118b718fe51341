//! Scena Stages: scenario declaration, expansion and roll-up.
//!
//! # Call Flow
//!
//! ```text
//! calling row ─► binder ─► templater ─► child interpreter ─► body assertions
//!                                           │                       │
//!                                    ScenarioContext ◄── outcomes ──┘
//!                                           │
//!                              roll-up (no-op, evaluated last) ─► calling row
//! ```
//!
//! The `script` interpreter and `TestDocument` are reference
//! implementations that let a document run end to end with any
//! `FixtureInvoker`.

pub mod aggregator;
pub mod binder;
pub mod document;
pub mod expectation;
pub mod scenario;
pub mod script;
pub mod templater;

pub use aggregator::ScenarioContext;
pub use binder::CallBinding;
pub use document::{default_factory, DocumentReport, TestDocument, SCENARIO_KIND};
pub use expectation::ScenarioExpectation;
pub use scenario::ScenarioTable;
pub use script::{ScriptTable, SCRIPT_ACTOR, SCRIPT_KIND};

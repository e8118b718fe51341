//! Test document: tables in document order, one shared context.
//!
//! Tables are turned into assertions as they are added, so a scenario must
//! be declared before the rows that call it. Running evaluates every
//! collected assertion in order.

use crate::scenario::ScenarioTable;
use crate::script::{ScriptTable, SCRIPT_KIND};
use scena_core::{
    Assertion, AssertionOutcome, AssertionRunner, ChildSpec, DocumentContext, FixtureInvoker,
    InterpreterFactory, Result, ScenaError, SharedTable, Table, TableKind, TestContext,
    TestSummary,
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// First-cell keyword of a scenario table
pub const SCENARIO_KIND: &str = "scenario";

/// Factory knowing the interpreters this crate ships
pub fn default_factory() -> InterpreterFactory {
    InterpreterFactory::new().with(SCRIPT_KIND, ScriptTable::build)
}

/// Outcome of running a whole document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    pub run_id: String,
    pub summary: TestSummary,
    pub outcomes: Vec<AssertionOutcome>,
}

impl DocumentReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScenaError::Execution(e.to_string()))
    }
}

pub struct TestDocument {
    context: Rc<DocumentContext>,
    factory: Rc<InterpreterFactory>,
    tables: Vec<SharedTable>,
    assertions: Vec<Assertion>,
}

impl TestDocument {
    pub fn new() -> Self {
        Self::with_factory(default_factory())
    }

    pub fn with_factory(factory: InterpreterFactory) -> Self {
        Self {
            context: Rc::new(DocumentContext::new()),
            factory: Rc::new(factory),
            tables: Vec::new(),
            assertions: Vec::new(),
        }
    }

    pub fn context(&self) -> Rc<DocumentContext> {
        Rc::clone(&self.context)
    }

    pub fn tables(&self) -> &[SharedTable] {
        &self.tables
    }

    pub fn assertion_count(&self) -> usize {
        self.assertions.len()
    }

    /// Add the next table of the document and build its assertions.
    ///
    /// The table kind is read from its first cell. On error the table adds
    /// no assertions.
    pub fn add_table(&mut self, table: Table) -> Result<SharedTable> {
        let table_id = format!("table_{}", self.tables.len());
        let kind = TableKind::new(
            table
                .cell(0, 0)
                .map(|c| c.trim().to_lowercase())
                .unwrap_or_default(),
        );

        if kind.as_str() == SCENARIO_KIND {
            let scenario = ScenarioTable::parse(table, &table_id, self.context.as_ref())?;
            let shared = scenario.body().clone().shared();
            self.assertions.extend(scenario.assertions());
            self.tables.push(Rc::clone(&shared));
            return Ok(shared);
        }

        if !self.factory.supports(&kind) {
            return Err(ScenaError::TableCreation(format!(
                "unknown table type '{}' in {}",
                kind, table_id
            )));
        }

        let shared = table.shared();
        let mut interpreter = self.factory.create(ChildSpec {
            kind,
            table: Rc::clone(&shared),
            table_id,
            parent: None,
            context: Rc::clone(&self.context) as Rc<dyn TestContext>,
            factory: Rc::clone(&self.factory),
        })?;
        let assertions = interpreter.assertions()?;
        self.assertions.extend(assertions);
        self.tables.push(Rc::clone(&shared));
        Ok(shared)
    }

    /// Evaluate every assertion collected so far, in document order
    pub fn run(self, invoker: &mut dyn FixtureInvoker) -> DocumentReport {
        let run_id = self.context.run_id.clone();
        let span = tracing::info_span!("document", run_id = %run_id);
        let _guard = span.enter();

        let runner = AssertionRunner::new(self.assertions);
        tracing::info!(assertions = runner.len(), "running document");
        let outcomes = runner.run(invoker);
        let summary = self.context.summary();
        tracing::info!(%summary, "document finished");

        DocumentReport {
            run_id,
            summary,
            outcomes,
        }
    }
}

impl Default for TestDocument {
    fn default() -> Self {
        Self::new()
    }
}

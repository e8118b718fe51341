//! Child interpreter factory.
//!
//! Interpreters are selected by an explicit [`TableKind`] tag. A scenario
//! body runs with its caller's kind when the factory knows that kind and
//! with the configured default kind otherwise.

use crate::assertion::Assertion;
use crate::config;
use crate::context::TestContext;
use crate::error::{Result, ScenaError};
use crate::table::SharedTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Type tag of a table interpreter (ex: "script")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableKind(String);

impl TableKind {
    pub fn new(kind: impl Into<String>) -> Self {
        TableKind(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableKind {
    fn from(kind: &str) -> Self {
        TableKind::new(kind)
    }
}

/// The calling side of a scenario invocation
pub struct CallSite {
    pub table: SharedTable,
    pub table_id: String,
    pub kind: TableKind,
    /// Row of `table` the call was written on
    pub row: usize,
    pub context: Rc<dyn TestContext>,
    pub factory: Rc<InterpreterFactory>,
}

/// Everything a constructor needs to build a child interpreter
pub struct ChildSpec {
    pub kind: TableKind,
    pub table: SharedTable,
    pub table_id: String,
    pub parent: Option<SharedTable>,
    pub context: Rc<dyn TestContext>,
    pub factory: Rc<InterpreterFactory>,
}

/// A table interpreter that can run a scenario body
pub trait ChildInterpreter {
    fn kind(&self) -> &TableKind;

    fn table(&self) -> SharedTable;

    /// Table this interpreter was created for, if nested
    fn parent_table(&self) -> Option<SharedTable>;

    fn context(&self) -> Rc<dyn TestContext>;

    /// Turn the table's rows into assertions, in row order
    fn assertions(&mut self) -> Result<Vec<Assertion>>;
}

pub type Constructor = fn(ChildSpec) -> Result<Box<dyn ChildInterpreter>>;

#[derive(Default)]
pub struct InterpreterFactory {
    constructors: HashMap<TableKind, Constructor>,
}

impl InterpreterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for `kind`
    pub fn with(mut self, kind: impl Into<TableKind>, constructor: Constructor) -> Self {
        self.constructors.insert(kind.into(), constructor);
        self
    }

    pub fn supports(&self, kind: &TableKind) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Kind a scenario body should run with when called from `caller`
    pub fn child_kind_for(&self, caller: &TableKind) -> TableKind {
        if self.supports(caller) {
            caller.clone()
        } else {
            config::default_child_kind()
        }
    }

    pub fn create(&self, spec: ChildSpec) -> Result<Box<dyn ChildInterpreter>> {
        let constructor = self.constructors.get(&spec.kind).ok_or_else(|| {
            ScenaError::TableCreation(format!("no interpreter registered for kind '{}'", spec.kind))
        })?;
        constructor(spec)
    }
}

//! Reference script interpreter, kind `script`.
//!
//! Small and deterministic: just enough row semantics to drive scenarios
//! end to end. Row 0 is the table header and is skipped.
//!
//! | first cell    | row                                         |
//! |---------------|---------------------------------------------|
//! | `note`, empty | ignored                                     |
//! | `check`       | action cells, then the expected value       |
//! | `ensure`      | action must return `true`                   |
//! | `reject`      | action must return `false`                  |
//! | anything else | scenario call if one matches, else action   |
//!
//! Action cells alternate name fragments and arguments, like an
//! alternating scenario header.

use scena_core::{
    Assertion, CallSite, ChildInterpreter, ChildSpec, ExecutionResult, Expectation,
    InterpreterFactory, Instruction, Result, ReturnValue, SharedTable, TableKind, TestContext,
};
use scena_in::normalizer;
use std::rc::Rc;

pub const SCRIPT_KIND: &str = "script";

/// Fixture instance every script action is sent to
pub const SCRIPT_ACTOR: &str = "scriptTableActor";

pub struct ScriptTable {
    kind: TableKind,
    table: SharedTable,
    table_id: String,
    parent: Option<SharedTable>,
    context: Rc<dyn TestContext>,
    factory: Rc<InterpreterFactory>,
    instruction_count: usize,
}

impl ScriptTable {
    pub fn new(spec: ChildSpec) -> Self {
        Self {
            kind: spec.kind,
            table: spec.table,
            table_id: spec.table_id,
            parent: spec.parent,
            context: spec.context,
            factory: spec.factory,
            instruction_count: 0,
        }
    }

    /// Constructor registered with an `InterpreterFactory`
    pub fn build(spec: ChildSpec) -> Result<Box<dyn ChildInterpreter>> {
        Ok(Box::new(Self::new(spec)))
    }

    fn next_id(&mut self) -> String {
        let id = format!("{}_{}", self.table_id, self.instruction_count);
        self.instruction_count += 1;
        id
    }

    fn row_assertions(&mut self, row: usize, cells: &[String]) -> Result<Vec<Assertion>> {
        let keyword = cells.first().map(|c| c.trim().to_lowercase()).unwrap_or_default();
        match keyword.as_str() {
            "" | "note" => Ok(Vec::new()),
            "check" if cells.len() >= 3 => {
                let expected = cells[cells.len() - 1].clone();
                let action = &cells[1..cells.len() - 1];
                Ok(vec![self.action(row, action, Judge::Check(expected))])
            }
            "ensure" if cells.len() >= 2 => Ok(vec![self.action(row, &cells[1..], Judge::Ensure)]),
            "reject" if cells.len() >= 2 => Ok(vec![self.action(row, &cells[1..], Judge::Reject)]),
            _ => match self.scenario_call(row, cells)? {
                Some(assertions) => Ok(assertions),
                None => Ok(vec![self.action(row, cells, Judge::Action)]),
            },
        }
    }

    /// Resolve a row as a scenario call: first by the name its alternating
    /// cells spell, then by matching the row text against every scenario.
    fn scenario_call(&self, row: usize, cells: &[String]) -> Result<Option<Vec<Assertion>>> {
        let (fragments, args) = split_alternating(cells);
        let name = normalizer::class_name(fragments.join(" ").trim());
        if let Some(scenario) = self.context.scenario(&name) {
            return scenario.call_positional(&args, &self.call_site(row)).map(Some);
        }

        let phrase = cells.join(" ");
        let phrase = phrase.trim();
        for scenario in self.context.scenarios() {
            if let Some(args) = scenario.match_parameters(phrase) {
                return scenario.call_positional(&args, &self.call_site(row)).map(Some);
            }
        }
        Ok(None)
    }

    fn call_site(&self, row: usize) -> CallSite {
        CallSite {
            table: Rc::clone(&self.table),
            table_id: self.table_id.clone(),
            kind: self.kind.clone(),
            row,
            context: Rc::clone(&self.context),
            factory: Rc::clone(&self.factory),
        }
    }

    fn action(&mut self, row: usize, cells: &[String], judge: Judge) -> Assertion {
        let (fragments, args) = split_alternating(cells);
        let method = normalizer::method_name(fragments.join(" ").trim());
        let instruction = Instruction::call(self.next_id(), SCRIPT_ACTOR, method, args);
        Assertion::new(
            instruction,
            Box::new(RowExpectation {
                judge,
                row,
                table: Rc::clone(&self.table),
                context: Rc::clone(&self.context),
            }),
        )
    }
}

impl ChildInterpreter for ScriptTable {
    fn kind(&self) -> &TableKind {
        &self.kind
    }

    fn table(&self) -> SharedTable {
        Rc::clone(&self.table)
    }

    fn parent_table(&self) -> Option<SharedTable> {
        self.parent.clone()
    }

    fn context(&self) -> Rc<dyn TestContext> {
        Rc::clone(&self.context)
    }

    fn assertions(&mut self) -> Result<Vec<Assertion>> {
        // Scenario calls attach child tables to this table, so no borrow may
        // be held while rows are turned into assertions.
        let rows: Vec<Vec<String>> = {
            let table = self.table.borrow();
            (1..table.row_count())
                .filter_map(|row| table.row(row).map(<[String]>::to_vec))
                .collect()
        };

        let mut assertions = Vec::new();
        for (offset, cells) in rows.iter().enumerate() {
            assertions.extend(self.row_assertions(offset + 1, cells)?);
        }
        Ok(assertions)
    }
}

/// Even cells are name fragments, odd cells are arguments
fn split_alternating(cells: &[String]) -> (Vec<&str>, Vec<String>) {
    let mut fragments = Vec::new();
    let mut args = Vec::new();
    for (i, cell) in cells.iter().enumerate() {
        if i % 2 == 0 {
            fragments.push(cell.as_str());
        } else {
            args.push(cell.trim().to_string());
        }
    }
    (fragments, args)
}

enum Judge {
    Check(String),
    Ensure,
    Reject,
    Action,
}

struct RowExpectation {
    judge: Judge,
    row: usize,
    table: SharedTable,
    context: Rc<dyn TestContext>,
}

impl RowExpectation {
    fn judge(&self, returned: &ReturnValue) -> Option<ExecutionResult> {
        let value = match returned {
            ReturnValue::Exception(_) => return Some(ExecutionResult::Error),
            ReturnValue::Void => None,
            ReturnValue::Value(v) => Some(v.trim()),
        };
        let pass_if = |ok: bool| {
            if ok {
                ExecutionResult::Pass
            } else {
                ExecutionResult::Fail
            }
        };
        match &self.judge {
            Judge::Check(expected) => Some(pass_if(value == Some(expected.trim()))),
            Judge::Ensure => Some(pass_if(value == Some("true"))),
            Judge::Reject => Some(pass_if(value == Some("false"))),
            Judge::Action => match value {
                Some("true") => Some(ExecutionResult::Pass),
                Some("false") => Some(ExecutionResult::Fail),
                _ => None,
            },
        }
    }
}

impl Expectation for RowExpectation {
    fn evaluate(&self, returned: &ReturnValue) -> Option<ExecutionResult> {
        let result = self.judge(returned)?;
        self.context.increment(result);
        self.table.borrow_mut().mark_row(self.row, result);
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_split_alternating() {
        let row = cells(&["login as", "bob", "with", " secret "]);
        let (fragments, args) = split_alternating(&row);
        assert_eq!(fragments, vec!["login as", "with"]);
        assert_eq!(args, vec!["bob", "secret"]);
    }

    #[test]
    fn test_judges() {
        let table = scena_core::Table::default().shared();
        let context: Rc<dyn TestContext> = Rc::new(scena_core::DocumentContext::new());
        let expectation = |judge| RowExpectation {
            judge,
            row: 1,
            table: Rc::clone(&table),
            context: Rc::clone(&context),
        };
        let value = |v: &str| ReturnValue::Value(v.to_string());

        let check = expectation(Judge::Check("7".into()));
        assert_eq!(check.judge(&value("7")), Some(ExecutionResult::Pass));
        assert_eq!(check.judge(&value("8")), Some(ExecutionResult::Fail));
        assert_eq!(check.judge(&ReturnValue::Void), Some(ExecutionResult::Fail));
        assert_eq!(
            check.judge(&ReturnValue::Exception("boom".into())),
            Some(ExecutionResult::Error)
        );

        assert_eq!(expectation(Judge::Ensure).judge(&value("true")), Some(ExecutionResult::Pass));
        assert_eq!(expectation(Judge::Reject).judge(&value("true")), Some(ExecutionResult::Fail));
        assert_eq!(expectation(Judge::Action).judge(&ReturnValue::Void), None);
        assert_eq!(expectation(Judge::Action).judge(&value("false")), Some(ExecutionResult::Fail));
    }
}

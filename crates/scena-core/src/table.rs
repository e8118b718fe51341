//! Table model: a grid of text cells with per-row results and child tables.
//!
//! Scenario bodies are never mutated in place; every call works on a clone
//! produced by [`Table::as_template`].

use crate::error::Result;
use crate::summary::ExecutionResult;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A table shared between its interpreter and the tables that render it
pub type SharedTable = Rc<RefCell<Table>>;

#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
    row_results: BTreeMap<usize, ExecutionResult>,
    children: Vec<(usize, SharedTable)>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            row_results: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Build a table from anything that looks like rows of strings
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn shared(self) -> SharedTable {
        Rc::new(RefCell::new(self))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in `row`, zero when the row does not exist
    pub fn column_count(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
    }

    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Clone the table, passing every cell through `substitute`.
    ///
    /// The first substitution error aborts the clone; no partially
    /// substituted table is returned. Results and child tables are not
    /// carried over.
    pub fn as_template<F>(&self, mut substitute: F) -> Result<Table>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let mut rows = Vec::with_capacity(self.rows.len());
        for cells in &self.rows {
            let mut new_cells = Vec::with_capacity(cells.len());
            for content in cells {
                new_cells.push(substitute(content)?);
            }
            rows.push(new_cells);
        }
        Ok(Table::new(rows))
    }

    /// Attach a nested table for rendering under `row`
    pub fn add_child_table(&mut self, child: SharedTable, row: usize) {
        self.children.push((row, child));
    }

    pub fn child_tables(&self, row: usize) -> Vec<SharedTable> {
        self.children
            .iter()
            .filter(|(r, _)| *r == row)
            .map(|(_, child)| Rc::clone(child))
            .collect()
    }

    /// Stamp a whole row with a verdict
    pub fn mark_row(&mut self, row: usize, result: ExecutionResult) {
        self.row_results.insert(row, result);
    }

    pub fn row_result(&self, row: usize) -> Option<ExecutionResult> {
        self.row_results.get(&row).copied()
    }
}

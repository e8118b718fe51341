//! Scenario header parsing.
//!
//! Two header layouts are accepted:
//! - parameterized: `scenario | add _ and _ | x, y, sum?`
//! - alternating:   `scenario | add | x | and | y | giving | sum? |`
//!
//! Arguments ending in `?` are outputs, everything else is an input. Inputs
//! keep declaration order so positional calls can bind them.

use crate::matcher::InvocationMatcher;
use crate::normalizer;
use crate::template::NameTemplate;
use scena_core::{Result, ScenaError, Table};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name and parameter slots declared by a scenario table's first row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioHeader {
    pub name: String,
    pub inputs: Vec<String>,
    pub outputs: HashSet<String>,
    pub parameterized: bool,
    /// Raw name cells as written: one cell when parameterized, otherwise
    /// every name fragment of the alternating layout
    pub name_cells: Vec<String>,
}

impl ScenarioHeader {
    pub fn parse(table: &Table) -> Result<Self> {
        let columns = table.column_count(0);
        if columns <= 1 {
            return Err(ScenaError::syntax("Scenario tables must have a name."));
        }

        let first_name_cell = table.cell(1, 0).unwrap_or_default();
        let template = NameTemplate::parse(first_name_cell);

        let mut header = ScenarioHeader {
            name: String::new(),
            inputs: Vec::new(),
            outputs: HashSet::new(),
            parameterized: template.is_parameterized(),
            name_cells: Vec::new(),
        };

        if header.parameterized {
            header.name = normalizer::class_name(&template.unparameterized());
            header.name_cells.push(first_name_cell.to_string());
            if let Some(arguments) = table.cell(2, 0) {
                for argument in argument_tokens(arguments) {
                    header.add_argument(argument);
                }
            }
        } else {
            header.name_cells = (1..columns)
                .step_by(2)
                .filter_map(|col| table.cell(col, 0))
                .map(str::to_string)
                .collect();
            header.name = normalizer::class_name(header.name_cells.join(" ").trim());
            for col in (2..columns).step_by(2) {
                if let Some(argument) = table.cell(col, 0) {
                    header.add_argument(argument);
                }
            }
        }

        tracing::debug!(
            scenario = %header.name,
            inputs = ?header.inputs,
            outputs = header.outputs.len(),
            parameterized = header.parameterized,
            "parsed scenario header"
        );
        Ok(header)
    }

    fn add_argument(&mut self, raw: &str) {
        let argument = raw.trim();
        match argument.strip_suffix('?') {
            Some(output) => {
                self.outputs.insert(normalizer::method_name(output));
            }
            None => self.inputs.push(normalizer::method_name(argument)),
        }
    }

    pub fn is_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|input| input == name)
    }

    /// Template calling rows are matched against.
    ///
    /// `None` for an alternating header without inputs: such a scenario is
    /// only reachable by name.
    pub fn name_template(&self) -> Option<NameTemplate> {
        if self.parameterized {
            self.name_cells.first().map(|cell| NameTemplate::parse(cell))
        } else if !self.inputs.is_empty() {
            Some(NameTemplate::alternating(&self.name_cells))
        } else {
            None
        }
    }

    pub fn invocation_matcher(&self) -> Result<Option<InvocationMatcher>> {
        self.name_template().map(InvocationMatcher::new).transpose()
    }
}

/// Comma-separated argument tokens. Trailing empty tokens are dropped;
/// an empty token between two commas is kept and declares an empty input.
fn argument_tokens(cell: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = cell.split(',').collect();
    while tokens.last().map_or(false, |t| t.trim().is_empty()) {
        tokens.pop();
    }
    tokens
}

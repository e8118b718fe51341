//! Scena-IN: from table text to scenario declarations
//!
//! This crate reads what a test author writes into a scenario header and
//! into calling rows:
//!
//! - `normalizer`: cell text to identifier form
//! - `template`: parameterized names as literal/placeholder tokens
//! - `header`: a scenario table's first row to name, inputs and outputs
//! - `matcher`: invocation phrases against a scenario name
//!
//! # Example
//!
//! ```ignore
//! use scena_core::Table;
//! use scena_in::ScenarioHeader;
//!
//! let table = Table::from_rows(vec![vec!["scenario", "add _ and _", "x, y"]]);
//! let header = ScenarioHeader::parse(&table)?;
//! let matcher = header.invocation_matcher()?.unwrap();
//! assert_eq!(matcher.captures("add 3 and 4"), Some(vec!["3".into(), "4".into()]));
//! ```

pub mod header;
pub mod matcher;
pub mod normalizer;
pub mod template;

pub use header::ScenarioHeader;
pub use matcher::InvocationMatcher;
pub use template::{NameTemplate, Token};

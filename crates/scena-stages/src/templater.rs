//! Body templating: substitute call arguments into a clone of the
//! scenario body.
//!
//! Both `@name` and `@{name}` are replaced, everywhere they occur. Longer
//! names are substituted first so `@total` is not eaten by an input `tot`.
//! An input with an empty name has no placeholder.

use crate::binder::{not_an_input, CallBinding};
use scena_core::{Result, Table};

/// Clone `body` with every placeholder of a bound input replaced.
///
/// Fails before touching any cell if the binding names something that is
/// not a declared input.
pub fn expand_body(body: &Table, inputs: &[String], binding: &CallBinding) -> Result<Table> {
    let mut names: Vec<&str> = binding.iter().map(|(name, _)| name).collect();
    names.sort_unstable();
    if let Some(name) = names.into_iter().find(|name| !inputs.iter().any(|i| i == name)) {
        return Err(not_an_input(name));
    }

    let mut pairs: Vec<(&str, &str)> = binding.iter().filter(|(name, _)| !name.is_empty()).collect();
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

    body.as_template(|content| Ok(substitute(content, &pairs)))
}

/// Replace `@{name}` and `@name` for each pair, in order
pub fn substitute(content: &str, pairs: &[(&str, &str)]) -> String {
    if !content.contains('@') {
        return content.to_string();
    }
    let mut result = content.to_string();
    for (name, value) in pairs {
        result = result.replace(&format!("@{{{}}}", name), value);
        result = result.replace(&format!("@{}", name), value);
    }
    result
}

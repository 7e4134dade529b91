//! Iterator-script artifact generation.
//!
//! The workflow engine runs a small JavaScript snippet that steps an
//! iterator variable over a list between loop iterations. The snippet is
//! produced by substituting three literal placeholder tokens in a stock
//! template; downstream tooling depends on those exact token strings, so
//! substitution is plain text replacement, never a template engine.

use serde_json::Value;

/// Replaced with the JSON-encoded list.
pub const LIST_TOKEN: &str = "### LIST ###";
/// Replaced with the name of the iterator index variable.
pub const ITERATOR_VARIABLE_TOKEN: &str = "### ITERATOR VARIABLE ###";
/// Replaced with the name of the current-element variable.
pub const ITERATOR_ELEMENT_TOKEN: &str = "### ITERATOR ELEMENT ###";

const ITERATOR_SCRIPT_TEMPLATE: &str = include_str!("templates/iterator_script.js");

/// Render the iterator script for the given list and variable names.
///
/// `list` is embedded as a JSON array inside a `JSON.parse('...')` call,
/// exactly as the stock template expects.
pub fn render_iterator_script(
    list: &[Value],
    iterator_variable: &str,
    iterator_element: &str,
) -> String {
    let encoded = Value::Array(list.to_vec()).to_string();
    ITERATOR_SCRIPT_TEMPLATE
        .replace(LIST_TOKEN, &encoded)
        .replace(ITERATOR_VARIABLE_TOKEN, iterator_variable)
        .replace(ITERATOR_ELEMENT_TOKEN, iterator_element)
}

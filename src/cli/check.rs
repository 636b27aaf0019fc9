//! Validate, render and tokenize kaql filters

use super::CliError;
use crate::{Lexer, Node, Query};

/// Options for the parse command
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// The filter to parse
    pub query: String,
    /// Print the full syntax tree instead of the canonical rendering
    pub tree: bool,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// The filter parsed
    SyntaxValid,
    /// The filter was blank
    Empty,
}

const EMPTY_QUERY: &str = "(empty query)";

/// Validate a filter without printing it
pub fn execute_check(query: &str) -> Result<CheckResult, CliError> {
    let query = Query::parse(query)?;

    if query.is_empty() {
        Ok(CheckResult::Empty)
    } else {
        Ok(CheckResult::SyntaxValid)
    }
}

/// Parse a filter and render it, fully parenthesized or as a tree
pub fn execute_parse(options: &ParseOptions) -> Result<String, CliError> {
    let query = Query::parse(&options.query)?;

    let rendered = match query.root() {
        None => EMPTY_QUERY.to_string(),
        Some(node) if options.tree => render_tree(node),
        Some(node) => node.to_string(),
    };
    Ok(rendered)
}

/// List the tokens of a filter, one `offset<TAB>label<TAB>text` line each
///
/// Stops after the first illegal token, which is listed.
pub fn execute_tokens(query: &str) -> String {
    Lexer::tokenize(query)
        .into_iter()
        .map(|(pos, token, text)| format!("{}\t{}\t{}\n", pos, token, text))
        .collect()
}

/// Outline of a tree, one node per line, children indented under their parent
fn render_tree(root: &Node) -> String {
    let mut lines = Vec::new();
    let mut stack = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        match node {
            Node::Identifier { name, pos } => {
                lines.push(format!("{}Identifier {:?} at {}", indent, name, pos));
            }
            Node::Literal { value, kind, pos } => {
                lines.push(format!("{}{:?} {:?} at {}", indent, kind, value, pos));
            }
            Node::Binary { op, left, right } => {
                lines.push(format!("{}Binary {:?}", indent, op));
                stack.push((right.as_ref(), depth + 1));
                stack.push((left.as_ref(), depth + 1));
            }
            Node::Unary { op, operand } => {
                lines.push(format!("{}Unary {:?}", indent, op));
                stack.push((operand.as_ref(), depth + 1));
            }
        }
    }

    lines.join("\n")
}

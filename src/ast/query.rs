use std::fmt;

use tracing::debug;

use crate::{ParseError, ast::Node, parser::Parser};

/// A parsed filter.
///
/// Blank input produces an empty query, which is not an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Parsed expression, `None` for an empty query
    root: Option<Node>,
}

impl Query {
    /// Parse `src` into a query.
    pub fn parse(src: &str) -> Result<Query, ParseError> {
        let root = Parser::new().parse(src)?;
        debug!(empty = root.is_none(), "parsed query");
        Ok(Query { root })
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    /// Hook for an evaluation engine.
    ///
    /// Matching semantics are not defined yet, so every object matches,
    /// including for empty queries.
    pub fn matches(&self, _object: &serde_json::Value) -> bool {
        true
    }
}

impl From<Option<Node>> for Query {
    fn from(root: Option<Node>) -> Self {
        Query { root }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(node) => write!(f, "{}", node),
            None => Ok(()),
        }
    }
}

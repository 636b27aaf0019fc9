pub mod ast;
pub mod cli;
pub mod lexer;
pub mod parser;

pub use ast::{BinOp, LiteralKind, Node, Query, Token, UnaryOp};
pub use lexer::{Lexeme, Lexer};
pub use parser::{MAX_DEPTH, ParseError, Parser, rotate};

/// Parse a KaQL filter.
///
/// # Examples
///
/// ```
/// let query = kaql::parse("property == 1 || property == 2 && property == 3").unwrap();
/// assert_eq!(
///     query.to_string(),
///     "((property == 1) || ((property == 2) && (property == 3)))"
/// );
///
/// assert!(kaql::parse("   ").unwrap().is_empty());
/// assert_eq!(
///     kaql::parse("property ==").unwrap_err().to_string(),
///     "unexpected EOF at 11"
/// );
/// ```
pub fn parse(src: &str) -> Result<Query, ParseError> {
    Query::parse(src)
}

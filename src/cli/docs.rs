//! Reference documentation for the kaql CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Syntax,
    Operators,
    Errors,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" | "precedence" => Some(Self::Operators),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"KAQL DOCUMENTATION

KaQL is a small boolean filter language. A filter compares object properties
with values and combines the comparisons with && and ||.

DOCUMENTATION TOPICS

  syntax            Identifiers, property paths, numbers, strings, grouping
  operators         Comparison and logical operators, precedence
  errors            How parse errors are reported

QUICK REFERENCE

  status == "active"            String comparison
  owner.age >= 18               Dotted property path
  a == 1 || b == 2 && c == 3    && binds tighter than ||
  (a == 1 || b == 2) && c == 3  Parentheses override precedence

Run 'kaql doc <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    match DocTopic::from_name(name) {
        Some(DocTopic::Syntax) => Ok(SYNTAX_DOC),
        Some(DocTopic::Operators) => Ok(OPERATORS_DOC),
        Some(DocTopic::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

IDENTIFIERS
  Start with a letter or underscore; continue with letters, digits,
  underscores or dots. A dotted identifier is a property path.

    property
    property.children
    _internal

  true, false and null are identifiers as well.

NUMBERS
  Digits with at most one decimal point. A leading point is allowed.
  The text is kept exactly as written.

    1    1.1    .5

  A minus sign is a separate operator: -1 is negation applied to 1.

STRINGS
  Double-quoted, no escape sequences.

    "value"

GROUPING
  Parentheses group any expression.

    (a == 1 || b == 2) && c == 3

WHITESPACE
  Only the space character separates tokens. Tabs and newlines are errors.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON (binds tightest)
  ==   equal
  !=   not equal
  <    less than
  <=   less than or equal
  >    greater than
  >=   greater than or equal

LOGICAL
  &&   and
  ||   or (binds loosest)

UNARY
  -    negation, applies to the operand directly after it

PRECEDENCE
  -  >  comparisons  >  &&  >  ||

  Operators of the same precedence group left to right:

    a || b || c      is   (a || b) || c
"#;

const ERRORS_DOC: &str = r#"ERRORS

Parsing stops at the first problem and reports the offending token and its
0-based character offset:

    unexpected EOF at 11          property ==
    unexpected ILLEGAL at 9       property = 1
    unexpected = at 0             == 1
    unexpected ) at 1             a)

Token labels: IDENT, NUMBER, STRING, EOF, ILLEGAL, or the operator itself.
ILLEGAL covers characters that start no token (including tabs and newlines),
a lone =, !, & or |, and a string missing its closing quote.

Parentheses and minus signs nest at most 256 deep; the ( or - that goes
past the limit is reported as the unexpected token.

A blank filter is not an error; it is an empty query that matches everything.
"#;

use std::{fmt, mem, str::FromStr};

use rust_decimal::Decimal;

use crate::ast::{BinOp, UnaryOp};

/// Kind of a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// Decimal number, e.g. `1`, `1.1`, `.5`
    Number,
    /// Double-quoted string, stored without its quotes
    String,
}

/// Abstract Syntax Tree node representing a parsed filter expression.
///
/// A finished tree is precedence-correct and is never mutated again; it is
/// handed as-is to whatever evaluates the filter.
///
/// Long operator chains make deep left spines, so dropping and rendering a
/// tree walk it with an explicit stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Bareword or dotted property path
    ///
    /// The reserved words `true`, `false` and `null` are identifiers too.
    ///
    /// # Examples
    /// ```text
    /// property
    /// property.children
    /// null
    /// ```
    Identifier { name: String, pos: usize },

    /// Number or string literal
    ///
    /// Numbers keep their source text verbatim; strings keep the text
    /// between the quotes.
    ///
    /// # Examples
    /// ```text
    /// 1.1
    /// "value"
    /// ```
    Literal {
        value: String,
        kind: LiteralKind,
        pos: usize,
    },

    /// Binary operation (comparison or logical)
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Unary operation
    ///
    /// # Example
    /// ```text
    /// -1
    /// ```
    Unary { op: UnaryOp, operand: Box<Node> },
}

impl Node {
    pub fn identifier(name: impl Into<String>, pos: usize) -> Self {
        Node::Identifier {
            name: name.into(),
            pos,
        }
    }

    pub fn number(value: impl Into<String>, pos: usize) -> Self {
        Node::Literal {
            value: value.into(),
            kind: LiteralKind::Number,
            pos,
        }
    }

    pub fn string(value: impl Into<String>, pos: usize) -> Self {
        Node::Literal {
            value: value.into(),
            kind: LiteralKind::String,
            pos,
        }
    }

    pub fn binary(op: BinOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Stand-in left behind when a child is moved out of its parent.
    pub(crate) fn placeholder() -> Self {
        Node::Identifier {
            name: String::new(),
            pos: 0,
        }
    }

    /// Move the children of an operation out, leaving placeholders.
    fn take_children(&mut self, into: &mut Vec<Node>) {
        match self {
            Node::Binary { left, right, .. } => {
                into.push(mem::replace(&mut **left, Node::placeholder()));
                into.push(mem::replace(&mut **right, Node::placeholder()));
            }
            Node::Unary { operand, .. } => {
                into.push(mem::replace(&mut **operand, Node::placeholder()));
            }
            Node::Identifier { .. } | Node::Literal { .. } => {}
        }
    }

    /// Source offset of an identifier or literal. Operations carry none.
    pub fn pos(&self) -> Option<usize> {
        match self {
            Node::Identifier { pos, .. } | Node::Literal { pos, .. } => Some(*pos),
            Node::Binary { .. } | Node::Unary { .. } => None,
        }
    }

    /// Numeric value of a number literal, or of a negated one.
    ///
    /// Parsing never coerces numbers; this is for evaluators that want one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Node::Literal {
                value,
                kind: LiteralKind::Number,
                ..
            } => parse_decimal(value),
            Node::Unary {
                op: UnaryOp::Minus,
                operand,
            } => operand.as_decimal().map(|d| -d),
            _ => None,
        }
    }
}

// `.5` and `1.` are valid lexemes but not valid decimal text.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.strip_suffix('.').unwrap_or(raw);
    if trimmed.starts_with('.') {
        Decimal::from_str(&format!("0{trimmed}")).ok()
    } else {
        Decimal::from_str(trimmed).ok()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);

        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(self)];

        while let Some(piece) = stack.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };

            match node {
                Node::Identifier { name, .. } => write!(f, "{}", name)?,
                Node::Literal {
                    value,
                    kind: LiteralKind::Number,
                    ..
                } => write!(f, "{}", value)?,
                Node::Literal {
                    value,
                    kind: LiteralKind::String,
                    ..
                } => write!(f, "\"{}\"", value)?,
                Node::Binary { op, left, right } => {
                    // Pushed in reverse: `(left op right)`
                    stack.push(Piece::Text(")"));
                    stack.push(Piece::Node(right.as_ref()));
                    stack.push(Piece::Text(" "));
                    stack.push(Piece::Text(op.symbol()));
                    stack.push(Piece::Text(" "));
                    stack.push(Piece::Node(left.as_ref()));
                    stack.push(Piece::Text("("));
                }
                Node::Unary { op, operand } => {
                    f.write_str(op.symbol())?;
                    stack.push(Piece::Node(operand.as_ref()));
                }
            }
        }

        Ok(())
    }
}

#[test]
fn test_display_nests_fully_parenthesized() {
    let node = Node::binary(
        BinOp::Or,
        Node::binary(BinOp::Eq, Node::identifier("a", 0), Node::string("x", 5)),
        Node::unary(UnaryOp::Minus, Node::number("1", 13)),
    );
    assert_eq!(node.to_string(), r#"((a == "x") || -1)"#);
}

#[test]
fn test_deep_left_spine_renders_and_drops() {
    let mut node = Node::identifier("a", 0);
    for i in 1..50_000 {
        node = Node::binary(BinOp::And, node, Node::identifier("a", i));
    }

    let rendered = node.to_string();
    assert!(rendered.starts_with("((((a && a)"));
    assert!(rendered.ends_with("&& a)"));
    assert_eq!(rendered.matches("&&").count(), 49_999);
    drop(node);
}

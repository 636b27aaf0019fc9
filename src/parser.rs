use std::mem;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{BinOp, Node, Token, UnaryOp},
    lexer::Lexer,
};

/// Deepest nesting of parentheses and negations the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Errors that can occur while parsing a filter.
///
/// Parsing stops at the first error; malformed lexemes (a lone `=`, an
/// unterminated string) surface here as an `ILLEGAL` token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected {token} at {pos}")]
    UnexpectedToken { token: Token, pos: usize },
}

impl ParseError {
    pub fn token(&self) -> Token {
        match self {
            ParseError::UnexpectedToken { token, .. } => *token,
        }
    }

    /// Character offset of the offending token.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { pos, .. } => *pos,
        }
    }
}

/// Left spine of a tree under construction.
///
/// `frames` are the binary nodes from the root down to `leftmost`, outermost
/// first; each holds its operator and right operand. Precedence never
/// decreases going down the spine.
struct Spine {
    leftmost: Node,
    frames: Vec<(BinOp, Node)>,
}

impl Spine {
    fn new(leftmost: Node) -> Self {
        Spine {
            leftmost,
            frames: Vec::new(),
        }
    }

    /// Split a finished tree along its left spine.
    fn from_tree(mut node: Node) -> Self {
        let mut frames = Vec::new();

        while let Node::Binary { op, left, right } = &mut node {
            let op = *op;
            let right = mem::replace(&mut **right, Node::placeholder());
            let left = mem::replace(&mut **left, Node::placeholder());
            frames.push((op, right));
            node = left;
        }

        Spine {
            leftmost: node,
            frames,
        }
    }

    /// Turn `op(left, tree)` into a precedence-correct tree.
    ///
    /// The old leftmost node, together with every frame at the bottom of the
    /// spine that binds tighter than `op`, becomes the right operand of `op`,
    /// and `op(left, ..)` is the new bottom of the spine. Equal precedence
    /// groups left.
    fn prepend(&mut self, left: Node, op: BinOp) {
        let mut right = mem::replace(&mut self.leftmost, left);
        let mut rotated = 0;

        while let Some((inner, _)) = self.frames.last() {
            if inner.precedence() <= op.precedence() {
                break;
            }
            let Some((inner, inner_right)) = self.frames.pop() else {
                break;
            };
            right = Node::binary(inner, right, inner_right);
            rotated += 1;
        }

        if rotated > 0 {
            trace!(?op, rotated, "rotated below tighter operators");
        }
        self.frames.push((op, right));
    }

    fn into_node(self) -> Node {
        self.frames
            .into_iter()
            .rev()
            .fold(self.leftmost, |node, (op, right)| Node::binary(op, node, right))
    }
}

/// Restore operator precedence at the root of `node`.
///
/// If the root operator binds at least as tightly as the operators on the
/// left spine of its right operand, it is rotated down that spine:
/// `op(x, inner(yl, yr))` becomes `inner(op(x, yl), yr)`, repeatedly. The
/// right operand is expected to be precedence-correct itself, as every tree
/// the parser builds is. A tree without a precedence inversion comes back
/// unchanged.
pub fn rotate(mut node: Node) -> Node {
    let (op, left, right) = match &mut node {
        Node::Binary { op, left, right } => (
            *op,
            mem::replace(&mut **left, Node::placeholder()),
            mem::replace(&mut **right, Node::placeholder()),
        ),
        _ => return node,
    };

    let mut spine = Spine::from_tree(right);
    spine.prepend(left, op);
    spine.into_node()
}

/// Recursive-descent parser for KaQL.
///
/// ```text
/// expr := node (operator expr)?
/// node := identifier | literal | '-' node | '(' expr ')'
/// ```
///
/// An operator chain is read as a flat list and then assembled from the
/// right, the way a right-recursive parse would build it, with every new
/// operator rotated into place. Parentheses and negation nest by recursion,
/// up to [`MAX_DEPTH`] levels. A parser can be reused for any number of
/// inputs, one at a time.
pub struct Parser {
    lexer: Lexer,
    pos: usize,
    current_token: Token,
    literal: String,
    depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(""),
            pos: 0,
            current_token: Token::EndOfInput,
            literal: String::new(),
            depth: 0,
        }
    }

    /// Parse `src`. Blank input yields `Ok(None)`.
    pub fn parse(&mut self, src: &str) -> Result<Option<Node>, ParseError> {
        debug!(len = src.len(), "parsing");
        self.lexer.reset(src);
        self.depth = 0;
        self.advance();

        if self.current_token == Token::EndOfInput {
            return Ok(None);
        }

        let expr = self.parse_expression()?;

        // A stray ')' ends the expression early
        if self.current_token != Token::EndOfInput {
            return Err(self.unexpected());
        }

        Ok(Some(expr))
    }

    fn advance(&mut self) {
        let (pos, token, literal) = self.lexer.scan();
        self.pos = pos;
        self.current_token = token;
        self.literal = literal;
    }

    fn unexpected(&self) -> ParseError {
        let error = ParseError::UnexpectedToken {
            token: self.current_token,
            pos: self.pos,
        };
        debug!(%error, "parse failed");
        error
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.unexpected());
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let first = self.parse_node()?;
        let mut rest = Vec::new();

        loop {
            match self.current_token {
                Token::EndOfInput | Token::RightParen => break,
                token => match BinOp::from_token(token) {
                    Some(op) => {
                        self.advance(); // Consume operator
                        rest.push((op, self.parse_node()?));
                    }
                    None => return Err(self.unexpected()),
                },
            }
        }

        Ok(assemble(first, rest))
    }

    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let node = match self.current_token {
            Token::Identifier => Node::identifier(mem::take(&mut self.literal), self.pos),
            Token::Number => Node::number(mem::take(&mut self.literal), self.pos),
            Token::String => Node::string(mem::take(&mut self.literal), self.pos),
            Token::Minus => {
                self.enter()?;
                self.advance();
                let operand = self.parse_node()?;
                self.leave();
                return Ok(Node::unary(UnaryOp::Minus, operand));
            }
            Token::LeftParen => {
                self.enter()?;
                self.advance();
                let inner = self.parse_expression()?;
                if self.current_token != Token::RightParen {
                    return Err(self.unexpected());
                }
                self.leave();
                inner
            }
            _ => return Err(self.unexpected()),
        };

        self.advance();
        Ok(node)
    }
}

/// Build `first op1 o1 op2 o2 ...` from the right, rotating each operator
/// into place as it is added. Operands are finished nodes, so a
/// parenthesized group is never regrouped.
fn assemble(first: Node, rest: Vec<(BinOp, Node)>) -> Node {
    let mut rest = rest.into_iter().rev();
    let Some((mut op, last)) = rest.next() else {
        return first;
    };

    let mut spine = Spine::new(last);
    for (prev_op, operand) in rest {
        spine.prepend(operand, op);
        op = prev_op;
    }
    spine.prepend(first, op);
    spine.into_node()
}

#[test]
fn test_rotate_tighter_operator_outside() {
    // a == (b && c) without the parentheses
    let tree = Node::binary(
        BinOp::Eq,
        Node::identifier("a", 0),
        Node::binary(BinOp::And, Node::identifier("b", 5), Node::identifier("c", 10)),
    );

    let expected = Node::binary(
        BinOp::And,
        Node::binary(BinOp::Eq, Node::identifier("a", 0), Node::identifier("b", 5)),
        Node::identifier("c", 10),
    );

    assert_eq!(rotate(tree), expected);
}

#[test]
fn test_rotate_is_noop_without_inversion() {
    let tree = Node::binary(
        BinOp::Or,
        Node::binary(BinOp::Eq, Node::identifier("a", 0), Node::number("1", 5)),
        Node::binary(BinOp::Eq, Node::identifier("b", 10), Node::number("2", 15)),
    );

    assert_eq!(rotate(tree.clone()), tree);
}

#[test]
fn test_rotate_leaves() {
    let leaf = Node::string("value", 3);
    assert_eq!(rotate(leaf.clone()), leaf);

    let negated = Node::unary(UnaryOp::Minus, Node::number("1", 1));
    assert_eq!(rotate(negated.clone()), negated);
}

#[test]
fn test_assemble_groups_equal_precedence_left() {
    let node = assemble(
        Node::identifier("a", 0),
        vec![
            (BinOp::Or, Node::identifier("b", 5)),
            (BinOp::Or, Node::identifier("c", 10)),
        ],
    );

    assert_eq!(node.to_string(), "((a || b) || c)");
}

#[test]
fn test_assemble_keeps_operands_whole() {
    // a == (b || c)
    let group = Node::binary(BinOp::Or, Node::identifier("b", 6), Node::identifier("c", 11));
    let node = assemble(Node::identifier("a", 0), vec![(BinOp::Eq, group)]);

    assert_eq!(node.to_string(), "(a == (b || c))");
}

#[test]
fn test_parser_reuse() {
    let mut parser = Parser::new();
    assert!(parser.parse("a ==").is_err());
    assert_eq!(parser.parse("b").unwrap(), Some(Node::identifier("b", 0)));
    assert_eq!(parser.parse("   ").unwrap(), None);
}

#[test]
fn test_depth_resets_between_parses() {
    let mut parser = Parser::new();
    let too_deep = format!("{}a", "(".repeat(MAX_DEPTH + 1));
    assert!(parser.parse(&too_deep).is_err());

    let deepest = format!("{}a{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
    assert_eq!(parser.parse(&deepest).unwrap(), Some(Node::identifier("a", MAX_DEPTH)));
}

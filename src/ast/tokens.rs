use std::fmt;

/// Lexical category of a scanned token.
///
/// The lexer pairs every token with the offset it starts at and, for
/// literals, the matched text. The kind itself carries no payload so it can
/// be copied around freely by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Character that starts no valid token, a lone `=`, `!`, `&` or `|`,
    /// or a string that runs into the end of input
    Illegal,

    /// End of input
    EndOfInput,

    // Literals
    /// Bareword or dotted property path
    ///
    /// # Examples
    /// ```text
    /// property
    /// property.children
    /// true
    /// ```
    Identifier,

    /// Decimal number, kept verbatim
    ///
    /// # Examples
    /// ```text
    /// 1
    /// 1.1
    /// .5
    /// ```
    Number,

    /// Double-quoted string
    String,

    // Operators
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,
    /// Equal (`==`)
    Eq,
    /// Not equal (`!=`)
    NotEq,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEq,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEq,

    // Delimiters
    /// Left parenthesis for grouping
    LeftParen,
    /// Right parenthesis
    RightParen,

    /// Unary minus
    Minus,
}

impl Token {
    /// Binding strength of an operator. Higher binds tighter; non-operators
    /// are `0`.
    pub fn precedence(self) -> u8 {
        match self {
            Token::Or => 1,
            Token::And => 2,
            Token::Eq
            | Token::NotEq
            | Token::Less
            | Token::LessEq
            | Token::Greater
            | Token::GreaterEq => 3,
            _ => 0,
        }
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Token::And
                | Token::Or
                | Token::Eq
                | Token::NotEq
                | Token::Less
                | Token::LessEq
                | Token::Greater
                | Token::GreaterEq
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(self, Token::Identifier | Token::Number | Token::String)
    }

    /// Short label used in diagnostics (`unexpected = at 9`).
    pub fn label(self) -> &'static str {
        match self {
            Token::Illegal => "ILLEGAL",
            Token::EndOfInput => "EOF",
            Token::Identifier => "IDENT",
            Token::Number => "NUMBER",
            Token::String => "STRING",
            Token::And => "&",
            Token::Or => "|",
            Token::Eq => "=",
            Token::NotEq => "!=",
            Token::Less => "<",
            Token::LessEq => "<=",
            Token::Greater => ">",
            Token::GreaterEq => ">=",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Minus => "-",
        }
    }

    /// Source spelling of operators and punctuation; the label otherwise.
    pub fn symbol(self) -> &'static str {
        match self {
            Token::And => "&&",
            Token::Or => "||",
            Token::Eq => "==",
            other => other.label(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[test]
fn test_precedence_table() {
    assert_eq!(Token::Or.precedence(), 1);
    assert_eq!(Token::And.precedence(), 2);
    for op in [
        Token::Eq,
        Token::NotEq,
        Token::Less,
        Token::LessEq,
        Token::Greater,
        Token::GreaterEq,
    ] {
        assert_eq!(op.precedence(), 3, "Failed for {:?}", op);
        assert!(op.is_operator());
    }
    assert_eq!(Token::Minus.precedence(), 0);
    assert!(!Token::Minus.is_operator());
    assert!(!Token::LeftParen.is_operator());
}

#[test]
fn test_literal_kinds() {
    assert!(Token::Identifier.is_literal());
    assert!(Token::Number.is_literal());
    assert!(Token::String.is_literal());
    assert!(!Token::EndOfInput.is_literal());
    assert!(!Token::And.is_literal());
}

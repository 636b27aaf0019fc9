use crate::ast::Token;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,

    // Comparison
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
}

impl BinOp {
    /// The operator a token stands for, if it is one.
    pub fn from_token(token: Token) -> Option<BinOp> {
        match token {
            Token::And => Some(BinOp::And),
            Token::Or => Some(BinOp::Or),
            Token::Eq => Some(BinOp::Eq),
            Token::NotEq => Some(BinOp::NotEq),
            Token::Less => Some(BinOp::Less),
            Token::LessEq => Some(BinOp::LessEq),
            Token::Greater => Some(BinOp::Greater),
            Token::GreaterEq => Some(BinOp::GreaterEq),
            _ => None,
        }
    }

    pub fn token(self) -> Token {
        match self {
            BinOp::And => Token::And,
            BinOp::Or => Token::Or,
            BinOp::Eq => Token::Eq,
            BinOp::NotEq => Token::NotEq,
            BinOp::Less => Token::Less,
            BinOp::LessEq => Token::LessEq,
            BinOp::Greater => Token::Greater,
            BinOp::GreaterEq => Token::GreaterEq,
        }
    }

    pub fn precedence(self) -> u8 {
        self.token().precedence()
    }

    pub fn symbol(self) -> &'static str {
        self.token().symbol()
    }
}

/// Unary operators. Negation is the only one the grammar admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation (`-`)
    Minus,
}

impl UnaryOp {
    pub fn token(self) -> Token {
        match self {
            UnaryOp::Minus => Token::Minus,
        }
    }

    pub fn symbol(self) -> &'static str {
        self.token().symbol()
    }
}

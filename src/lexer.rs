use tracing::trace;

use crate::ast::Token;

/// A scanned token: start offset, kind and matched text.
///
/// The text is only filled in for identifiers, numbers and strings.
pub type Lexeme = (usize, Token, String);

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Start over on a new input.
    pub fn reset(&mut self, input: &str) {
        self.input = input.chars().collect();
        self.position = 0;
    }

    /// Scan the whole input, up to and including the first `EndOfInput` or
    /// `Illegal` token.
    pub fn tokenize(input: &str) -> Vec<Lexeme> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();

        loop {
            let lexeme = lexer.scan();
            let done = matches!(lexeme.1, Token::EndOfInput | Token::Illegal);
            tokens.push(lexeme);
            if done {
                return tokens;
            }
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    // Only the space character counts as whitespace.
    fn skip_whitespace(&mut self) {
        while self.current_char() == Some(' ') {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }
        self.text_from(start)
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !is_float {
                is_float = true;
                self.advance();
            } else {
                break;
            }
        }
        self.text_from(start)
    }

    /// Returns `None` when the input ends before the closing quote.
    fn read_string(&mut self) -> Option<String> {
        self.advance(); // Consume opening quote
        let start = self.position;

        while let Some(ch) = self.current_char() {
            if ch == '"' {
                let text = self.text_from(start);
                self.advance();
                return Some(text);
            }
            self.advance();
        }
        None
    }

    /// Two-character operator if `second` follows, `single` otherwise.
    fn read_pair(&mut self, second: char, paired: Token, single: Token) -> Token {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            paired
        } else {
            self.advance();
            single
        }
    }

    fn read_single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    pub fn scan(&mut self) -> Lexeme {
        self.skip_whitespace();

        let mut pos = self.position;
        let mut text = String::new();

        let token = match self.current_char() {
            None => Token::EndOfInput,
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                text = self.read_identifier();
                Token::Identifier
            }
            Some(ch)
                if ch.is_ascii_digit()
                    || (ch == '.' && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())) =>
            {
                text = self.read_number();
                Token::Number
            }
            Some('"') => match self.read_string() {
                Some(s) => {
                    text = s;
                    Token::String
                }
                None => {
                    pos = self.position;
                    Token::Illegal
                }
            },
            Some('&') => self.read_pair('&', Token::And, Token::Illegal),
            Some('|') => self.read_pair('|', Token::Or, Token::Illegal),
            Some('=') => self.read_pair('=', Token::Eq, Token::Illegal),
            Some('!') => self.read_pair('=', Token::NotEq, Token::Illegal),
            Some('<') => self.read_pair('=', Token::LessEq, Token::Less),
            Some('>') => self.read_pair('=', Token::GreaterEq, Token::Greater),
            Some('(') => self.read_single(Token::LeftParen),
            Some(')') => self.read_single(Token::RightParen),
            Some('-') => self.read_single(Token::Minus),
            Some(_) => self.read_single(Token::Illegal),
        };

        trace!(pos, %token, text = %text, "scanned token");
        (pos, token, text)
    }
}

#[test]
fn test_dotted_path() {
    let mut lexer = Lexer::new("property.children == 1");
    assert_eq!(
        lexer.scan(),
        (0, Token::Identifier, "property.children".to_string())
    );
    assert_eq!(lexer.scan(), (18, Token::Eq, String::new()));
    assert_eq!(lexer.scan(), (21, Token::Number, "1".to_string()));
    assert_eq!(lexer.scan(), (22, Token::EndOfInput, String::new()));
}

#[test]
fn test_end_of_input_is_sticky() {
    let mut lexer = Lexer::new(" ");
    assert_eq!(lexer.scan(), (1, Token::EndOfInput, String::new()));
    assert_eq!(lexer.scan(), (1, Token::EndOfInput, String::new()));
}

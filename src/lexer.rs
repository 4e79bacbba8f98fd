use crate::error::LexError;
use crate::token::{Token, TokenKind};

pub struct Lexer {
    text: Vec<char>,
    pos: usize,
    current_char: Option<char>,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let current_char = if chars.is_empty() { None } else { Some(chars[0]) };
        Lexer {
            text: chars,
            pos: 0,
            current_char,
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self) {
        if self.current_char == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
        if self.pos >= self.text.len() {
            self.current_char = None;
        } else {
            self.current_char = Some(self.text[self.pos]);
        }
    }

    fn peek(&self) -> Option<char> {
        let peek_pos = self.pos + 1;
        if peek_pos >= self.text.len() {
            None
        } else {
            Some(self.text[peek_pos])
        }
    }

    fn error(&self, message: String, line: usize, column: usize) -> LexError {
        LexError {
            message,
            line,
            column,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch.is_alphabetic() {
                tokens.push(self.word());
                continue;
            }

            if ch == '"' || ch == '\'' {
                tokens.push(self.string(ch)?);
                continue;
            }

            if ch.is_ascii_digit() {
                tokens.push(self.number()?);
                continue;
            }

            if matches!(ch, '<' | '>' | '=' | '!') {
                tokens.push(self.comparison(ch)?);
                continue;
            }

            let kind = match ch {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Multiply,
                '/' => TokenKind::Divide,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                _ => {
                    return Err(self.error(
                        format!("Oops! I found a character I don't understand: '{}'", ch),
                        self.line,
                        self.column,
                    ));
                }
            };
            tokens.push(Token::new(kind, self.line, self.column));
            self.advance();
        }

        tokens.push(Token::new(TokenKind::Eof, self.line, self.column));
        Ok(tokens)
    }

    fn word(&mut self) -> Token {
        let line = self.line;
        let column = self.column;
        let mut word = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match TokenKind::keyword(&word) {
            Some(keyword) => keyword,
            None => TokenKind::Id(word),
        };
        Token::new(kind, line, column)
    }

    fn string(&mut self, quote: char) -> Result<Token, LexError> {
        let line = self.line;
        let column = self.column;
        self.advance();
        let mut value = String::new();

        while let Some(ch) = self.current_char {
            if ch == quote {
                self.advance();
                return Ok(Token::new(TokenKind::Str(value), line, column));
            }
            if ch == '\n' {
                return Err(self.error(
                    "Oops! You forgot to close your string with a quotation mark!".to_string(),
                    line,
                    column,
                ));
            }
            value.push(ch);
            self.advance();
        }

        Err(self.error(
            "Oops! You need to close your string with a quotation mark!".to_string(),
            line,
            column,
        ))
    }

    fn number(&mut self) -> Result<Token, LexError> {
        let line = self.line;
        let column = self.column;
        let mut number = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() || ch == '.' {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if number.contains('.') {
            match number.parse::<f64>() {
                Ok(value) => TokenKind::Float(value),
                Err(_) => {
                    return Err(self.error(
                        format!("Oops! '{}' isn't a valid number!", number),
                        line,
                        column,
                    ));
                }
            }
        } else {
            match number.parse::<i64>() {
                Ok(value) => TokenKind::Int(value),
                Err(_) => {
                    return Err(self.error(
                        format!("Oops! '{}' isn't a valid number!", number),
                        line,
                        column,
                    ));
                }
            }
        };
        Ok(Token::new(kind, line, column))
    }

    fn comparison(&mut self, first: char) -> Result<Token, LexError> {
        let line = self.line;
        let column = self.column;

        if self.peek() == Some('=') {
            self.advance();
            self.advance();
            let kind = match first {
                '<' => TokenKind::LessEqual,
                '>' => TokenKind::GreaterEqual,
                '=' => TokenKind::Equals,
                '!' => TokenKind::NotEquals,
                _ => unreachable!(),
            };
            return Ok(Token::new(kind, line, column));
        }

        self.advance();
        let kind = match first {
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '=' => TokenKind::Assign,
            _ => {
                return Err(self.error(
                    format!("Oops! I don't understand this operator: '{}'", first),
                    line,
                    column,
                ));
            }
        };
        Ok(Token::new(kind, line, column))
    }
}

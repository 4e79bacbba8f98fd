use crate::ast::{BinaryOp, Expr, Initializer, Statement};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last().map(|token| &token.kind), Some(TokenKind::Eof)) {
            let (line, column) = tokens
                .last()
                .map(|token| (token.line, token.column))
                .unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::Eof, line, column));
        }
        Parser { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::Eof) {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn eat(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.expected_error(&expected.describe()))
        }
    }

    fn expected_error(&self, what: &str) -> ParseError {
        let token = self.peek();
        let message = if matches!(token.kind, TokenKind::Eof) {
            format!("Oops! I was expecting {} but the program ended!", what)
        } else {
            format!(
                "Oops! I was expecting {} but found {}!",
                what,
                token.kind.describe()
            )
        };
        ParseError {
            message,
            line: token.line,
            column: token.column,
        }
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        let kind = self.peek().kind.clone();
        match kind {
            TokenKind::Show => self.show_statement(),
            TokenKind::Var => self.var_statement(),
            TokenKind::If => self.if_statement(),
            TokenKind::Repeat => self.repeat_statement(),
            TokenKind::Loop => self.loop_statement(),
            _ => {
                let token = self.peek();
                Err(ParseError {
                    message: "Oops! I was expecting a statement here!".to_string(),
                    line: token.line,
                    column: token.column,
                })
            }
        }
    }

    fn show_statement(&mut self) -> Result<Statement, ParseError> {
        self.eat(TokenKind::Show)?;
        let value = self.expression()?;
        Ok(Statement::Show { value })
    }

    fn var_statement(&mut self) -> Result<Statement, ParseError> {
        self.eat(TokenKind::Var)?;
        let name = self.identifier("a variable name")?;
        self.eat(TokenKind::Assign)?;

        if self.check(&TokenKind::Ask) {
            self.advance();
            let prompt = self.string_literal("a question in quotes")?;
            return Ok(Statement::VarDecl {
                name,
                init: Initializer::Ask { prompt },
            });
        }

        let value = self.expression()?;
        Ok(Statement::VarDecl {
            name,
            init: Initializer::Expr(value),
        })
    }

    fn if_statement(&mut self) -> Result<Statement, ParseError> {
        self.eat(TokenKind::If)?;
        let condition = self.expression()?;
        let then_body = self.block()?;

        let else_body = if self.check(&TokenKind::Else) {
            self.advance();
            Some(self.block()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_body,
            else_body,
        })
    }

    fn repeat_statement(&mut self) -> Result<Statement, ParseError> {
        self.eat(TokenKind::Repeat)?;
        let var = self.identifier("a variable name")?;
        let start = self.integer_literal("a whole number")?;
        self.eat(TokenKind::To)?;
        let end = self.integer_literal("a whole number")?;
        let body = self.block()?;

        Ok(Statement::Repeat {
            var,
            start,
            end,
            body,
        })
    }

    fn loop_statement(&mut self) -> Result<Statement, ParseError> {
        self.eat(TokenKind::Loop)?;
        let condition = self.expression()?;
        let body = self.block()?;
        Ok(Statement::Loop { condition, body })
    }

    fn block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.eat(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            statements.push(self.statement()?);
        }
        self.eat(TokenKind::RBrace)?;
        Ok(statements)
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.arithmetic()?;

        while matches!(
            self.peek().kind,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
        ) {
            let op = match self.advance().kind {
                TokenKind::Equals => BinaryOp::Equals,
                TokenKind::NotEquals => BinaryOp::NotEquals,
                TokenKind::Less => BinaryOp::Less,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                _ => unreachable!(),
            };
            let right = self.arithmetic()?;
            node = Expr::Binary {
                left: Box::new(node),
                op,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn arithmetic(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.term()?;

        while matches!(self.peek().kind, TokenKind::Plus | TokenKind::Minus) {
            let op = match self.advance().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };
            let right = self.term()?;
            node = Expr::Binary {
                left: Box::new(node),
                op,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.primary()?;

        while matches!(self.peek().kind, TokenKind::Multiply | TokenKind::Divide) {
            let op = match self.advance().kind {
                TokenKind::Multiply => BinaryOp::Multiply,
                TokenKind::Divide => BinaryOp::Divide,
                _ => unreachable!(),
            };
            let right = self.primary()?;
            node = Expr::Binary {
                left: Box::new(node),
                op,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Int(value) => {
                self.advance();
                Ok(Expr::Int(value))
            }
            TokenKind::Float(value) => {
                self.advance();
                Ok(Expr::Float(value))
            }
            TokenKind::Str(text) => {
                self.advance();
                Ok(Expr::Str(text))
            }
            TokenKind::Id(name) => {
                self.advance();
                Ok(Expr::Ident(name))
            }
            _ => Err(ParseError {
                message: "Oops! I was expecting a value here!".to_string(),
                line: token.line,
                column: token.column,
            }),
        }
    }

    fn identifier(&mut self, what: &str) -> Result<String, ParseError> {
        if let TokenKind::Id(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.expected_error(what))
        }
    }

    fn string_literal(&mut self, what: &str) -> Result<String, ParseError> {
        if let TokenKind::Str(text) = &self.peek().kind {
            let text = text.clone();
            self.advance();
            Ok(text)
        } else {
            Err(self.expected_error(what))
        }
    }

    fn integer_literal(&mut self, what: &str) -> Result<i64, ParseError> {
        if let TokenKind::Int(value) = self.peek().kind {
            self.advance();
            Ok(value)
        } else {
            Err(self.expected_error(what))
        }
    }
}

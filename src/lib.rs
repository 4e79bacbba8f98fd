mod token;
mod lexer;
mod ast;
mod parser;
mod value;
mod error;
mod io;
mod interpreter;
mod session;

pub use token::{Token, TokenKind};
pub use lexer::Lexer;
pub use ast::{BinaryOp, Expr, Initializer, Statement};
pub use parser::Parser;
pub use value::Value;
pub use error::{Error, LexError, ParseError, RuntimeError};
pub use io::{ProgramIo, ScriptedIo, StdIo};
pub use interpreter::Interpreter;
pub use session::{CancelHandle, Session, SessionEvent};

use std::collections::HashMap;

pub fn execute(source: &str, io: &mut dyn ProgramIo) -> Result<HashMap<String, Value>, Error> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens);
    let statements = parser.parse()?;
    let mut interpreter = Interpreter::new();
    interpreter.interpret(&statements, io)?;
    Ok(interpreter.get_variables().clone())
}

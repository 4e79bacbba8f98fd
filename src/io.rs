use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::RuntimeError;

/// The seam between the interpreter and its host. `emit` receives one call
/// per `show`. `request_input` blocks until the host has a value; the host
/// side is responsible for presenting the prompt and echoing the exchange
/// in whatever medium it owns.
pub trait ProgramIo {
    fn emit(&mut self, text: &str);
    fn request_input(&mut self, prompt: &str) -> Result<String, RuntimeError>;
}

pub struct StdIo;

impl StdIo {
    fn read_answer(reader: &mut dyn BufRead) -> Result<String, RuntimeError> {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => Err(RuntimeError::InputCancelled),
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Ok(line)
            }
        }
    }
}

impl ProgramIo for StdIo {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }

    fn request_input(&mut self, prompt: &str) -> Result<String, RuntimeError> {
        print!("{} ", prompt);
        let _ = io::stdout().flush();
        Self::read_answer(&mut io::stdin().lock())
    }
}

pub struct ScriptedIo {
    answers: VecDeque<String>,
    pub outputs: Vec<String>,
    pub prompts: Vec<String>,
}

impl ScriptedIo {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedIo {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            outputs: Vec::new(),
            prompts: Vec::new(),
        }
    }
}

impl ProgramIo for ScriptedIo {
    fn emit(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }

    fn request_input(&mut self, prompt: &str) -> Result<String, RuntimeError> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or(RuntimeError::InputCancelled)
    }
}

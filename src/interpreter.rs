use std::collections::HashMap;

use crate::ast::{BinaryOp, Expr, Initializer, Statement};
use crate::error::RuntimeError;
use crate::io::ProgramIo;
use crate::value::Value;

pub struct Interpreter {
    variables: HashMap<String, Value>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            variables: HashMap::new(),
        }
    }

    pub fn interpret(
        &mut self,
        statements: &[Statement],
        io: &mut dyn ProgramIo,
    ) -> Result<(), RuntimeError> {
        for statement in statements {
            self.execute(statement, io)?;
        }
        Ok(())
    }

    fn execute(&mut self, statement: &Statement, io: &mut dyn ProgramIo) -> Result<(), RuntimeError> {
        match statement {
            Statement::Show { value } => {
                let value = self.evaluate(value)?;
                io.emit(&value.to_string());
            }
            Statement::VarDecl { name, init } => match init {
                Initializer::Ask { prompt } => {
                    let answer = io.request_input(prompt)?;
                    self.variables.insert(name.clone(), Value::Str(answer));
                }
                Initializer::Expr(expr) => {
                    let value = self.evaluate(expr)?;
                    self.variables.insert(name.clone(), value);
                }
            },
            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.interpret(then_body, io)?;
                } else if let Some(body) = else_body {
                    self.interpret(body, io)?;
                }
            }
            Statement::Repeat {
                var,
                start,
                end,
                body,
            } => {
                for i in *start..=*end {
                    self.variables.insert(var.clone(), Value::Int(i));
                    self.interpret(body, io)?;
                }
            }
            Statement::Loop { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.interpret(body, io)?;
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Int(value) => Ok(Value::Int(*value)),
            Expr::Float(value) => Ok(Value::Float(*value)),
            Expr::Str(text) => Ok(Value::Str(text.clone())),
            Expr::Ident(name) => {
                self.variables
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::NameError { name: name.clone() })
            }
            Expr::Binary { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Self::apply(*op, left, right)
            }
        }
    }

    fn apply(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        match op {
            BinaryOp::Add => Self::add(left, right),
            BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
                Self::arithmetic(op, left, right)
            }
            BinaryOp::Equals
            | BinaryOp::NotEquals
            | BinaryOp::Less
            | BinaryOp::Greater
            | BinaryOp::LessEqual
            | BinaryOp::GreaterEqual => Self::compare(op, left, right),
        }
    }

    fn add(left: Value, right: Value) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Str(l), r) => Ok(Value::Str(format!("{}{}", l, r))),
            (l, Value::Str(r)) => Ok(Value::Str(format!("{}{}", l, r))),
            (Value::Int(l), Value::Int(r)) => Ok(Value::Int(l + r)),
            (Value::Int(l), Value::Float(r)) => Ok(Value::Float(l as f64 + r)),
            (Value::Float(l), Value::Int(r)) => Ok(Value::Float(l + r as f64)),
            (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l + r)),
            (l, r) => Err(Self::unsupported(BinaryOp::Add, &l, &r)),
        }
    }

    fn arithmetic(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        if let (Value::Int(l), Value::Int(r)) = (&left, &right) {
            match op {
                BinaryOp::Subtract => return Ok(Value::Int(l - r)),
                BinaryOp::Multiply => return Ok(Value::Int(l * r)),
                _ => {}
            }
        }

        let (l, r) = match (left.as_number(), right.as_number()) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(Self::unsupported(op, &left, &right)),
        };

        match op {
            BinaryOp::Subtract => Ok(Value::Float(l - r)),
            BinaryOp::Multiply => Ok(Value::Float(l * r)),
            // Division always goes through floats, so 10 / 4 is 2.5
            BinaryOp::Divide => {
                if r == 0.0 {
                    Err(RuntimeError::DivideByZero)
                } else {
                    Ok(Value::Float(l / r))
                }
            }
            _ => unreachable!(),
        }
    }

    fn compare(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
        let result = match (&left, &right) {
            (Value::Str(l), Value::Str(r)) => match op {
                BinaryOp::Equals => l == r,
                BinaryOp::NotEquals => l != r,
                BinaryOp::Less => l < r,
                BinaryOp::Greater => l > r,
                BinaryOp::LessEqual => l <= r,
                BinaryOp::GreaterEqual => l >= r,
                _ => unreachable!(),
            },
            // Two integers compare exactly; only mixed operands go through f64.
            (Value::Int(l), Value::Int(r)) => match op {
                BinaryOp::Equals => l == r,
                BinaryOp::NotEquals => l != r,
                BinaryOp::Less => l < r,
                BinaryOp::Greater => l > r,
                BinaryOp::LessEqual => l <= r,
                BinaryOp::GreaterEqual => l >= r,
                _ => unreachable!(),
            },
            _ => match (left.as_number(), right.as_number()) {
                (Some(l), Some(r)) => match op {
                    BinaryOp::Equals => l == r,
                    BinaryOp::NotEquals => l != r,
                    BinaryOp::Less => l < r,
                    BinaryOp::Greater => l > r,
                    BinaryOp::LessEqual => l <= r,
                    BinaryOp::GreaterEqual => l >= r,
                    _ => unreachable!(),
                },
                _ => return Err(Self::unsupported(op, &left, &right)),
            },
        };
        Ok(Value::Bool(result))
    }

    fn unsupported(op: BinaryOp, left: &Value, right: &Value) -> RuntimeError {
        RuntimeError::UnsupportedOperation {
            op: op.symbol(),
            left: left.type_name(),
            right: right.type_name(),
        }
    }

    pub fn get_variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ScriptedIo;

    fn show(expr: Expr) -> Statement {
        Statement::Show { value: expr }
    }

    fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    fn var(name: &str, expr: Expr) -> Statement {
        Statement::VarDecl {
            name: name.to_string(),
            init: Initializer::Expr(expr),
        }
    }

    #[test]
    fn test_show_emits_display_text() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        interp
            .interpret(&[show(Expr::Str("hello".to_string()))], &mut io)
            .unwrap();
        assert_eq!(io.outputs, vec!["hello"]);
    }

    #[test]
    fn test_integer_addition() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [var("x", binary(Expr::Int(2), BinaryOp::Add, Expr::Int(3)))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(interp.get_variables().get("x"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_mixed_addition_promotes_to_float() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [var("x", binary(Expr::Int(2), BinaryOp::Add, Expr::Float(0.5)))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(interp.get_variables().get("x"), Some(&Value::Float(2.5)));
    }

    #[test]
    fn test_string_concatenation_stringifies_numbers() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(binary(
            Expr::Str("Age: ".to_string()),
            BinaryOp::Add,
            Expr::Int(5),
        ))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["Age: 5"]);
    }

    #[test]
    fn test_concatenation_with_string_on_right() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(binary(
            Expr::Int(7),
            BinaryOp::Add,
            Expr::Str(" wonders".to_string()),
        ))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["7 wonders"]);
    }

    #[test]
    fn test_division_always_yields_float() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(binary(Expr::Int(10), BinaryOp::Divide, Expr::Int(2)))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["5.0"]);
    }

    #[test]
    fn test_division_by_zero() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [var("x", binary(Expr::Int(10), BinaryOp::Divide, Expr::Int(0)))];
        let err = interp.interpret(&program, &mut io).unwrap_err();
        assert_eq!(err, RuntimeError::DivideByZero);
        assert!(io.outputs.is_empty());
    }

    #[test]
    fn test_division_by_float_zero() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [var("x", binary(Expr::Int(1), BinaryOp::Divide, Expr::Float(0.0)))];
        assert_eq!(
            interp.interpret(&program, &mut io),
            Err(RuntimeError::DivideByZero)
        );
    }

    #[test]
    fn test_subtracting_strings_is_unsupported() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(binary(
            Expr::Str("a".to_string()),
            BinaryOp::Subtract,
            Expr::Int(1),
        ))];
        let err = interp.interpret(&program, &mut io).unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedOperation { op: "-", .. }));
    }

    #[test]
    fn test_cross_type_comparison_is_unsupported() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(binary(
            Expr::Str("5".to_string()),
            BinaryOp::Equals,
            Expr::Int(5),
        ))];
        let err = interp.interpret(&program, &mut io).unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedOperation { op: "==", .. }));
    }

    #[test]
    fn test_mixed_numeric_comparison() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(binary(Expr::Int(2), BinaryOp::Less, Expr::Float(2.5)))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["true"]);
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        // 9007199254740993 and 9007199254740992 round to the same f64.
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [
            show(binary(
                Expr::Int(9007199254740993),
                BinaryOp::Equals,
                Expr::Int(9007199254740992),
            )),
            show(binary(
                Expr::Int(9007199254740992),
                BinaryOp::Less,
                Expr::Int(9007199254740993),
            )),
        ];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["false", "true"]);
    }

    #[test]
    fn test_string_ordering() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(binary(
            Expr::Str("apple".to_string()),
            BinaryOp::Less,
            Expr::Str("banana".to_string()),
        ))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["true"]);
    }

    #[test]
    fn test_name_error_for_undeclared_variable() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [show(Expr::Ident("missing".to_string()))];
        let err = interp.interpret(&program, &mut io).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::NameError {
                name: "missing".to_string()
            }
        );
        assert!(io.outputs.is_empty());
    }

    #[test]
    fn test_redeclaring_overwrites() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [var("x", Expr::Int(1)), var("x", Expr::Int(2))];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(interp.get_variables().get("x"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_if_takes_else_branch_on_zero() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [Statement::If {
            condition: Expr::Int(0),
            then_body: vec![show(Expr::Str("yes".to_string()))],
            else_body: Some(vec![show(Expr::Str("no".to_string()))]),
        }];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["no"]);
    }

    #[test]
    fn test_if_without_else_skips_falsy() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [Statement::If {
            condition: Expr::Str(String::new()),
            then_body: vec![show(Expr::Str("yes".to_string()))],
            else_body: None,
        }];
        interp.interpret(&program, &mut io).unwrap();
        assert!(io.outputs.is_empty());
    }

    #[test]
    fn test_repeat_counts_inclusive_and_leaves_binding() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [Statement::Repeat {
            var: "i".to_string(),
            start: 1,
            end: 5,
            body: vec![show(Expr::Ident("i".to_string()))],
        }];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(interp.get_variables().get("i"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_repeat_descending_range_is_empty() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [
            var("i", Expr::Int(99)),
            Statement::Repeat {
                var: "i".to_string(),
                start: 5,
                end: 1,
                body: vec![show(Expr::Ident("i".to_string()))],
            },
        ];
        interp.interpret(&program, &mut io).unwrap();
        assert!(io.outputs.is_empty());
        assert_eq!(interp.get_variables().get("i"), Some(&Value::Int(99)));
    }

    #[test]
    fn test_loop_reevaluates_condition() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [
            var("n", Expr::Int(3)),
            Statement::Loop {
                condition: Expr::Ident("n".to_string()),
                body: vec![
                    show(Expr::Ident("n".to_string())),
                    var("n", binary(Expr::Ident("n".to_string()), BinaryOp::Subtract, Expr::Int(1))),
                ],
            },
        ];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.outputs, vec!["3", "2", "1"]);
        assert_eq!(interp.get_variables().get("n"), Some(&Value::Int(0)));
    }

    #[test]
    fn test_ask_binds_answer_verbatim() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&["12"]);
        let program = [Statement::VarDecl {
            name: "age".to_string(),
            init: Initializer::Ask {
                prompt: "Age?".to_string(),
            },
        }];
        interp.interpret(&program, &mut io).unwrap();
        assert_eq!(io.prompts, vec!["Age?"]);
        assert_eq!(
            interp.get_variables().get("age"),
            Some(&Value::Str("12".to_string()))
        );
    }

    #[test]
    fn test_output_before_error_is_kept() {
        let mut interp = Interpreter::new();
        let mut io = ScriptedIo::new(&[]);
        let program = [
            show(Expr::Int(1)),
            show(Expr::Ident("missing".to_string())),
            show(Expr::Int(2)),
        ];
        assert!(interp.interpret(&program, &mut io).is_err());
        assert_eq!(io.outputs, vec!["1"]);
    }
}

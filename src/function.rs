use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::io::Write;
use std::rc::Rc;

use crate::class::Instance;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Signal};
use crate::object::{Callable, Object};
use crate::stmt::FunctionData;
use crate::token::Token;

/// A user-defined function or method value. Carries the closure it was
/// declared in, so calling it later sees the variables visible at the
/// point of declaration rather than at the point of call.
#[derive(Debug, Clone)]
pub struct Function {
    pub declaration: Rc<FunctionData>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: Rc<FunctionData>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { declaration, closure, is_initializer }
    }

    /// Produces a new `Function` whose closure additionally binds `this`
    /// to `instance`. Used when a method is looked up off an instance, so
    /// that calling it later (as a bare value, e.g. stored and invoked
    /// through a callback) still sees the right receiver.
    pub fn bind(&self, instance: Rc<RefCell<Instance>>) -> Function {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));
        environment.borrow_mut().define("this", Object::from(instance));
        Function::new(Rc::clone(&self.declaration), environment, self.is_initializer)
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.declaration.params.iter().zip(arguments.into_iter()) {
            environment.define(&param.lexeme, arg);
        }

        let signal = interpreter.execute_block(&self.declaration.body, Rc::new(RefCell::new(environment)))?;

        if self.is_initializer {
            // `init` always yields the instance it was called on, even if
            // the body contains a bare `return;`.
            return self.closure.borrow().get_at(0, &Token::from("this"));
        }

        match signal {
            Signal::Return(value) => Ok(value),
            _ => Ok(Object::from(crate::literal::Literal::Nil)),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.declaration, &other.declaration) && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A built-in callable implemented in Rust rather than Lox source.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The global built-ins every interpreter starts with: `clock`, the
    /// one stdlib function spec.md names, and `print`, which is a plain
    /// identifier bound to a callable rather than a statement/keyword.
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::from("clock"),
                arity: 0,
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .expect("system clock is after the unix epoch")
                        .as_millis();
                    Ok(Object::from(now as f64 / 1000.0))
                },
            },
            NativeFunction {
                name: Token::from("print"),
                arity: 1,
                function: |interpreter, mut arguments| {
                    let value = arguments.remove(0);
                    let mut output = interpreter.output.borrow_mut();
                    writeln!(output, "{value}").map_err(|e| RuntimeError {
                        token: Token::from("print"),
                        message: format!("Failed to write output: {e}"),
                    })?;
                    Ok(Object::from(crate::literal::Literal::Nil))
                },
            },
        ]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

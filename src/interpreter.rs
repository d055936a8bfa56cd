use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{Error, RuntimeError};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{
    BlockData, BreakData, ClassData, ExpressionData, FunctionData, IfData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};
use crate::token::{Token, Type};

/// What a statement did, threaded back up through execution instead of
/// unwinding the Rust call stack. `while`/`for` loops catch `Break` and
/// turn it into `Normal`; a function call catches `Return` and turns it
/// into its `Ok` result.
#[derive(Debug, Clone)]
pub enum Signal {
    Normal,
    Break,
    Return(Object),
}

pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<u32, usize>,
    pub output: Rc<RefCell<dyn Write>>,
}

impl Interpreter {
    pub fn new(output: Rc<RefCell<dyn Write>>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));
        for native in NativeFunction::get_globals() {
            globals.borrow_mut().define(&native.name.lexeme.clone(), Object::from(native));
        }

        Interpreter { environment: Rc::clone(&globals), globals, locals: HashMap::new(), output }
    }

    /// Runs a full program. A runtime error aborts execution at the
    /// statement that raised it; everything already run stays in effect.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                error.throw();
                return;
            }
        }
    }

    /// Records that the expression node identified by `id` resolves
    /// `depth` scopes up from wherever it is evaluated. Called once per
    /// node by the resolver before interpretation starts.
    pub fn resolve(&mut self, id: u32, depth: usize) {
        self.locals.insert(id, depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<Signal, RuntimeError> {
        let previous = Rc::clone(&self.environment);
        self.environment = environment;

        let mut result = Ok(Signal::Normal);
        for statement in statements {
            match self.execute(statement) {
                Ok(Signal::Normal) => continue,
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    fn look_up_variable(&self, id: u32, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(&depth) => self.environment.borrow().get_at(depth, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn is_equal(left: &Object, right: &Object) -> bool {
        left == right
    }
}

fn number_operand_error(token: &Token) -> RuntimeError {
    RuntimeError { token: token.clone(), message: "Operand must be a number.".to_string() }
}

fn number_operands_error(token: &Token) -> RuntimeError {
    RuntimeError { token: token.clone(), message: "Operands must be numbers.".to_string() }
}

impl ExprVisitor<Result<Object, RuntimeError>> for Interpreter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Result<Object, RuntimeError> {
        Ok(Object::from(literal.clone()))
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;

        if data.operator.r#type == Type::Or {
            if left.is_truthy() {
                return Ok(left);
            }
        } else if !left.is_truthy() {
            return Ok(left);
        }

        self.evaluate(&data.right)
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => {
                let n = right.as_number().ok_or_else(|| number_operand_error(&data.operator))?;
                Ok(Object::from(-n))
            }
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("parser only produces Minus/Bang unary operators"),
        }
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;
        let op = &data.operator;

        match op.r#type {
            Type::Greater => Ok(Object::from(
                left.as_number().ok_or_else(|| number_operands_error(op))?
                    > right.as_number().ok_or_else(|| number_operands_error(op))?,
            )),
            Type::GreaterEqual => Ok(Object::from(
                left.as_number().ok_or_else(|| number_operands_error(op))?
                    >= right.as_number().ok_or_else(|| number_operands_error(op))?,
            )),
            Type::Less => Ok(Object::from(
                left.as_number().ok_or_else(|| number_operands_error(op))?
                    < right.as_number().ok_or_else(|| number_operands_error(op))?,
            )),
            Type::LessEqual => Ok(Object::from(
                left.as_number().ok_or_else(|| number_operands_error(op))?
                    <= right.as_number().ok_or_else(|| number_operands_error(op))?,
            )),
            Type::BangEqual => Ok(Object::from(!Self::is_equal(&left, &right))),
            Type::EqualEqual => Ok(Object::from(Self::is_equal(&left, &right))),
            Type::Minus => {
                let l = left.as_number().ok_or_else(|| number_operands_error(op))?;
                let r = right.as_number().ok_or_else(|| number_operands_error(op))?;
                Ok(Object::from(l - r))
            }
            Type::Star => {
                let l = left.as_number().ok_or_else(|| number_operands_error(op))?;
                let r = right.as_number().ok_or_else(|| number_operands_error(op))?;
                Ok(Object::from(l * r))
            }
            Type::Slash => {
                let l = left.as_number().ok_or_else(|| number_operands_error(op))?;
                let r = right.as_number().ok_or_else(|| number_operands_error(op))?;
                if r == 0.0 {
                    return Err(RuntimeError { token: op.clone(), message: "Cannot divide by zero.".to_string() });
                }
                Ok(Object::from(l / r))
            }
            Type::Plus => match (left.as_number(), right.as_number()) {
                (Some(l), Some(r)) => Ok(Object::from(l + r)),
                _ => match (left.as_string(), right.as_string()) {
                    (Some(l), Some(r)) => Ok(Object::from(format!("{l}{r}"))),
                    _ => Err(RuntimeError {
                        token: op.clone(),
                        message: "Operands must be two numbers or two strings.".to_string(),
                    }),
                },
            },
            _ => unreachable!("parser only produces comparison/arithmetic binary operators"),
        }
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> Result<Object, RuntimeError> {
        self.evaluate(&data.expr)
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> Result<Object, RuntimeError> {
        self.look_up_variable(data.id, &data.name)
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> Result<Object, RuntimeError> {
        let value = self.evaluate(&data.value)?;

        match self.locals.get(&data.id) {
            Some(&depth) => {
                self.environment.borrow_mut().assign_at(depth, &data.name, value.clone());
            }
            None => {
                self.globals.borrow_mut().assign(&data.name, value.clone())?;
            }
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, data: &CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(f) => f.arity(),
            Object::NativeFunction(f) => f.arity(),
            Object::Class(class) => class.borrow().arity(),
            _ => {
                return Err(RuntimeError {
                    token: data.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                })
            }
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: data.paren.clone(),
                message: format!("Expected {arity} arguments but got {}.", arguments.len()),
            });
        }

        match callee {
            Object::Function(f) => f.call(self, arguments),
            Object::NativeFunction(f) => f.call(self, arguments),
            Object::Class(class) => {
                let class_ref = class.borrow();
                class_ref.call(self, arguments)
            }
            _ => unreachable!("checked above"),
        }
    }

    fn visit_get_expr(&mut self, data: &GetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;

        match object {
            Object::Instance(instance) => Instance::get(&instance, &data.name),
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, data: &SetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };

        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this_expr(&mut self, data: &ThisData) -> Result<Object, RuntimeError> {
        self.look_up_variable(data.id, &data.keyword)
    }

    fn visit_super_expr(&mut self, data: &SuperData) -> Result<Object, RuntimeError> {
        let distance = *self
            .locals
            .get(&data.id)
            .expect("resolver always assigns super expressions a depth");

        let superclass = match self.environment.borrow().get_at(distance, &data.keyword)? {
            Object::Class(class) => class,
            _ => unreachable!("'super' always resolves to a class"),
        };

        let this_token = Token::from("this");
        let instance = match self.environment.borrow().get_at(distance - 1, &this_token)? {
            Object::Instance(instance) => instance,
            _ => unreachable!("'this' always resolves to an instance"),
        };

        let method = superclass.borrow().find_method(&data.method.lexeme).ok_or_else(|| RuntimeError {
            token: data.method.clone(),
            message: format!("Undefined property '{}'.", data.method.lexeme),
        })?;

        Ok(Object::from(method.bind(instance)))
    }
}

impl StmtVisitor<Result<Signal, RuntimeError>> for Interpreter {
    fn visit_expression_stmt(&mut self, data: &ExpressionData) -> Result<Signal, RuntimeError> {
        self.evaluate(&data.expr)?;
        Ok(Signal::Normal)
    }

    fn visit_var_stmt(&mut self, data: &VarData) -> Result<Signal, RuntimeError> {
        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(Signal::Normal)
    }

    fn visit_block_stmt(&mut self, data: &BlockData) -> Result<Signal, RuntimeError> {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
        self.execute_block(&data.statements, environment)
    }

    fn visit_if_stmt(&mut self, data: &IfData) -> Result<Signal, RuntimeError> {
        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(Signal::Normal)
        }
    }

    fn visit_while_stmt(&mut self, data: &WhileData) -> Result<Signal, RuntimeError> {
        while self.evaluate(&data.condition)?.is_truthy() {
            match self.execute(&data.body)? {
                Signal::Normal => continue,
                Signal::Break => break,
                signal @ Signal::Return(_) => return Ok(signal),
            }
        }

        Ok(Signal::Normal)
    }

    fn visit_break_stmt(&mut self, _data: &BreakData) -> Result<Signal, RuntimeError> {
        Ok(Signal::Break)
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) -> Result<Signal, RuntimeError> {
        let function = Function::new(Rc::new(data.clone()), Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(Signal::Normal)
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) -> Result<Signal, RuntimeError> {
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::from(Literal::Nil),
        };

        Ok(Signal::Return(value))
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> Result<Signal, RuntimeError> {
        let superclass = match &data.superclass {
            Some(superclass_expr) => match self.evaluate(superclass_expr)? {
                Object::Class(class) => Some(class),
                _ => {
                    let Expr::Variable(variable) = superclass_expr else {
                        unreachable!("the parser only allows a variable as a superclass expression")
                    };
                    return Err(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    });
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        let method_environment = if let Some(superclass) = &superclass {
            let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
            environment.borrow_mut().define("super", Object::from(Rc::clone(superclass)));
            environment
        } else {
            Rc::clone(&self.environment)
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::new(method.clone()), Rc::clone(&method_environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(data.name.lexeme.clone(), superclass, methods);
        self.environment.borrow_mut().assign(&data.name, Object::from(Rc::new(RefCell::new(class))))?;

        Ok(Signal::Normal)
    }
}

use std::cell::Cell;

use crate::token::{Location, Token, Type};

thread_local! {
    static HAD_ERROR: Cell<bool> = const { Cell::new(false) };
    static HAD_RUNTIME_ERROR: Cell<bool> = const { Cell::new(false) };
}

/// Checks if an error occurred during scanning, parsing, resolving, or running.
pub fn did_error() -> bool {
    HAD_ERROR.with(|flag| flag.get()) || HAD_RUNTIME_ERROR.with(|flag| flag.get())
}

/// Checks if an error occurred during runtime specifically.
pub fn did_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.with(|flag| flag.get())
}

/// Resets both error flags. Used between REPL lines so one bad line
/// doesn't poison the rest of the session.
pub fn reset_error() {
    HAD_ERROR.with(|flag| flag.set(false));
    HAD_RUNTIME_ERROR.with(|flag| flag.set(false));
}

/// Every diagnostic type implements this: print itself and flip the flag
/// that tells the driver which exit code to use.
pub trait Error {
    fn throw(&self);
}

/// Raised while scanning source text into tokens.
#[derive(Debug)]
pub struct ScanError {
    pub location: Location,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self) {
        eprintln!(
            "[line {line}:{column}] Error: {message}",
            line = self.location.line + 1,
            column = self.location.column + 1,
            message = self.message
        );
        HAD_ERROR.with(|flag| flag.set(true));
    }
}

/// Raised while parsing tokens into an AST.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self) {
        if self.token.r#type == Type::EOF {
            eprintln!(
                "[line {line}:{column}] Error at end: {message}",
                line = self.token.location.line + 1,
                column = self.token.location.column + 1,
                message = self.message
            );
        } else {
            eprintln!(
                "[line {line}:{column}] Error at '{lexeme}': {message}",
                line = self.token.location.line + 1,
                column = self.token.location.column + 1,
                lexeme = self.token.lexeme,
                message = self.message
            );
        }
        HAD_ERROR.with(|flag| flag.set(true));
    }
}

/// Raised while statically resolving variable bindings.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self) {
        eprintln!(
            "[line {line}:{column}] Error at '{lexeme}': {message}",
            line = self.token.location.line + 1,
            column = self.token.location.column + 1,
            lexeme = self.token.lexeme,
            message = self.message
        );
        HAD_ERROR.with(|flag| flag.set(true));
    }
}

/// Raised while executing a resolved AST.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        eprintln!(
            "[line {line}:{column}] Error at '{lexeme}': {message}",
            line = self.token.location.line + 1,
            column = self.token.location.column + 1,
            lexeme = self.token.lexeme,
            message = self.message
        );
        HAD_RUNTIME_ERROR.with(|flag| flag.set(true));
    }
}

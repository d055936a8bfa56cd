#![allow(clippy::needless_return)]

//! Rocks is a programming language written in Rust. It is a dynamically typed language with
//! lexical scoping and first-class functions. Rocks is a tree-walk interpreter with a hand-written
//! recursive descent parser. Rocks is a hobby project and is not intended for production use.
//!
//! Rocks is a dynamically typed language. This means that the type of a variable is determined at
//! runtime. This is in contrast to statically typed languages, where the type of a variable is
//! determined at compile time. Dynamically typed languages are often easier to use, but are
//! generally slower than statically typed languages.
//!
//! Rocks is a tree-walk interpreter. This means that the interpreter walks the abstract syntax tree
//! (AST) and evaluates each node. This is in contrast to a compiler, which would convert the AST
//! into bytecode or machine code. Tree-walk interpreters are generally easier to implement than
//! compilers, but are generally slower than compilers.
//!
//! Rocks is a hobby project and is not intended for production use. The goal of this project is to
//! learn more about programming languages and interpreters. This project is inspired by the
//! [Crafting Interpreters](https://craftinginterpreters.com/) book by Bob Nystrom.
//!
//! ## Scanning
//! The first step in the interpreter is scanning. Scanning is the process of converting a string of
//! characters into a list of tokens. A token is a single unit of a programming language. For
//! example, the string `1 + 2` would be converted into the following tokens:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as an iterator over the characters
//! in the source code. It is a simple state machine that returns the next token in the source code
//! when called.
//!
//! The scanner reports syntax errors in the source code as a [`ScanError`](error::ScanError).
//! These errors are trivial problems like an unterminated string literal or an unexpected character.
//! Scan errors are reported as soon as they are encountered. This means that the scanner will
//! continue scanning the source code even if it has already encountered a syntax error. This is
//! useful because it allows the user to fix multiple syntax errors at once.
//!
//! ## Parsing
//! The second step in the interpreter is parsing. Parsing is the process of converting a list of
//! tokens into an abstract syntax tree (AST). The parser is implemented in the [`parser`](parser)
//! module as a recursive descent parser. The parser transforms the list of tokens into expressions
//! and statements. [`Expressions`](expr::Expr) are pieces of code that produce a value, specifically an
//! [`Object`](object::Object). Objects are an umbrella term for all types of values in Rocks
//! including literals, functions, classes and instances. [`Statements`](stmt::Stmt) are pieces of code
//! that do not produce a value but instead perform some action. These actions modify the state of the
//! program and thus, are called side-effects. For example, a variable decleration or an if clause
//! would be classified as statements.
//!
//! For example, the string `print(1 + 2);` would be converted into the following AST:
//! ```text
//! ExpressionStatement {
//!     CallExpression {
//!         callee: Variable(print),
//!         arguments: [BinaryExpression { left: Number(1), operator: Plus, right: Number(2) }],
//!     }
//! }
//! ```
//! `print` is not a keyword or a statement here; it is a global built-in callable like `clock`,
//! looked up and invoked the same way any user-defined function would be.
//!
//! The parser reports syntax errors in the source code as a [`ParseError`](error::ParseError).
//! Unlike the scanner, the parser catches errors that span multiple tokens. For example, the
//! following expression is invalid because it is missing the right-hand operand:
//! ```text
//! 1 !=
//! ```
//! However, much like the scanner, the parser will continue parsing the source code even if it
//! has already encountered a syntax error using a technique called synchronization. This is useful
//! because it allows the user to fix multiple syntax errors at once.
//!
//! ## Resolving
//! The third step in the interpreter is resolving. Resolving is the process of statically analyzing
//! the AST to determine the scope of each variable. While this requires a pre-pass of the AST, it
//! is necessary to construct robust lexiacl scoping. The resolver is implemented in the
//! [`resolver`](resolver) module as a tree-walk interpreter. The resolver is run after the parser
//! because it requires the AST to be fully constructed. The resolver reports errors as a
//! [`ResolveError`](error::ResolveError). These errors are syntactically valid but semantically invalid.
//! and therefore, cannot be caught by the scanner or the parser. For example, the following expression
//! is valid a valid Rocks syntax but it is semantically invalid because the variable `a` is defined
//! twice in the same scope:
//! ```text
//! {
//!    var a = 1;
//!    var a = 2;
//! }
//! ```
//!
//! ## Interpreting
//! The final step in the interpreter is _interpreting_. Interpreting is the process of evaluating the
//! AST. The interpreter is implemented in the [`interpreter`](interpreter) module as a tree-walk
//! interpreter. Thanks to all the previous steps, the interpreter is able to evaluate the AST and produce
//! a result. The interpreter reports errors as a [`RuntimeError`](error::RuntimeError). While the
//! scanner, the parser and the resolver try to catch as many errors as possible before running the
//! code, most errors can only be caught at runtime. For example, the following expression is valid
//! Rocks syntax but it is semantically invalid because it tries to add a string and a number:
//! ```text
//! var a = "123";
//! var b = a + 123;
//! ```
//! The interpreter is also responsible for managing the environment. The environment is a mapping of
//! variable names to their values. The environment is implemented in the [`environment`](environment)
//! module as a chain of hash maps, each with a link to its enclosing scope. This allows the
//! interpreter to implement lexical scoping, including closures that keep their defining scope alive.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::rc::Rc;
use std::cell::RefCell;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod ast;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use error::{did_error, did_runtime_error};
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

const HISTORY_FILE: &str = ".rocks_history";

/// The embeddable entry point to the whole pipeline. Owns the interpreter's
/// persistent state (`globals`, the resolver's `locals` map) across calls,
/// so later lines of a REPL session see variables and functions defined by
/// earlier ones, and tracks the source line the scanner last stopped at so
/// REPL diagnostics keep counting up instead of resetting to line 0 every
/// time.
pub struct Rocks {
    interpreter: Interpreter,
    line: usize,
}

impl Rocks {
    /// `output` is where the `print` built-in writes; the CLI binary wires
    /// this to stdout, tests wire it to an in-memory buffer.
    pub fn new(output: Rc<RefCell<dyn Write>>) -> Self {
        Rocks { interpreter: Interpreter::new(output), line: 0 }
    }

    /// Reads `path` as UTF-8 and runs it. Exits the process with the
    /// documented static/runtime error codes (65/70); returns an `Err` only
    /// if the file itself couldn't be read.
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        let contents = fs::read_to_string(path)?;
        self.run_source(&contents);

        // Checked in this order because `did_error` also reports true for a
        // runtime error (it is the union of both flags); runtime takes
        // precedence so a program that both type-checked statically and
        // then blew up at runtime reports 70, not 65.
        if did_runtime_error() {
            process::exit(70);
        }
        if did_error() {
            process::exit(65);
        }

        Ok(())
    }

    /// A line-editing REPL built on `rustyline` rather than raw
    /// `stdin().read_line()`: history navigation and Ctrl-C/Ctrl-D handling
    /// come for free. History persists to `~/.rocks_history`, best-effort —
    /// a failure to load or save it does not stop the session. An empty
    /// line or EOF (Ctrl-D) ends the REPL.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("failed to initialize the line editor");
        let history_path = home::home_dir().map(|home| home.join(HISTORY_FILE));

        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) if line.is_empty() => break,
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run_source(&line);
                    error::reset_error();
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
                Err(err) => {
                    eprintln!("Readline error: {err}");
                    break;
                }
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    /// Runs one chunk of source text through scan -> parse -> resolve ->
    /// interpret. Each stage is skipped once an earlier one has recorded a
    /// static error (`had_error`), per the pipeline's fail-fast contract.
    pub fn run_source(&mut self, source: &str) {
        let (tokens, ending_line) = Scanner::new(source, self.line).scan_tokens();
        self.line = ending_line;

        if did_error() {
            return;
        }

        let statements = Parser::new(tokens).parse();

        if did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}

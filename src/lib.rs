//! carlae: a small Lisp-family interpreter.
//!
//! Source text is tokenized, parsed into a single [`Sexp`](sexp::Sexp), and
//! evaluated against a chain of [`Environment`](environment::Environment)s.
//!
//! Evaluation is recursive. Nesting of evaluations and procedure applications
//! is bounded by [`MAX_EVAL_DEPTH`](interpreter::MAX_EVAL_DEPTH), and parsing
//! by the parser's own depth limit. On native targets the host stack is grown
//! on demand (via `stacker`) as evaluation deepens, so any thread can drive
//! the interpreter regardless of its stack size; on wasm32 the caller's stack
//! must accommodate `MAX_EVAL_DEPTH` levels. Environments are `Rc`-based and
//! must stay on the thread that created them.
//!
//! This crate does not set up logging; clients should take care of that. See:
//!   https://github.com/rust-lang/log#in-executables.

use log::info;
use std::fs;
use std::path::Path;

use crate::environment::Environment;
pub use crate::error::Error;
use crate::value::Value;

pub mod builtin;
pub mod cons_list;
pub mod environment;
pub mod error;
pub mod function;
pub mod interpreter;
pub mod number;
pub mod parser;
pub mod sexp;
mod stack;
pub mod tokenizer;
pub mod value;

#[cfg(feature = "cli")]
pub mod repl;

pub mod prelude {
    pub use crate::cons_list::{Cons, ConsList};
    pub use crate::environment::Environment;
    pub use crate::error::{Error, ErrorKind};
    pub use crate::function::{EvalErr, ExpectedCount};
    pub use crate::number::Number;
    pub use crate::parser::{SyntaxError, SyntaxErrorReason};
    pub use crate::sexp::Sexp;
    pub use crate::value::Value;
    pub use crate::{eval_file, eval_str};
}


/// Tokenizes, parses, and evaluates a single expression in `env`.
pub fn eval_str<S: AsRef<str>>(source: S, env: &Environment) -> Result<Value, Error> {
    let tokens = tokenizer::tokenize(source.as_ref());
    let sexp = parser::parse(&tokens)?;
    Ok(interpreter::eval(&sexp, env)?)
}

/// Evaluates the single expression in the file at `path`.
///
/// Uses a fresh global Environment if `env` is None.
pub fn eval_file<P: AsRef<Path>>(path: P, env: Option<&Environment>) -> Result<Value, Error> {
    let path = path.as_ref();
    info!("Evaluating {}", path.display());
    let source = fs::read_to_string(path)?;

    match env {
        Some(env) => eval_str(source, env),
        None => eval_str(source, &Environment::global()),
    }
}

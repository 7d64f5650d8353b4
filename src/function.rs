//! Basic blocks for procedural representation.

use std::borrow::Cow;
use std::fmt;

use self::EvalErr::*;
use self::ExpectedCount::*;
use crate::sexp::{Sexp, Symbol};
use crate::value::Value;


pub type Args = Vec<Value>;
pub type Ret = Result<Value, EvalErr>;

/// Anything that can be applied to an argument list.
pub trait Func {
    fn call(&self, args: Args) -> Ret;
}

#[derive(Debug)]
pub enum EvalErr {
    InvalidArgument {
        given: Value,
        expected: Cow<'static, str>,
    },
    InvalidSexp(Sexp),
    WrongArgumentCount {
        given: usize,
        expected: ExpectedCount,
    },
    UndefinedName(Symbol),
    AlreadyBoundSymbol(Symbol),
    ImmutableBinding(Symbol),
    NotCallable(Value),
    IndexOutOfRange {
        index: i64,
        length: usize,
    },
    RecursionLimit(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpectedCount {
    Exactly(usize),
    AtLeast(usize),
}

impl ExpectedCount {
    pub fn check(self, given: usize) -> Result<(), EvalErr> {
        let ok = match self {
            Exactly(n) => given == n,
            AtLeast(n) => given >= n,
        };
        if ok {
            Ok(())
        } else {
            Err(WrongArgumentCount {
                given,
                expected: self,
            })
        }
    }
}


impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Eval Error] ")?;
        match self {
            InvalidArgument { given, expected } => write!(
                f,
                "Invalid argument: given {}, expected {}",
                given, expected
            ),
            InvalidSexp(val) => write!(f, "Invalid S-exp for evaluation: {}", val),
            WrongArgumentCount { given, expected } => write!(
                f,
                "Wrong argument count: given {}, expected {}",
                given, expected
            ),
            UndefinedName(symbol) => write!(f, "Undefined name: \"{}\"", symbol),
            AlreadyBoundSymbol(symbol) => write!(f, "Already bound symbol: \"{}\"", symbol),
            ImmutableBinding(symbol) => write!(f, "Immutable binding: \"{}\"", symbol),
            NotCallable(val) => write!(f, "Not callable: {}", val),
            IndexOutOfRange { index, length } => write!(
                f,
                "Index out of range: index {}, length {}",
                index, length
            ),
            RecursionLimit(depth) => write!(f, "Recursion limit of {} exceeded", depth),
        }
    }
}

impl fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Exactly(exactly) => write!(f, "{}", exactly),
            AtLeast(minimum) => write!(f, "at least {}", minimum),
        };
    }
}

impl std::error::Error for EvalErr {}

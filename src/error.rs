//! Top-level error type for driving the interpreter from text or files.
//!
//! Language errors come in two kinds, syntax and evaluation; loading from a
//! file can additionally fail on I/O.

use std::fmt;
use std::io;

use crate::function::EvalErr;
use crate::parser::SyntaxError;


#[derive(Debug)]
pub enum Error {
    Syntax(SyntaxError),
    Eval(EvalErr),
    Io(io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ErrorKind {
    Syntax,
    Evaluation,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::Eval(_) => ErrorKind::Evaluation,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}

impl From<EvalErr> for Error {
    fn from(err: EvalErr) -> Self {
        Error::Eval(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(err) => write!(f, "{}", err),
            Error::Eval(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "[IO Error] {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::Eval(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

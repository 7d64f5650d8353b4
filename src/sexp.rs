//! Module for representing parsed S-exps.

use std::fmt;
use std::rc::Rc;

use crate::number::Number;

pub type Symbol = String;

/// Expression tree produced by the parser.
///
/// Compound forms are reference-counted slices so that closure bodies can
/// share the parse tree rather than copying it.
#[derive(Clone, Debug, PartialEq)]
pub enum Sexp {
    Atom(Atom),
    List(Rc<[Sexp]>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Atom {
    Number(Number),
    Symbol(Symbol),
}

impl Sexp {
    pub fn symbol<S: Into<Symbol>>(s: S) -> Sexp {
        Sexp::Atom(Atom::Symbol(s.into()))
    }

    pub fn list(elems: Vec<Sexp>) -> Sexp {
        Sexp::List(elems.into())
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Sexp::Atom(Atom::Symbol(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::List(elems) => Some(elems),
            _ => None,
        }
    }
}

impl From<Number> for Sexp {
    fn from(num: Number) -> Self {
        Sexp::Atom(Atom::Number(num))
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Atom(atom) => write!(f, "{}", atom),
            Sexp::List(elems) => {
                write!(f, "(")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Number(num) => write!(f, "{}", num),
            Atom::Symbol(s) => write!(f, "{}", s),
        }
    }
}

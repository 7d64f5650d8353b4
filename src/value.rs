//! Runtime values produced by evaluation.

use std::fmt;
use std::rc::Rc;

use derivative::Derivative;
use derive_getters::Getters;

use crate::builtin::BuiltIn;
use crate::cons_list::Cons;
use crate::environment::Environment;
use crate::number::Number;
use crate::sexp::{Sexp, Symbol};


#[derive(Clone, Debug)]
pub enum Value {
    Number(Number),
    Boolean(bool),
    Closure(Rc<Closure>),
    BuiltIn(BuiltIn),
    List(Rc<Cons>),
    /// The empty list.
    Nil,
}

/// User-defined procedure closing over its defining Environment.
#[derive(Derivative, Getters)]
#[derivative(Debug)]
pub struct Closure {
    params: Vec<Symbol>,
    body: Sexp,
    #[derivative(Debug = "ignore")]
    env: Environment,
}

impl Closure {
    pub fn new(params: Vec<Symbol>, body: Sexp, env: Environment) -> Closure {
        Closure { params, body, env }
    }
}

impl Value {
    /// Everything but #f is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    /// Compares lists element-wise, deciding every other pair with `leaf_eq`.
    ///
    /// Nested lists are walked with an explicit work list rather than by
    /// recursion.
    pub fn eq_by<F>(&self, other: &Value, leaf_eq: F) -> bool
    where
        F: Fn(&Value, &Value) -> bool,
    {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Value::List(a), Value::List(b)) => {
                    if Rc::ptr_eq(a, b) {
                        continue;
                    }
                    let (mut a, mut b) = (a.iter(), b.iter());
                    loop {
                        match (a.next(), b.next()) {
                            (Some(x), Some(y)) => pending.push((x, y)),
                            (None, None) => break,
                            _ => return false,
                        }
                    }
                }
                (a, b) => {
                    if !leaf_eq(a, b) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Interprets self as a (possibly empty) list.
    pub fn as_list(&self) -> Option<Option<&Rc<Cons>>> {
        match self {
            Value::List(cons) => Some(Some(cons)),
            Value::Nil => Some(None),
            _ => None,
        }
    }
}

impl From<Number> for Value {
    fn from(num: Number) -> Self {
        Value::Number(num)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Option<Rc<Cons>>> for Value {
    fn from(list: Option<Rc<Cons>>) -> Self {
        match list {
            Some(cons) => Value::List(cons),
            None => Value::Nil,
        }
    }
}

impl From<Closure> for Value {
    fn from(closure: Closure) -> Self {
        Value::Closure(Rc::new(closure))
    }
}

impl PartialEq for Value {
    /// Lists compare element-wise; procedures by identity.
    fn eq(&self, other: &Self) -> bool {
        self.eq_by(other, |a, b| match (a, b) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::BuiltIn(a), Value::BuiltIn(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            _ => false,
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(num) => write!(f, "{}", num),
            Value::Boolean(true) => write!(f, "#t"),
            Value::Boolean(false) => write!(f, "#f"),
            Value::Closure(closure) => {
                write!(f, "[CLOSURE ({})]", closure.params.join(" "))
            }
            Value::BuiltIn(builtin) => write!(f, "{}", builtin),
            Value::List(cons) => list_fmt(cons, f),
            Value::Nil => write!(f, "()"),
        }
    }
}

pub(crate) fn list_fmt(cons: &Cons, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    nested_list_fmt(cons, 0, f)
}

fn nested_list_fmt(cons: &Cons, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Any list longer than this will simply be suffixed with "..." after these
    // many elements.
    const MAX_DISPLAY_LENGTH: usize = 64;
    // Lists nested deeper than this are elided as "(...)".
    const MAX_DISPLAY_DEPTH: usize = 64;

    if depth >= MAX_DISPLAY_DEPTH {
        return write!(f, "(...)");
    }

    write!(f, "(")?;
    for (pos, val) in cons.iter().enumerate() {
        if pos >= MAX_DISPLAY_LENGTH {
            write!(f, " ...")?;
            break;
        }
        if pos > 0 {
            write!(f, " ")?;
        }
        match val {
            Value::List(inner) => nested_list_fmt(inner, depth + 1, f)?,
            val => write!(f, "{}", val)?,
        }
    }
    write!(f, ")")
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::cons_list::ConsList;

    fn ints(v: &[i64]) -> Value {
        v.iter()
            .map(|i| Value::from(Number::Integer(*i)))
            .collect::<ConsList>()
            .release()
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(Value::Nil.is_truthy());
        assert!(Value::from(Number::Integer(0)).is_truthy());
    }

    #[test]
    fn structural_list_eq() {
        assert_eq!(ints(&[1, 2, 3]), ints(&[1, 2, 3]));
        assert_ne!(ints(&[1, 2, 3]), ints(&[1, 2]));
        assert_eq!(ints(&[]), Value::Nil);
    }

    #[test]
    fn display() {
        assert_eq!(ints(&[1, 2, 3]).to_string(), "(1 2 3)");
        assert_eq!(Value::Nil.to_string(), "()");
        assert_eq!(Value::Boolean(false).to_string(), "#f");

        let long: Vec<i64> = (0..100).collect();
        assert!(ints(&long).to_string().ends_with(" ...)"));
    }

    #[test]
    fn long_list_drop() {
        let long: Vec<i64> = (0..200_000).collect();
        drop(ints(&long));
    }

    fn nested(depth: usize) -> Value {
        (0..depth).fold(Value::Nil, |inner, _| {
            std::iter::once(inner).collect::<ConsList>().release()
        })
    }

    #[test]
    fn deeply_nested_list() {
        let deep = nested(300_000);
        let other = nested(300_000);
        assert_eq!(deep, other);
        assert_ne!(deep, nested(299_999));

        let shown = deep.to_string();
        assert!(shown.starts_with("(((("));
        assert!(shown.contains("(...)"));

        drop(other);
        drop(deep);
    }

    #[test]
    fn nested_display_bound() {
        assert_eq!(nested(1).to_string(), "(())");
        assert_eq!(nested(2).to_string(), "((()))");
        assert_eq!(nested(70).to_string().matches("...").count(), 1);
    }
}

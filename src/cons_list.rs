//! Module for the immutable linked lists exposed to carlae programs.
//!
//! Cells are reference-counted and never mutated once built, so lists can
//! share structure freely.

use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::value::{self, Value};


pub struct Cons {
    car: Value,
    cdr: Option<Rc<Cons>>,
}

pub struct ConsIter<'a> {
    current: Option<&'a Cons>,
}

impl Cons {
    pub fn new(car: Value, cdr: Option<Rc<Cons>>) -> Cons {
        Cons { car, cdr }
    }

    pub fn car(&self) -> &Value {
        &self.car
    }

    pub fn cdr(&self) -> Option<&Rc<Cons>> {
        self.cdr.as_ref()
    }

    pub fn iter(&self) -> ConsIter<'_> {
        ConsIter {
            current: Some(self),
        }
    }
}

impl Cons {
    // Moves the cells this one links to (its tail, and a nested list in car)
    // onto `pending`.
    fn detach(&mut self, pending: &mut Vec<Rc<Cons>>) {
        if let Some(cdr) = self.cdr.take() {
            pending.push(cdr);
        }
        if let Value::List(_) = self.car {
            if let Value::List(car) = mem::replace(&mut self.car, Value::Nil) {
                pending.push(car);
            }
        }
    }
}

impl Drop for Cons {
    // Uniquely-owned cells are unlinked onto an explicit work list, so neither
    // long nor deeply nested lists recurse.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach(&mut pending);
        while let Some(cell) = pending.pop() {
            if let Ok(mut cell) = Rc::try_unwrap(cell) {
                cell.detach(&mut pending);
            }
        }
    }
}

impl fmt::Debug for Cons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        value::list_fmt(self, f)
    }
}

impl<'a> Iterator for ConsIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.current?;
        self.current = curr.cdr.as_deref();
        Some(&curr.car)
    }
}

impl<'a> IntoIterator for &'a Cons {
    type Item = &'a Value;
    type IntoIter = ConsIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


/// Builder for constructing lists in order without building in reverse by
/// hand.
#[derive(Debug, Default)]
pub struct ConsList {
    elems: Vec<Value>,
}

impl ConsList {
    pub fn new() -> ConsList {
        ConsList::default()
    }

    pub fn append(&mut self, val: Value) {
        self.elems.push(val);
    }

    pub fn release(self) -> Value {
        self.release_with_tail(None)
    }

    /// Links the appended elements in front of `tail`, which is shared rather
    /// than copied.
    pub fn release_with_tail(self, tail: Option<Rc<Cons>>) -> Value {
        let head = self
            .elems
            .into_iter()
            .rev()
            .fold(tail, |cdr, car| Some(Rc::new(Cons::new(car, cdr))));
        head.into()
    }
}

impl std::iter::FromIterator<Value> for ConsList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ConsList {
            elems: iter.into_iter().collect(),
        }
    }
}

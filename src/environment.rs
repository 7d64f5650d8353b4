//! Module for representing environments.
//!
//! An Environment is a handle to one scope; cloning the handle shares the
//! scope. Scopes are reference-counted so closures keep their defining scope
//! alive. Not thread-safe: an environment tree belongs to a single evaluator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::builtin::BUILTINS;
use crate::function::EvalErr;
use crate::sexp::Symbol;
use crate::value::Value;


#[derive(Clone)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

struct Frame {
    map: HashMap<Symbol, Value>,
    parent: Option<Environment>,
    // Only the builtin frame is frozen.
    frozen: bool,
}

impl Environment {
    /// Fresh top-level scope whose parent is a fresh builtin scope.
    pub fn global() -> Environment {
        Environment::builtins().child()
    }

    fn builtins() -> Environment {
        let mut map: HashMap<Symbol, Value> = BUILTINS
            .iter()
            .map(|(name, builtin)| (name.to_string(), Value::BuiltIn(*builtin)))
            .collect();
        map.insert("#t".to_string(), Value::Boolean(true));
        map.insert("#f".to_string(), Value::Boolean(false));

        Environment::from_frame(Frame {
            map,
            parent: None,
            frozen: true,
        })
    }

    /// Empty scope nested in self.
    pub fn child(&self) -> Environment {
        Environment::with_bindings(self, Vec::new())
    }

    /// Scope nested in `parent`, pre-populated with `bindings`.
    pub fn with_bindings<I>(parent: &Environment, bindings: I) -> Environment
    where
        I: IntoIterator<Item = (Symbol, Value)>,
    {
        Environment::from_frame(Frame {
            map: bindings.into_iter().collect(),
            parent: Some(parent.clone()),
            frozen: false,
        })
    }

    fn from_frame(frame: Frame) -> Environment {
        Environment {
            frame: Rc::new(RefCell::new(frame)),
        }
    }

    pub fn parent(&self) -> Option<Environment> {
        self.frame.borrow().parent.clone()
    }

    /// Whether `symbol` is bound in this scope itself, ignoring parents.
    pub fn defines(&self, symbol: &str) -> bool {
        self.frame.borrow().map.contains_key(symbol)
    }

    pub fn lookup(&self, symbol: &str) -> Result<Value, EvalErr> {
        let mut curr = self.clone();
        loop {
            let parent = {
                let frame = curr.frame.borrow();
                if let Some(value) = frame.map.get(symbol) {
                    return Ok(value.clone());
                }
                frame.parent.clone()
            };
            match parent {
                Some(env) => curr = env,
                None => return Err(EvalErr::UndefinedName(symbol.to_string())),
            }
        }
    }

    /// Binds in this scope, shadowing any outer binding.
    ///
    /// The builtin scope rejects new bindings with `ImmutableBinding`.
    pub fn define<S: Into<Symbol>>(&self, symbol: S, value: Value) -> Result<(), EvalErr> {
        let mut frame = self.frame.borrow_mut();
        let symbol: Symbol = symbol.into();
        if frame.frozen {
            return Err(EvalErr::ImmutableBinding(symbol));
        }
        frame.map.insert(symbol, value);
        Ok(())
    }

    /// Overwrites the binding in the nearest scope defining `symbol`.
    pub fn assign(&self, symbol: &str, value: Value) -> Result<(), EvalErr> {
        let mut curr = self.clone();
        loop {
            if curr.defines(symbol) {
                let mut frame = curr.frame.borrow_mut();
                if frame.frozen {
                    return Err(EvalErr::ImmutableBinding(symbol.to_string()));
                }
                frame.map.insert(symbol.to_string(), value);
                return Ok(());
            }
            match curr.parent() {
                Some(env) => curr = env,
                None => return Err(EvalErr::UndefinedName(symbol.to_string())),
            }
        }
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame.borrow();
        let mut names: Vec<&str> = frame.map.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        write!(f, "[ENV {:?}", names)?;
        if frame.parent.is_some() {
            write!(f, " -> ..")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "./environment_test.rs"]
mod environment_test;

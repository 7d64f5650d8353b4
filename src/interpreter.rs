//! Evaluation of parsed S-exps against an Environment.

use log::debug;

use std::cell::Cell;
use std::collections::HashSet;

use crate::environment::Environment;
use crate::function::{
    Args,
    EvalErr::{self, *},
    ExpectedCount, Func, Ret,
};
use crate::sexp::{Atom, Sexp, Symbol};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Closure, Value};

/// Maximum combined nesting of evaluations and procedure applications,
/// including applications made from inside builtins.
pub const MAX_EVAL_DEPTH: usize = 10_000;

thread_local! {
    static DEPTH: Cell<usize> = Cell::new(0);
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Result<DepthGuard, EvalErr> {
        DEPTH.with(|depth| {
            if depth.get() >= MAX_EVAL_DEPTH {
                return Err(RecursionLimit(MAX_EVAL_DEPTH));
            }
            depth.set(depth.get() + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}


pub fn eval(form: &Sexp, env: &Environment) -> Ret {
    let _guard = DepthGuard::enter()?;
    ensure_sufficient_stack(|| eval_form(form, env))
}

fn eval_form(form: &Sexp, env: &Environment) -> Ret {
    let elems = match form {
        Sexp::Atom(Atom::Number(num)) => return Ok((*num).into()),
        Sexp::Atom(Atom::Symbol(symbol)) => return env.lookup(symbol),
        Sexp::List(elems) => elems,
    };

    let (car, cdr) = match elems.split_first() {
        Some(split) => split,
        None => return Err(InvalidSexp(form.clone())),
    };

    if let Some(first) = car.as_symbol() {
        match first {
            "if" => return eval_if(cdr, env),
            "and" => return eval_and(cdr, env),
            "or" => return eval_or(cdr, env),
            "define" => return eval_define(cdr, env),
            "lambda" => return eval_lambda(cdr, env),
            "let" => return eval_let(cdr, env),
            "set!" => return eval_set(cdr, env),
            _ => { /* Fallthrough */ }
        }
    }

    let callable = eval(car, env)?;
    let args = evlis(cdr, env)?;
    call(&callable, args)
}

/// Evaluates `form` in `env`, or in a fresh global Environment if none is
/// given, returning the Environment alongside the result.
pub fn eval_with_env(
    form: &Sexp,
    env: Option<Environment>,
) -> Result<(Value, Environment), EvalErr> {
    let env = env.unwrap_or_else(Environment::global);
    let val = eval(form, &env)?;
    Ok((val, env))
}

/// Applies a procedure Value to already-evaluated arguments.
///
/// Each application counts toward `MAX_EVAL_DEPTH`, so recursion that passes
/// back through builtins like `map` is bounded too.
pub fn call(callable: &Value, args: Args) -> Ret {
    let _guard = DepthGuard::enter()?;
    ensure_sufficient_stack(|| match callable {
        Value::Closure(closure) => closure.call(args),
        Value::BuiltIn(builtin) => builtin.call(args),
        _ => Err(NotCallable(callable.clone())),
    })
}

impl Func for Closure {
    fn call(&self, args: Args) -> Ret {
        ExpectedCount::Exactly(self.params().len()).check(args.len())?;
        debug!("Applying closure ({}) to {} args", self.params().join(" "), args.len());

        let bindings = self.params().iter().cloned().zip(args);
        let frame = Environment::with_bindings(self.env(), bindings);
        eval(self.body(), &frame)
    }
}


fn evlis(args: &[Sexp], env: &Environment) -> Result<Args, EvalErr> {
    let mut res = Args::with_capacity(args.len());
    for arg in args {
        res.push(eval(arg, env)?);
    }
    Ok(res)
}

fn eval_if(args: &[Sexp], env: &Environment) -> Ret {
    ExpectedCount::Exactly(3).check(args.len())?;

    if eval(&args[0], env)?.is_truthy() {
        eval(&args[1], env)
    } else {
        eval(&args[2], env)
    }
}

fn eval_and(args: &[Sexp], env: &Environment) -> Ret {
    for arg in args {
        if !eval(arg, env)?.is_truthy() {
            return Ok(false.into());
        }
    }
    Ok(true.into())
}

fn eval_or(args: &[Sexp], env: &Environment) -> Ret {
    for arg in args {
        if eval(arg, env)?.is_truthy() {
            return Ok(true.into());
        }
    }
    Ok(false.into())
}

fn eval_define(args: &[Sexp], env: &Environment) -> Ret {
    ExpectedCount::Exactly(2).check(args.len())?;

    let (name, value) = match &args[0] {
        // (define (name params..) body) shorthand.
        Sexp::List(signature) => {
            let (name, params) = match signature.split_first() {
                Some(split) => split,
                None => return Err(InvalidSexp(args[0].clone())),
            };
            let closure = make_closure(params, &args[1], env)?;
            (symbol(name)?, closure)
        }
        name => (symbol(name)?, eval(&args[1], env)?),
    };

    env.define(name, value.clone())?;
    Ok(value)
}

fn eval_lambda(args: &[Sexp], env: &Environment) -> Ret {
    ExpectedCount::Exactly(2).check(args.len())?;

    match &args[0] {
        Sexp::List(params) => make_closure(params, &args[1], env),
        params => Err(InvalidSexp(params.clone())),
    }
}

fn eval_let(args: &[Sexp], env: &Environment) -> Ret {
    ExpectedCount::Exactly(2).check(args.len())?;

    let pairs = match args[0].as_list() {
        Some(pairs) => pairs,
        None => return Err(InvalidSexp(args[0].clone())),
    };

    // All values are evaluated in the outer env before the new scope exists.
    let mut bindings = Vec::<(Symbol, Value)>::with_capacity(pairs.len());
    for pair in pairs {
        match pair.as_list() {
            Some([name, value]) => bindings.push((symbol(name)?, eval(value, env)?)),
            _ => return Err(InvalidSexp(pair.clone())),
        }
    }

    let scope = Environment::with_bindings(env, bindings);
    eval(&args[1], &scope)
}

fn eval_set(args: &[Sexp], env: &Environment) -> Ret {
    ExpectedCount::Exactly(2).check(args.len())?;

    let name = symbol(&args[0])?;
    let value = eval(&args[1], env)?;
    env.assign(&name, value.clone())?;
    Ok(value)
}


fn symbol(sexp: &Sexp) -> Result<Symbol, EvalErr> {
    match sexp.as_symbol() {
        Some(s) => Ok(s.to_string()),
        None => Err(InvalidSexp(sexp.clone())),
    }
}

fn make_closure(params: &[Sexp], body: &Sexp, env: &Environment) -> Ret {
    let mut names = Vec::<Symbol>::with_capacity(params.len());
    let mut seen = HashSet::<&str>::new();
    for param in params {
        let name = match param.as_symbol() {
            Some(name) => name,
            None => return Err(InvalidSexp(param.clone())),
        };
        if !seen.insert(name) {
            return Err(AlreadyBoundSymbol(name.to_string()));
        }
        names.push(name.to_string());
    }

    Ok(Closure::new(names, body.clone(), env.clone()).into())
}

#[cfg(test)]
#[path = "./interpreter_test.rs"]
mod interpreter_test;

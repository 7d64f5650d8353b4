//! Creation of the builtin procedure table.

use lazy_static::lazy_static;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::cons_list::{Cons, ConsList};
use crate::function::{Args, EvalErr, ExpectedCount, Func, Ret};
use crate::interpreter::call;
use crate::number::Number;
use crate::value::Value;

macro_rules! builtins {
    [$($n:tt : $x:expr),* $(,)?] => {
        {
            let mut m = HashMap::new();
            $(
                m.insert(
                    $n,
                    BuiltIn {
                        name: $n,
                        fun: $x,
                    },
                );
            )*
            m
        }
    };
}

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, BuiltIn> = builtins![
        "+": add,
        "-": sub,
        "*": mul,
        "/": div,
        "=?": equal,
        ">": greater,
        ">=": greater_equal,
        "<": less,
        "<=": less_equal,
        "not": not,
        "list": list,
        "car": car,
        "cdr": cdr,
        "length": length,
        "elt-at-index": elt_at_index,
        "concat": concat,
        "map": map,
        "filter": filter,
        "reduce": reduce,
        "begin": begin,
    ];
}

#[derive(Clone, Copy)]
pub struct BuiltIn {
    name: &'static str,
    fun: fn(Args) -> Ret,
}

impl BuiltIn {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Func for BuiltIn {
    fn call(&self, args: Args) -> Ret {
        (self.fun)(args)
    }
}

impl PartialEq for BuiltIn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{} @ {:p}]", self.name, &self.fun)
    }
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{}]", self.name)
    }
}


fn number(arg: &Value) -> Result<Number, EvalErr> {
    if let Value::Number(num) = arg {
        Ok(*num)
    } else {
        Err(EvalErr::InvalidArgument {
            given: arg.clone(),
            expected: Cow::Borrowed("a Number"),
        })
    }
}

fn cons(arg: &Value) -> Result<&Rc<Cons>, EvalErr> {
    if let Value::List(cons) = arg {
        Ok(cons)
    } else {
        Err(EvalErr::InvalidArgument {
            given: arg.clone(),
            expected: Cow::Borrowed("a non-empty List"),
        })
    }
}

fn list_arg(arg: &Value) -> Result<Option<&Rc<Cons>>, EvalErr> {
    match arg.as_list() {
        Some(list) => Ok(list),
        None => Err(EvalErr::InvalidArgument {
            given: arg.clone(),
            expected: Cow::Borrowed("a List"),
        }),
    }
}

// Applies f to every element of list, in order.
fn each<F>(list: Option<&Rc<Cons>>, mut f: F) -> Result<(), EvalErr>
where
    F: FnMut(&Value) -> Result<(), EvalErr>,
{
    if let Some(cons) = list {
        for elem in cons.iter() {
            f(elem)?;
        }
    }
    Ok(())
}


fn add(args: Args) -> Ret {
    let mut curr = Number::default();
    for arg in &args {
        curr += number(arg)?;
    }

    Ok(curr.into())
}

fn sub(args: Args) -> Ret {
    ExpectedCount::AtLeast(1).check(args.len())?;

    let mut curr = number(&args[0])?;
    if args.len() == 1 {
        return Ok((-curr).into());
    }
    for arg in &args[1..] {
        curr -= number(arg)?;
    }

    Ok(curr.into())
}

fn mul(args: Args) -> Ret {
    let mut curr = Number::Integer(1);
    for arg in &args {
        curr *= number(arg)?;
    }

    Ok(curr.into())
}

fn div(args: Args) -> Ret {
    ExpectedCount::AtLeast(1).check(args.len())?;

    let mut divisor = Number::Integer(1);
    for arg in &args[1..] {
        divisor *= number(arg)?;
    }
    if divisor.is_zero() {
        return Err(EvalErr::InvalidArgument {
            given: divisor.into(),
            expected: Cow::Borrowed("a non-zero divisor"),
        });
    }

    let mut curr = number(&args[0])?;
    curr /= divisor;
    Ok(curr.into())
}


/// True iff every adjacent pair satisfies `relation`.
fn chain<F>(args: &[Value], relation: F) -> Ret
where
    F: Fn(&Value, &Value) -> Result<bool, EvalErr>,
{
    ExpectedCount::AtLeast(1).check(args.len())?;

    for pair in args.windows(2) {
        if !relation(&pair[0], &pair[1])? {
            return Ok(false.into());
        }
    }
    Ok(true.into())
}

fn ordered(args: &[Value], accept: fn(Ordering) -> bool) -> Ret {
    chain(args, |a, b| {
        let (a, b) = (number(a)?, number(b)?);
        Ok(a.compare(&b).map_or(false, accept))
    })
}

// Numbers compare numerically, including inside lists.
fn lang_eq(a: &Value, b: &Value) -> bool {
    a.eq_by(b, |a, b| match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.compare(b) == Some(Ordering::Equal),
        _ => a == b,
    })
}

fn equal(args: Args) -> Ret {
    chain(&args, |a, b| Ok(lang_eq(a, b)))
}

fn greater(args: Args) -> Ret {
    ordered(&args, |o| o == Ordering::Greater)
}

fn greater_equal(args: Args) -> Ret {
    ordered(&args, |o| o != Ordering::Less)
}

fn less(args: Args) -> Ret {
    ordered(&args, |o| o == Ordering::Less)
}

fn less_equal(args: Args) -> Ret {
    ordered(&args, |o| o != Ordering::Greater)
}

fn not(args: Args) -> Ret {
    ExpectedCount::Exactly(1).check(args.len())?;
    Ok((!args[0].is_truthy()).into())
}


fn list(args: Args) -> Ret {
    Ok(args.into_iter().collect::<ConsList>().release())
}

fn car(args: Args) -> Ret {
    ExpectedCount::Exactly(1).check(args.len())?;
    Ok(cons(&args[0])?.car().clone())
}

fn cdr(args: Args) -> Ret {
    ExpectedCount::Exactly(1).check(args.len())?;
    Ok(cons(&args[0])?.cdr().cloned().into())
}

fn length(args: Args) -> Ret {
    ExpectedCount::Exactly(1).check(args.len())?;
    let len = list_arg(&args[0])?.map_or(0, |cons| cons.iter().count());
    Ok(Number::Integer(len as i64).into())
}

fn elt_at_index(args: Args) -> Ret {
    ExpectedCount::Exactly(2).check(args.len())?;
    let list = list_arg(&args[0])?;
    let index = match &args[1] {
        Value::Number(Number::Integer(i)) if *i >= 0 => *i,
        given => {
            return Err(EvalErr::InvalidArgument {
                given: given.clone(),
                expected: Cow::Borrowed("a non-negative Integer"),
            });
        }
    };

    let mut iter = list.into_iter().flat_map(|cons| cons.iter());
    match iter.nth(index as usize) {
        Some(elem) => Ok(elem.clone()),
        None => Err(EvalErr::IndexOutOfRange {
            index,
            length: list.map_or(0, |cons| cons.iter().count()),
        }),
    }
}

fn concat(args: Args) -> Ret {
    // The last non-empty list is shared as the tail; everything before it is
    // copied.
    let mut lists = Vec::with_capacity(args.len());
    for arg in &args {
        if let Some(cons) = list_arg(arg)? {
            lists.push(cons);
        }
    }
    let tail = match lists.pop() {
        Some(last) => last.clone(),
        None => return Ok(Value::Nil),
    };

    let copied = lists
        .into_iter()
        .flat_map(|cons| cons.iter())
        .cloned()
        .collect::<ConsList>();
    Ok(copied.release_with_tail(Some(tail)))
}

fn map(args: Args) -> Ret {
    ExpectedCount::Exactly(2).check(args.len())?;
    let f = &args[0];

    let mut res = ConsList::new();
    each(list_arg(&args[1])?, |elem| {
        res.append(call(f, vec![elem.clone()])?);
        Ok(())
    })?;
    Ok(res.release())
}

fn filter(args: Args) -> Ret {
    ExpectedCount::Exactly(2).check(args.len())?;
    let f = &args[0];

    let mut res = ConsList::new();
    each(list_arg(&args[1])?, |elem| {
        if call(f, vec![elem.clone()])?.is_truthy() {
            res.append(elem.clone());
        }
        Ok(())
    })?;
    Ok(res.release())
}

fn reduce(args: Args) -> Ret {
    ExpectedCount::Exactly(3).check(args.len())?;
    let f = &args[0];

    let mut acc = args[2].clone();
    each(list_arg(&args[1])?, |elem| {
        acc = call(f, vec![acc.clone(), elem.clone()])?;
        Ok(())
    })?;
    Ok(acc)
}

fn begin(mut args: Args) -> Ret {
    ExpectedCount::AtLeast(1).check(args.len())?;
    Ok(args.pop().unwrap_or(Value::Nil))
}


#[cfg(test)]
#[path = "./builtin_test.rs"]
mod builtin_test;

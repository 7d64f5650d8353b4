//! Module for parsing carlae tokens into an AST.

use std::fmt;

use crate::number::Number;
use crate::sexp::{Atom, Sexp};

use self::SyntaxErrorReason::*;

const MAX_DEPTH: usize = 128;


/// Parses exactly one top-level expression from `tokens`.
///
/// Anything following that expression is rejected rather than ignored.
pub fn parse(tokens: &[&str]) -> Result<Sexp, SyntaxError> {
    let first = match tokens.first() {
        Some(first) => *first,
        None => return Err(SyntaxError::new(EmptyInput, 0)),
    };

    let end = match first {
        "(" => match matching_paren(tokens) {
            Some(end) => end,
            None => return Err(SyntaxError::new(UnbalancedParentheses, 0)),
        },
        ")" => return Err(SyntaxError::new(UnmatchedClose, 0)),
        _ => 0,
    };
    if end + 1 != tokens.len() {
        return Err(SyntaxError::new(TrailingTokens, end + 1));
    }

    parse_form(tokens, 0, 0)
}

/// Given tokens starting with "(", returns the offset of the matching ")".
pub fn matching_paren(tokens: &[&str]) -> Option<usize> {
    let mut depth: usize = 0;
    for (i, token) in tokens.iter().enumerate() {
        match *token {
            "(" => depth += 1,
            ")" => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            _ => {}
        }
        if depth == 0 {
            return Some(i);
        }
    }
    None
}

/// Parses a slice holding one complete form; `offset` is the slice's position
/// in the full token sequence, for error reporting.
fn parse_form(tokens: &[&str], offset: usize, depth: usize) -> Result<Sexp, SyntaxError> {
    if tokens.len() == 1 {
        return match tokens[0] {
            "(" => Err(SyntaxError::new(UnbalancedParentheses, offset)),
            ")" => Err(SyntaxError::new(UnmatchedClose, offset)),
            token => Ok(parse_atom(token)),
        };
    }
    if depth >= MAX_DEPTH {
        return Err(SyntaxError::new(DepthOverflow, offset));
    }

    let n = tokens.len();
    let mut elems = Vec::<Sexp>::new();
    let mut i = 1;
    while i < n - 1 {
        match tokens[i] {
            "(" => {
                let end = match matching_paren(&tokens[i..n - 1]) {
                    Some(end) => end,
                    None => return Err(SyntaxError::new(UnbalancedParentheses, offset + i)),
                };
                elems.push(parse_form(&tokens[i..i + end + 1], offset + i, depth + 1)?);
                i += end + 1;
            }
            ")" => return Err(SyntaxError::new(UnmatchedClose, offset + i)),
            token => {
                elems.push(parse_atom(token));
                i += 1;
            }
        }
    }

    Ok(Sexp::list(elems))
}

fn parse_atom(token: &str) -> Sexp {
    match token.parse::<Number>() {
        Ok(num) => Sexp::Atom(Atom::Number(num)),
        Err(_) => Sexp::symbol(token),
    }
}


#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SyntaxErrorReason {
    EmptyInput,
    UnbalancedParentheses,
    UnmatchedClose,
    TrailingTokens,
    DepthOverflow,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxError {
    reason: SyntaxErrorReason,
    position: usize,
}

impl SyntaxError {
    pub fn new(reason: SyntaxErrorReason, position: usize) -> Self {
        Self { reason, position }
    }

    pub fn reason(&self) -> SyntaxErrorReason {
        self.reason
    }

    /// Offset of the offending token.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Syntax Error] {:?} at token {}",
            self.reason, self.position
        )
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
#[path = "./parser_test.rs"]
mod parser_test;

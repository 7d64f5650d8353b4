//! Module for breaking carlae text into tokens.

use log::trace;

pub type Tokens<'a> = Vec<&'a str>;

/// Splits `source` into paren and atom tokens, dropping `;` comments.
///
/// Tokens borrow from `source`; classification into numbers and symbols is
/// left to the parser.
pub fn tokenize(source: &str) -> Tokens<'_> {
    let mut result = Tokens::new();
    for line in source.lines() {
        tokenize_line(line, &mut result);
    }
    trace!("Tokens: {:?}", result);
    result
}

fn tokenize_line<'a>(line: &'a str, result: &mut Tokens<'a>) {
    for chunk in line.split_whitespace() {
        let mut last = 0;
        for (i, c) in chunk.char_indices() {
            match c {
                ';' => {
                    if i > last {
                        result.push(&chunk[last..i]);
                    }
                    return;
                }
                '(' | ')' => {
                    if i > last {
                        result.push(&chunk[last..i]);
                    }
                    result.push(&chunk[i..i + 1]);
                    last = i + 1;
                }
                _ => {}
            }
        }
        if last < chunk.len() {
            result.push(&chunk[last..]);
        }
    }
}

#[cfg(test)]
#[path = "./tokenizer_test.rs"]
mod tokenizer_test;

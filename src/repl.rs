//! Line-oriented interactive front end.

use colored::*;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::environment::Environment;
use crate::error::Error;
use crate::value::Value;

const QUIT: &str = "QUIT";
const PROMPT: &str = "in> ";


pub struct Repl {
    editor: Editor<()>,
    env: Environment,
}

#[derive(Debug)]
pub enum Line {
    Quit,
    Blank,
    Result(Result<Value, Error>),
}

impl Repl {
    /// REPL over `env`, which persists across lines.
    pub fn new(env: Environment) -> Repl {
        Repl {
            editor: Editor::<()>::new(),
            env,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn run(&mut self) {
        loop {
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    return;
                }
                Err(err) => {
                    println!("[Readline Error]: {:?}", err);
                    println!();
                    continue;
                }
            };

            match eval_line(&line, &self.env) {
                Line::Quit => return,
                Line::Blank => continue,
                Line::Result(result) => {
                    self.editor.add_history_entry(line.as_str());
                    print_result(&result);
                }
            }
        }
    }
}

/// Evaluates one line of input in `env`.
pub fn eval_line(line: &str, env: &Environment) -> Line {
    if line.trim() == QUIT {
        return Line::Quit;
    }
    if line.trim().is_empty() {
        return Line::Blank;
    }
    Line::Result(crate::eval_str(line, env))
}

pub fn print_result(result: &Result<Value, Error>) {
    match result {
        Ok(val) => println!("{}", val),
        Err(err) => {
            debug!("{}", err);
            println!("{}", "ERROR".red().bold());
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::number::Number;

    #[test]
    fn quit_and_blank() {
        let env = Environment::global();
        assert!(matches!(eval_line("QUIT", &env), Line::Quit));
        assert!(matches!(eval_line("   ", &env), Line::Blank));
    }

    #[test]
    fn session_persists() {
        let env = Environment::global();
        assert!(matches!(
            eval_line("(define x 4)", &env),
            Line::Result(Ok(_))
        ));

        // Errors don't disturb the session.
        match eval_line("(car x)", &env) {
            Line::Result(Err(err)) => assert_eq!(err.kind(), ErrorKind::Evaluation),
            other => panic!("{:?}", other),
        }
        match eval_line("(+ x 1", &env) {
            Line::Result(Err(err)) => assert_eq!(err.kind(), ErrorKind::Syntax),
            other => panic!("{:?}", other),
        }

        match eval_line("(* x x)", &env) {
            Line::Result(Ok(val)) => assert_eq!(val, Value::from(Number::Integer(16))),
            other => panic!("{:?}", other),
        }
    }
}

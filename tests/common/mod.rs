#![allow(dead_code)]

use std::path::{Path, PathBuf};

use carlae::environment::Environment;
use carlae::error::Error;
use carlae::value::Value;


pub fn setup() -> Environment {
    // Integration tests will call this method multiple times; ignore the error.
    if let Err(_err) = env_logger::try_init() {}

    Environment::global()
}

/// Evaluates each source in order against `env`, panicking on any error.
pub fn results(env: &Environment, sources: &[&str]) -> Vec<Value> {
    sources
        .iter()
        .map(|s| carlae::eval_str(s, env).unwrap())
        .collect::<Vec<_>>()
}

pub fn results_with_errors(env: &Environment, sources: &[&str]) -> Vec<Result<Value, Error>> {
    sources
        .iter()
        .map(|s| carlae::eval_str(s, env))
        .collect::<Vec<_>>()
}

/// Result of evaluating `source` in a fresh environment.
pub fn eval_fresh(source: &str) -> Result<Value, Error> {
    carlae::eval_str(source, &setup())
}

pub fn fixture<P: AsRef<Path>>(name: P) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

//! Basic carlae REPL.
//!
//! Run as:                  `cargo run --example repl`.
//! Preload files as:        `cargo run --example repl -- a.crl b.crl`.
//! Show error detail with:  `RUST_LOG=debug cargo run --example repl`.
//!
//! Each file must hold a single expression; its definitions are visible in the
//! REPL session. Enter QUIT to exit.

use clap::{Arg, Command};
use log::LevelFilter;

use carlae::environment::Environment;
use carlae::repl::{print_result, Repl};


fn main() {
    // Setup logging.
    env_logger::Builder::from_default_env()
        .filter_module("rustyline", LevelFilter::Warn)
        .init();

    // Parse args.
    let matches = Command::new("carlae REPL")
        .version("0.1")
        .about("Bare-bones carlae REPL")
        .arg(
            Arg::new("files")
                .help("Source files to evaluate before starting the session")
                .multiple_values(true),
        )
        .get_matches();

    let env = Environment::global();
    if let Some(files) = matches.values_of("files") {
        for file in files {
            let result = carlae::eval_file(file, Some(&env));
            if result.is_err() {
                print_result(&result);
            }
        }
    }

    Repl::new(env).run();
}

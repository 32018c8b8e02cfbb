//! BLISS-B test-vector harness.
//!
//! Generates keys and signatures from a fixed seed and prints them as
//! plain-text vectors, one per line:
//!
//! ```text
//! bliss-harness keygen   [-k kind]   s1, s2, a
//! bliss-harness sign     [-k kind]   s1, s2, a, z1, z2, c, verify code
//! bliss-harness verify   [-k kind]   s1, s2, a, z1, z2, c (from stdin), verify code
//! bliss-harness dropbits [-k kind]   Gaussian samples, then with d bits dropped
//! ```
//!
//! Exit status is 0 on success, 1 on a usage error and 2 when a
//! subcommand fails (unreadable stdin, library error).

mod cli;
mod commands;
mod error;
mod inject;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;
use pqsigs_bliss_b::resolve;

use crate::cli::Cli;
use crate::error::HarnessError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn execute(cli: &Cli) -> Result<(), HarnessError> {
    let params = resolve(cli.kind)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut prompt = io::stderr();
    commands::run(cli.command, params, stdin.lock(), &mut out, &mut prompt)?;
    out.flush()?;
    Ok(())
}

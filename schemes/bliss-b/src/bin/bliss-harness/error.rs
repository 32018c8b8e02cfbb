//! Errors raised by harness subcommands.

use std::io;

use pqsigs_bliss_b::{BlissError, VectorError};
use thiserror::Error;

/// Runtime failures of a harness subcommand.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("bliss: {0}")]
    Bliss(#[from] BlissError),
    #[error("malformed input: {0}")]
    MalformedInput(#[from] VectorError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! A child exiting non-zero (or dying to a signal) is deliberately *not* an
//! error here: that is the restart trigger, handled inside the supervision
//! loop. Only conditions that stop the supervisor appear below.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RespawnError {
    /// No executable path was given on the command line.
    #[error("Syntax: {progname} <file> [arg1] ... [argN]")]
    Usage { progname: String },

    /// The OS refused to create the child process.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    /// The OS failed while reporting the child's status.
    #[error("failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RespawnError>;

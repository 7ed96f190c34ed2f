// src/exec/mod.rs

//! Launching and waiting on the supervised child with `tokio::process`.
//!
//! The child inherits the supervisor's stdio; the supervised program owns
//! the console and nothing is piped or captured.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::errors::{RespawnError, Result};

/// The executable path and arguments of the supervised program.
///
/// Parsed once from the command line and immutable afterwards. Argument 0
/// of the child is the executable path itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a spec from the raw trailing CLI words: the first word is the
    /// executable path, the rest its arguments. `None` if no word was given.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

/// How a child run ended, as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Normal exit with the given status code.
    Exited(i32),
    /// Terminated by the given signal number.
    Signaled(i32),
}

impl ExitOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitOutcome::Exited(code),
            // On Unix a missing code means the child died to a signal.
            None => ExitOutcome::Signaled(status.signal().unwrap_or(0)),
        }
    }

    /// Only a clean zero exit stops the supervisor; anything else restarts.
    pub fn is_success(self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}

/// Launch the supervised program.
pub fn launch(spec: &CommandSpec) -> Result<Child> {
    let child = Command::new(&spec.program)
        .args(&spec.args)
        .spawn()
        .map_err(|source| RespawnError::Launch {
            program: spec.program.clone(),
            source,
        })?;

    info!(
        program = %spec.program,
        pid = child.id().unwrap_or(0),
        "child started"
    );
    Ok(child)
}

/// Block until the child exits and classify its status.
pub async fn wait(spec: &CommandSpec, child: &mut Child) -> Result<ExitOutcome> {
    let status = child
        .wait()
        .await
        .map_err(|source| RespawnError::Wait {
            program: spec.program.clone(),
            source,
        })?;

    let outcome = ExitOutcome::from_status(status);
    debug!(program = %spec.program, ?outcome, "child exited");
    Ok(outcome)
}

// src/supervisor.rs

//! The restart loop.
//!
//! Strictly sequential: launch the child, await its exit, decide. A clean
//! zero exit shuts the supervisor down; any other exit relaunches the child
//! immediately, without limit and without backoff. Launch and wait failures
//! are fatal and bubble up.

use std::sync::atomic::Ordering;

use tracing::{info, warn};

use crate::errors::Result;
use crate::exec::{self, CommandSpec, ExitOutcome};
use crate::signal::ChildHandle;

/// Owns the one supervised child and decides when to relaunch it.
///
/// At most one child is live at any instant; `current` is overwritten on
/// each restart so the signal forwarder always sees the newest PID.
#[derive(Debug)]
pub struct Supervisor {
    spec: CommandSpec,
    current: ChildHandle,
}

/// Terminal result of a supervision run that ended cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Total number of times the child was launched.
    pub launches: u64,
}

impl Supervisor {
    pub fn new(spec: CommandSpec, current: ChildHandle) -> Self {
        Self { spec, current }
    }

    /// Launch, wait, and relaunch until the child exits 0.
    pub async fn run(self) -> Result<RunReport> {
        let mut launches: u64 = 0;

        loop {
            let mut child = exec::launch(&self.spec)?;
            launches += 1;
            self.current.store(
                child.id().map(|id| id as i32).unwrap_or(0),
                Ordering::SeqCst,
            );

            let outcome = exec::wait(&self.spec, &mut child).await?;

            if outcome.is_success() {
                info!(
                    program = %self.spec.program,
                    launches,
                    "child exited cleanly; shutting down"
                );
                return Ok(RunReport { launches });
            }

            match outcome {
                ExitOutcome::Exited(code) => {
                    warn!(
                        program = %self.spec.program,
                        code,
                        "child exited with failure; restarting"
                    );
                }
                ExitOutcome::Signaled(sig) => {
                    warn!(
                        program = %self.spec.program,
                        signal = sig,
                        "child killed by signal; restarting"
                    );
                }
            }
        }
    }
}

// src/lib.rs

pub mod cli;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod signal;
pub mod supervisor;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::errors::RespawnError;
use crate::exec::CommandSpec;
use crate::supervisor::Supervisor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - command-line parsing into a `CommandSpec`
/// - the SIGTERM forwarder
/// - the supervision loop
pub async fn run(args: CliArgs) -> Result<()> {
    let spec = CommandSpec::from_argv(&args.command)
        .ok_or_else(|| RespawnError::Usage {
            progname: progname(),
        })?;

    let handle = signal::new_handle();
    signal::spawn_forwarder(handle.clone())?;

    let report = Supervisor::new(spec, handle).run().await?;
    debug!(launches = report.launches, "supervisor finished");
    Ok(())
}

fn progname() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| "respawn".to_string())
}

// src/signal.rs

//! Termination-signal forwarding.
//!
//! A single background task listens for SIGTERM. When it fires, the same
//! signal is forwarded to the currently tracked child (if any) and the
//! supervisor exits with code 1. The handle may legitimately be empty (no
//! child launched yet) or stale (child already reaped); both are tolerated
//! and delivery errors are ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use anyhow::Result;
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};

/// PID of the live child, 0 when none.
///
/// Single writer (the supervision loop); the signal task may read it at any
/// point relative to the loop, including between deciding to launch and the
/// new PID being recorded.
pub type ChildHandle = Arc<AtomicI32>;

pub fn new_handle() -> ChildHandle {
    Arc::new(AtomicI32::new(0))
}

/// Spawn the forwarder task.
///
/// Must run before the first launch so the handler covers the whole
/// supervised lifetime.
pub fn spawn_forwarder(handle: ChildHandle) -> Result<()> {
    // Each registration pairs the tokio stream kind with the signal value to
    // forward, so the fired signal is what the child receives. Only SIGTERM
    // is registered today.
    let (kind, sig) = (SignalKind::terminate(), Signal::SIGTERM);
    let mut stream = signal(kind)?;

    tokio::spawn(async move {
        if stream.recv().await.is_none() {
            // Stream closed, runtime is shutting down on its own.
            return;
        }
        forward_and_exit(&handle, sig);
    });

    Ok(())
}

/// Forward `sig` to the current child, if any.
///
/// Fire-and-forget: the handle may be empty (no child launched yet) or
/// stale (child already reaped), and delivery errors are ignored. Returns
/// whether a live PID was tracked at the time.
pub fn forward(handle: &ChildHandle, sig: Signal) -> bool {
    let pid = handle.load(Ordering::SeqCst);

    if pid > 0 {
        info!(pid, signal = ?sig, "forwarding termination signal to child");
        if let Err(err) = kill(Pid::from_raw(pid), sig) {
            warn!(pid, error = %err, "could not signal child");
        }
        true
    } else {
        info!(signal = ?sig, "termination signal received before any child started");
        false
    }
}

/// Forward `sig` to the current child, then terminate the supervisor with
/// exit code 1.
fn forward_and_exit(handle: &ChildHandle, sig: Signal) -> ! {
    forward(handle, sig);
    std::process::exit(1);
}

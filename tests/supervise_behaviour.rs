use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use respawn::errors::RespawnError;
use respawn::exec::{CommandSpec, ExitOutcome};
use respawn::signal;
use respawn::supervisor::Supervisor;

type TestResult = Result<(), Box<dyn Error>>;

fn spec(program: &str, args: &[&str]) -> CommandSpec {
    CommandSpec {
        program: program.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
    }
}

fn write_script(dir: &Path, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("child.sh");
    fs::write(&path, body)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

#[test]
fn empty_argv_has_no_spec() {
    assert!(CommandSpec::from_argv(&[]).is_none());
}

#[test]
fn argv_splits_into_program_and_args() {
    let argv: Vec<String> = ["/bin/echo", "-n", "hello"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let spec = CommandSpec::from_argv(&argv).unwrap();
    assert_eq!(spec.program, "/bin/echo");
    assert_eq!(spec.args, vec!["-n".to_string(), "hello".to_string()]);
}

#[test]
fn only_zero_exit_counts_as_success() {
    assert!(ExitOutcome::Exited(0).is_success());
    assert!(!ExitOutcome::Exited(1).is_success());
    assert!(!ExitOutcome::Exited(-1).is_success());
    assert!(!ExitOutcome::Signaled(15).is_success());
}

#[tokio::test]
async fn clean_exit_stops_after_one_launch() -> TestResult {
    let sup = Supervisor::new(spec("/bin/true", &[]), signal::new_handle());
    let report = sup.run().await?;
    assert_eq!(report.launches, 1);
    Ok(())
}

#[tokio::test]
async fn failing_runs_are_retried_until_success() -> TestResult {
    let dir = tempfile::tempdir()?;
    let counter = dir.path().join("counter");

    // Fails three times, succeeds on the fourth run.
    let script = write_script(
        dir.path(),
        &format!(
            "#!/bin/sh\n\
             count=$(cat \"{c}\" 2>/dev/null || echo 0)\n\
             count=$((count + 1))\n\
             echo \"$count\" > \"{c}\"\n\
             [ \"$count\" -ge 4 ]\n",
            c = counter.display()
        ),
    )?;

    let sup = Supervisor::new(
        spec(script.to_str().unwrap(), &[]),
        signal::new_handle(),
    );
    let report = sup.run().await?;
    assert_eq!(report.launches, 4);
    Ok(())
}

#[tokio::test]
async fn signal_killed_child_is_restarted() -> TestResult {
    let dir = tempfile::tempdir()?;
    let marker = dir.path().join("marker");

    // First run kills itself with SIGKILL, second run exits 0.
    let script = write_script(
        dir.path(),
        &format!(
            "#!/bin/sh\n\
             if [ ! -f \"{m}\" ]; then\n\
               touch \"{m}\"\n\
               kill -9 $$\n\
             fi\n\
             exit 0\n",
            m = marker.display()
        ),
    )?;

    let sup = Supervisor::new(
        spec(script.to_str().unwrap(), &[]),
        signal::new_handle(),
    );
    let report = sup.run().await?;
    assert_eq!(report.launches, 2);
    Ok(())
}

#[tokio::test]
async fn missing_executable_is_a_fatal_launch_error() {
    let sup = Supervisor::new(spec("/nonexistent/path", &[]), signal::new_handle());
    let err = sup.run().await.unwrap_err();
    assert!(matches!(err, RespawnError::Launch { .. }), "got: {err}");
}

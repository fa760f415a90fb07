//! Bounded subprocess execution shared by every command-backed probe.

use std::io;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::trace;

use super::{ProbeError, ProbeResult};

/// Runs `program` to completion or until `timeout` elapses.
///
/// The child is killed if the deadline passes. A missing binary maps to
/// [`ProbeError::Unavailable`]; the exit status is left to the caller.
pub async fn output(program: &str, args: &[&str], timeout: Duration) -> ProbeResult<Output> {
    trace!("running {program} {}", args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, cmd.output()).await {
        Err(_) => Err(ProbeError::Timeout(timeout)),
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(ProbeError::Unavailable(program.to_string()))
        }
        Ok(Err(e)) if e.kind() == io::ErrorKind::PermissionDenied => {
            Err(ProbeError::Unavailable(program.to_string()))
        }
        Ok(Err(e)) => Err(ProbeError::Io(e)),
        Ok(Ok(out)) => Ok(out),
    }
}

/// Like [`output`], but a non-zero exit becomes [`ProbeError::Failed`].
pub async fn stdout(program: &str, args: &[&str], timeout: Duration) -> ProbeResult<String> {
    let out = output(program, args, timeout).await?;
    if !out.status.success() {
        return Err(ProbeError::Failed {
            program: program.to_string(),
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

/// Whether `program` can be found on `PATH`.
pub fn on_path(program: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        is_file(&dir.join(program)) || is_file(&dir.join(format!("{program}.exe")))
    })
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

use std::net::Ipv4Addr;
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;

use super::{LivenessProber, PingReply, ProbeError, ProbeResult, command};

/// Slack on top of the echo timeout for process start-up.
const SPAWN_SLACK: Duration = Duration::from_secs(1);

/// One ICMP echo through the system `ping` binary.
pub struct SystemPing;

#[async_trait]
impl LivenessProber for SystemPing {
    async fn ping(&self, ip: Ipv4Addr, timeout: Duration) -> ProbeResult<PingReply> {
        let target = ip.to_string();
        let wait = wait_arg(timeout);
        let args = ping_args(&wait, &target);

        let out = command::output("ping", &args, timeout + SPAWN_SLACK).await?;
        reply_from("ping", &out)
    }
}

/// Reads a finished `ping` run.
///
/// Exit 1 means the echo went out and nothing came back. Any other failure
/// (exit 2 for "socket: Operation not permitted", a signal) says ping never
/// got to ask, so it is reported as [`ProbeError::Failed`].
fn reply_from(program: &str, out: &Output) -> ProbeResult<PingReply> {
    let ttl = parse_ttl(&String::from_utf8_lossy(&out.stdout));

    if out.status.success() {
        // Windows ping exits 0 on "Destination host unreachable" replies.
        let reachable = cfg!(not(windows)) || ttl.is_some();
        return Ok(PingReply { reachable, ttl });
    }
    if cfg!(windows) || out.status.code() == Some(1) {
        return Ok(PingReply { reachable: false, ttl });
    }

    Err(ProbeError::Failed {
        program: program.to_string(),
        code: out.status.code(),
        stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
    })
}

#[cfg(windows)]
fn wait_arg(timeout: Duration) -> String {
    timeout.as_millis().max(1).to_string()
}

#[cfg(not(windows))]
fn wait_arg(timeout: Duration) -> String {
    timeout.as_secs().max(1).to_string()
}

#[cfg(windows)]
fn ping_args<'a>(wait: &'a str, target: &'a str) -> Vec<&'a str> {
    vec!["-n", "1", "-w", wait, target]
}

#[cfg(target_os = "macos")]
fn ping_args<'a>(wait: &'a str, target: &'a str) -> Vec<&'a str> {
    vec!["-c", "1", "-t", wait, target]
}

#[cfg(not(any(windows, target_os = "macos")))]
fn ping_args<'a>(wait: &'a str, target: &'a str) -> Vec<&'a str> {
    vec!["-c", "1", "-W", wait, target]
}

/// Extracts the reply TTL, matching `ttl=64` and `TTL=128` alike.
pub fn parse_ttl(text: &str) -> Option<u8> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find("ttl=")? + 4;
    let digits: String = lower[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

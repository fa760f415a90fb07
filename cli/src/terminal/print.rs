use std::io::Write;

use anyhow::Context;
use serde::Serialize;

/// Writes `value` to stdout as one pretty-printed JSON document.
///
/// Stdout carries nothing else; diagnostics go to stderr.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("failed to encode result")?;
    writeln!(stdout).context("failed to write result")?;
    stdout.flush().context("failed to write result")
}

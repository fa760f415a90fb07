use anyhow::Context;

use devscout_common::config::Config;
use devscout_core::scanner;
use devscout_core::system::StatusReport;

use crate::terminal::print;

pub async fn status(cfg: &Config) -> anyhow::Result<()> {
    let service = scanner::system_service(cfg).context("failed to load the vendor table")?;
    let report = StatusReport::collect(&service).await;
    print::json(&report)
}

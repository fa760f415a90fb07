use std::time::Instant;

use anyhow::Context;
use colored::*;
use tracing::info;

use devscout_common::config::Config;
use devscout_common::device::Device;
use devscout_core::scanner;

use crate::terminal::{print, spinner};

pub async fn scan(cfg: &Config) -> anyhow::Result<()> {
    let service = scanner::system_service(cfg).context("failed to load the vendor table")?;
    info!("discovery sources: {}", service.active_sources().join(" → "));

    spinner::start("Looking for the default gateway...");
    let range = service.network_range().await;

    spinner::set_message(format!("Scanning {range}..."));
    let start_time = Instant::now();
    let devices: Vec<Device> = service.scan_range(range).await;
    spinner::finish();

    let found = format!("{} devices", devices.len()).bold().green();
    let elapsed = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    info!("Discovery complete: {found} identified in {elapsed}");

    print::json(&devices)
}

use std::net::Ipv4Addr;

use anyhow::Context;
use tracing::info;

use devscout_common::config::Config;
use devscout_core::scanner;

use crate::terminal::{print, spinner};

pub async fn device(ip: Ipv4Addr, cfg: &Config) -> anyhow::Result<()> {
    let service = scanner::system_service(cfg).context("failed to load the vendor table")?;

    spinner::start(format!("Probing {ip}..."));
    let device = service.device_details(ip).await;
    spinner::finish();

    info!("{ip} is {:?}", device.status);
    print::json(&device)
}

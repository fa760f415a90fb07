mod commands;
mod terminal;

use commands::{CommandLine, Commands, device, scan, status};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.log_level());

    let cfg = commands.config();

    match commands.command {
        Commands::Scan => scan::scan(&cfg).await,
        Commands::Device { ip } => device::device(ip, &cfg).await,
        Commands::Status => status::status(&cfg).await,
    }
}

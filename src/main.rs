pub mod api;
pub mod config;
pub mod db;
pub mod logging;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::parse();
    logging::init(config.log_format);

    tracing::info!("Starting user records service...");

    if let Err(e) = api::server::start_server(&config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e);
    }
    Ok(())
}

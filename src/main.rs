use clap::{CommandFactory, Parser};
use role_remover::utils::logger;
use role_remover::{CliConfig, RemovalEngine};
use std::time::Instant;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const APPLICATION_NAME: &str = "Role Removal Utility";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.version {
        println!("{} ", VERSION);
        return Ok(());
    }

    let started = Instant::now();
    let log_path = match logger::init_cli_logger(cli.debug, &cli.log_dir) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("❌ Unable to create log file: {}", e);
            return Ok(());
        }
    };
    tracing::info!("---- {} v{} ----", APPLICATION_NAME, VERSION);
    println!("---- {} v{} ----", APPLICATION_NAME, VERSION);

    // Every configuration problem ends the same way: log it, show the flags, stop.
    let config = match cli.into_run_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e.user_friendly_message());
            eprintln!("❌ {}", e.user_friendly_message());
            CliConfig::command().print_help()?;
            return Ok(());
        }
    };

    tracing::debug!("Flag - Instance {}", config.instance_id);
    tracing::debug!("Flag - File {}", config.csv_file.display());
    tracing::debug!("Flag - Header {}", config.key_column);
    if let Some(endpoint) = &config.endpoint {
        tracing::debug!("Flag - Endpoint {}", endpoint);
    }
    tracing::debug!("Flag - Dry Run {}", config.dry_run);
    if config.debug {
        tracing::debug!("Flag - Debugging On");
    }

    let engine = RemovalEngine::new(config).with_progress(true);
    match engine.run().await {
        Ok(summary) => {
            println!("✅ {}", summary);
            println!("📁 Log saved to: {}", log_path.display());
        }
        Err(e) => {
            tracing::error!("{}", e.user_friendly_message());
            eprintln!("❌ {}", e.user_friendly_message());
            return Ok(());
        }
    }

    tracing::debug!("Time Taken: {:?}", started.elapsed());
    tracing::info!("---- End of Utility ---- ");
    println!("⏱  Time Taken: {:?}", started.elapsed());
    Ok(())
}

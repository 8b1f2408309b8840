use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use phonecheck::{build_config, RawSettings};

/// Phone number reputation lookup service.
#[derive(Debug, Parser)]
#[command(name = "phonecheck-server", version, about)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "PHONECHECK_BIND")]
    bind: Option<String>,

    /// Directory holding the reference CSV files
    #[arg(long, env = "PHONECHECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Official numbers CSV (phone,result,feedback)
    #[arg(long, env = "PHONECHECK_OFFICIAL_CSV")]
    official_csv: Option<PathBuf>,

    /// Scam numbers CSV (phone,result,...)
    #[arg(long, env = "PHONECHECK_SCAM_CSV")]
    scam_csv: Option<PathBuf>,

    /// Call log store: sqlite:///web_log.db, csv://web_log.csv or disabled.
    /// Unusable values start the server in list-only mode.
    #[arg(long, env = "DATABASE_URL")]
    log_store: Option<String>,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_filter: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "PHONECHECK_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    phonecheck::telemetry::init(&cli.log_filter, cli.json_logs);

    info!("Starting phonecheck v{}", env!("CARGO_PKG_VERSION"));

    let config = build_config(RawSettings {
        bind: cli.bind,
        data_dir: cli.data_dir,
        official_csv: cli.official_csv,
        scam_csv: cli.scam_csv,
        log_store: cli.log_store,
    })
    .context("invalid configuration")?;

    info!(
        "Using official list {}, scam list {}, log backend {}",
        config.official_csv.display(),
        config.scam_csv.display(),
        config.log_store.backend_name()
    );

    phonecheck::serve(config).await.context("server failed")?;
    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use margin_sdk::{config, AsyncMarginSdk, Encoding};
use tracing::info;
use tracing_subscriber::EnvFilter;

use margin_api::refresh::spawn_periodic_reload;
use margin_api::state::AppState;

#[derive(Parser)]
#[command(name = "margin-api")]
#[command(about = "Serve purchase/sale price margins over HTTP", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the product, purchase and sale tables
    #[arg(long, env = "MARGIN_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Products table file name
    #[arg(long, env = "MARGIN_PRODUCTS_FILE", default_value = config::PRODUCTS_FILE)]
    products_file: String,

    /// Purchases table file name
    #[arg(long, env = "MARGIN_PURCHASES_FILE", default_value = config::PURCHASES_FILE)]
    purchases_file: String,

    /// Sales table file name
    #[arg(long, env = "MARGIN_SALES_FILE", default_value = config::SALES_FILE)]
    sales_file: String,

    /// Text encoding of the tables (utf-8 or latin1)
    #[arg(long, env = "MARGIN_ENCODING", default_value = "utf-8")]
    encoding: Encoding,

    /// Field delimiter (single ASCII character)
    #[arg(long, env = "MARGIN_DELIMITER", default_value_t = '\t')]
    delimiter: char,

    /// Address to listen on
    #[arg(long, env = "MARGIN_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Reload the tables every N seconds (disabled when unset or 0)
    #[arg(long, env = "MARGIN_REFRESH_SECS")]
    refresh_secs: Option<u64>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", cli.delimiter);
    }

    info!(
        "loading tables from {} ({})",
        cli.data_dir.display(),
        cli.encoding
    );
    let sdk = AsyncMarginSdk::builder()
        .data_dir(&cli.data_dir)
        .products_file(cli.products_file)
        .purchases_file(cli.purchases_file)
        .sales_file(cli.sales_file)
        .encoding(cli.encoding)
        .delimiter(cli.delimiter as u8)
        .build()
        .await
        .context("failed to load source tables")?;
    info!("{}", sdk.sdk());

    let state = Arc::new(AppState { sdk });

    if let Some(secs) = cli.refresh_secs.filter(|s| *s > 0) {
        info!("reloading tables every {secs}s");
        spawn_periodic_reload(state.clone(), Duration::from_secs(secs));
    }

    let app = margin_api::router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!("listening on http://{}", cli.bind);
    axum::serve(listener, app).await?;
    Ok(())
}

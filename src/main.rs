use analytics::AnalyticsEngine;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the optflow dashboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if one exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting optflow.");

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Summary(args) => handle_summary(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// An interactive dashboard over a spreadsheet of options-trade records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the trade spreadsheet and serve the dashboard.
    Serve(ServeArgs),
    /// Print the daily views for one date as terminal tables.
    Summary(SummaryArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Parser)]
struct SummaryArgs {
    /// The trade date to summarize (format: YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,

    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Starts the dashboard server with the configured data file and bind address.
async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(&args.config)?;
    web_server::run_server(config).await
}

/// Renders the daily views for one date as terminal tables.
fn handle_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(&args.config)?;
    let store = dataset::load_trades(&config.data.path)?;
    let engine = AnalyticsEngine::new();

    let day = store.day(args.date)?;
    let summary = engine.daily_summary(args.date, &day)?;

    let mut metrics = Table::new();
    metrics.set_header(vec![
        "First Trade",
        "Mean Trade Size",
        "Median Trade Size",
        "Total Volume",
        "Last Trade",
    ]);
    metrics.add_row(vec![
        summary.first_trade.format("%H:%M:%S").to_string(),
        summary.mean_trade_size.to_string(),
        summary.median_trade_size.to_string(),
        summary.total_volume.to_string(),
        summary.last_trade.format("%H:%M:%S").to_string(),
    ]);
    println!("Daily Trends for {}\n{metrics}", args.date);

    let top = engine.top_trades(&day, config.dashboard.top_trades);
    let mut top_table = Table::new();
    top_table.set_header(vec![
        "Time",
        "Product",
        "Expiration",
        "C/P",
        "Side",
        "Size",
        "% of Total",
    ]);
    for trade in &top {
        top_table.add_row(vec![
            trade.time.format("%H:%M:%S").to_string(),
            trade.underlying.clone(),
            trade.expiration.to_string(),
            trade.option_type.code().to_string(),
            trade.side.code().to_string(),
            trade.size.to_string(),
            trade.pct_of_total.to_string(),
        ]);
    }
    println!(
        "\nTop {} Trades by Size on {}\n{top_table}",
        top.len(),
        args.date
    );

    for (title, buckets) in [
        ("Trade Volume by Product", engine.volume_by_product(&day)),
        (
            "Trade Volume by Expiration Date",
            engine.volume_by_expiration(&day),
        ),
    ] {
        let mut table = Table::new();
        table.set_header(vec!["Key", "Volume", "% of Total"]);
        for bucket in buckets {
            table.add_row(vec![
                bucket.key,
                bucket.total_volume.to_string(),
                bucket.pct_of_total.to_string(),
            ]);
        }
        println!("\n{title} on {}\n{table}", args.date);
    }

    Ok(())
}

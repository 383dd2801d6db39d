mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ConnectionArgs;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "beanstream")]
#[command(about = "Look up and search Beanstream transactions")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a single transaction and its adjustments
    Transaction(commands::transaction::TransactionArgs),
    /// Search transactions by date range and criteria
    Search(commands::search::SearchArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("beanstream=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let client = cli.connection.into_client()?;

    match &cli.command {
        Commands::Transaction(args) => commands::transaction::run(args, &client, &format).await?,
        Commands::Search(args) => commands::search::run(args, &client, &format).await?,
    }

    Ok(())
}

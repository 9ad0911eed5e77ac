use anyhow::Result;
use clap::{Parser, Subcommand};

/// dinho - daily habit tracker
#[derive(Parser)]
#[command(name = "dinho")]
#[command(about = "Habit tracking API server", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Issue a bearer token
    Token {
        #[arg(long)]
        subject: String,

        /// Lifetime in days (defaults to jwt.expiration_days)
        #[arg(long)]
        days: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = dinho::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    dinho::observability::init_observability(&config.observability)?;

    match cli.command {
        Commands::Serve { host, port } => dinho::cli::serve(config, host, port).await,
        Commands::Migrate => dinho::cli::migrate(config).await,
        Commands::Reset => dinho::cli::reset(config).await,
        Commands::Token { subject, days } => dinho::cli::token(config, subject, days),
    }
}

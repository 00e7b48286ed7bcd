mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "handoff", about = "Payment checkout, user directory and task board tools")]
struct Cli {
    /// Suppress user notices; the exit status still reports failure
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit the payment form to the payment service
    Checkout(cmd::checkout::CheckoutArgs),

    /// POST a JSON document to a path on the payment service
    Send {
        #[arg(long)]
        path: String,

        /// JSON text to send as the body
        #[arg(long)]
        data: String,
    },

    /// GET a path on the payment service and print the text body
    Fetch {
        #[arg(long)]
        path: String,

        /// Query parameter as key=value; may be repeated
        #[arg(long = "param", value_parser = cmd::parse_param)]
        params: Vec<(String, String)>,
    },

    /// Read every document of the users collection
    Users {
        /// Overrides DIRECTORY_DATABASE
        #[arg(long)]
        database: Option<String>,

        /// Overrides DIRECTORY_COLLECTION
        #[arg(long)]
        collection: Option<String>,
    },

    /// List database names on the directory server
    Databases,

    /// Interactive task board driven by lines on stdin
    Board {
        /// Start in the dark theme
        #[arg(long)]
        dark: bool,
    },

    /// Print the monthly and projected hosting cost
    Estimate {
        /// TOML file overriding the default rates
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Checkout(args) => cmd::checkout::run(args, cli.quiet).await,
        Command::Send { path, data } => cmd::service::send(&path, &data).await,
        Command::Fetch { path, params } => cmd::service::fetch(&path, &params).await,
        Command::Users {
            database,
            collection,
        } => cmd::directory::users(database, collection, cli.quiet).await,
        Command::Databases => cmd::directory::databases().await,
        Command::Board { dark } => cmd::board::run(dark),
        Command::Estimate { config } => cmd::estimate(config.as_deref()),
    }
}

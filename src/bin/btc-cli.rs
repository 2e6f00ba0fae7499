use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "btc-cli")]
#[command(about = "Query a running btc-dashboard backend", long_about = None)]
struct Cli {
    #[arg(short, long, env = "BTC_DASHBOARD_URL", default_value = "http://localhost:5001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current BTC price with 24h change
    Price,
    /// Last 7 days of BTC prices
    History {
        /// Only print the most recent N points
        #[arg(long)]
        last: Option<usize>,
    },
    /// Liveness check
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (path, last) = match cli.command {
        Commands::Price => ("/api/btc/price", None),
        Commands::History { last } => ("/api/btc/history", last),
        Commands::Health => ("/health", None),
    };

    let res = client.get(format!("{}{}", base, path)).send().await?;
    let status = res.status();
    let mut json: Value = res.json().await?;

    if !status.is_success() || json.get("success") == Some(&Value::Bool(false)) {
        eprintln!("Error: {} returned status {}", path, status);
        if let Some(message) = json.get("message").and_then(Value::as_str) {
            eprintln!("Message: {}", message);
        }
        std::process::exit(1);
    }

    if let (Some(n), Some(Value::Array(points))) = (last, json.get_mut("data")) {
        let skip = points.len().saturating_sub(n);
        points.drain(..skip);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use streamsmart::core::config::{self, CliOverrides, StreamSmartConfig};

#[derive(Parser)]
#[command(name = "streamsmart", about = "Mood-based movie and show recommendations in your terminal")]
struct Args {
    /// Base URL of the recommendation backend (overrides config and STREAMSMART_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// User id sent with every request
    #[arg(long)]
    user_id: Option<String>,

    /// Number of recommendations to ask for
    #[arg(long)]
    top_n: Option<u32>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to streamsmart.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("streamsmart.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {e}");
        StreamSmartConfig::default()
    });

    let overrides = CliOverrides {
        api_url: args.api_url,
        user_id: args.user_id,
        top_n: args.top_n,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "StreamSmart starting up: backend={} user={} top_n={}",
        resolved.base_url,
        resolved.user_id,
        resolved.top_n
    );

    streamsmart::tui::run(resolved)
}

use clap::Parser;
use pinpoint::Locator;
use pinpoint::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "pinpoint", about = "Terminal map viewer with reverse-geocoded pins")]
struct Args {
    /// Location provider to use (overrides config)
    #[arg(short, long, value_enum)]
    locator: Option<Locator>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to pinpoint.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("pinpoint.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config unusable ({e}), falling back to defaults");
        Default::default()
    });
    let resolved = config::resolve(&file_config, args.locator.map(Locator::as_str));
    log::info!("Pinpoint starting up with locator: {}", resolved.locator);

    pinpoint::tui::run(resolved)
}

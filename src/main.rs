use clap::Parser;
use quote_tracker::cli::{Cli, Commands};
use quote_tracker::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    quote_tracker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Price(args) => args.execute(&config).await?,
        Commands::Prices(args) => args.execute(&config).await?,
        Commands::Watch(args) => {
            tracing::info!("Starting price watch");
            args.execute(&config).await?;
        }
        Commands::Portfolio(args) => args.execute(&config).await?,
        Commands::Config => {
            let key_set = config.provider.client_config().api_key.is_some();
            println!("Current configuration:");
            println!("  Provider: {}", config.provider.base_url);
            println!("  API key: {}", if key_set { "set" } else { "missing" });
            println!(
                "  Quota: {} requests / {}s",
                config.provider.request_limit, config.provider.window_secs
            );
            println!("  Timeout: {}s", config.provider.timeout_secs);
            println!(
                "  Poller: every {}s, symbols [{}]",
                config.poller.interval_secs,
                config.poller.symbols.join(", ")
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level, config.telemetry.log_format, config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}

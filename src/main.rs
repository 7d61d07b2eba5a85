mod cli;

use anyvod::{config, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    config::apply_env_overrides(&mut config);

    // CLI flags win over file and environment
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;
    for setting in config::missing_settings(&config) {
        tracing::warn!("{} is not set; catalog routes will fail", setting);
    }

    tracing::info!("Starting AnyVod API");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    tracing::info!("Embed provider: {}", config.embed.provider_base());

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "anyvod=trace,tower_http=debug".to_string()
        } else {
            "anyvod=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("anyvod {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => println!("Validating config: {:?}", p),
        None => println!("No config file specified, searching default locations"),
    }
    let mut config = config::load_config_or_default(path)?;
    config::apply_env_overrides(&mut config);
    config::validate_config(&config)?;

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Environment: {}", config.server.environment);
    println!("  Catalog: {}", config.catalog.base_url);
    println!(
        "  Catalog API key: {}",
        if config.catalog.api_key.is_some() {
            "set"
        } else {
            "missing"
        }
    );
    println!("  Embed provider: {}", config.embed.provider_base());
    println!("  Allowed origins: {}", config.server.allowed_origins.len());

    Ok(())
}

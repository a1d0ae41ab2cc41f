mod cli;

use anyhow::Result;
use catalog_core::config::Config;
use clap::Parser;
use cli::{Cli, Commands};

/// Load the config file (or defaults) and layer environment overrides on top.
fn load_config(path: Option<&std::path::Path>) -> Config {
    let mut config = Config::load_or_default(path);
    config.apply_env();
    config
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = load_config(config_path);

    // CLI flags win over file and environment
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting catalog server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    catalog_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "catalog=trace,catalog_server=trace,catalog_db=debug,catalog_core=debug,tower_http=debug"
                .to_string()
        } else {
            "catalog=info,catalog_server=info,catalog_db=info,catalog_core=info,tower_http=info"
                .to_string()
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
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("catalog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let contents = std::fs::read_to_string(p)?;
            let mut config = Config::from_json(&contents)?;
            config.apply_env();
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            load_config(None)
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Front-end origin: {}", config.server.front_url);
    println!("  Store backend: {:?}", config.storage.backend);
    println!("  Database: {}", config.storage.db_path.display());
    println!("  Images: {}", config.storage.image_dir.display());

    for warning in config.validate() {
        println!("  warning: {warning}");
    }

    Ok(())
}

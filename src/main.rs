//! access-webhooks - manage UniFi Access webhook endpoints.
//!
//! Main entry point for the command-line front-end.

mod cli;
mod cmd_webhook;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use access_webhooks_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, RegistryConfig};
use access_webhooks_core::WebhookManager;
use access_webhooks_registry_http::{HttpRegistry, HttpRegistryConfig};

use cli::{Cli, Commands};

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Console output goes to stderr so list/json output stays clean.
    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file = if logging.file_enabled {
        let log_dir = PathBuf::from(ConfigLoader::expand_path(&logging.directory));
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("access-webhooks")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keep the writer alive for the program duration.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

/// Load the config file and apply command-line overrides.
///
/// An explicitly named file must exist; the default one may be absent.
fn load_config(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(&Config::default_path())?,
    };

    if let Some(host) = &cli.host {
        config.registry.host = host.clone();
    }
    if let Some(token) = &cli.token {
        config.registry.token = Some(token.clone());
    }

    Ok(config)
}

fn build_registry(registry: &RegistryConfig) -> Result<HttpRegistry, Box<dyn Error>> {
    let token = registry.token.clone().unwrap_or_default();
    let mut config = HttpRegistryConfig::new(registry.host.as_str(), token)
        .with_timeout(registry.timeout())
        .with_accept_invalid_certs(registry.accept_invalid_certs);

    if let Some(ca_cert) = &registry.ca_cert {
        let path = ConfigLoader::expand_path(ca_cert);
        let pem = std::fs::read(&path)
            .map_err(|e| format!("Failed to read CA certificate {}: {}", path, e))?;
        config = config.with_ca_cert_pem(pem);
    }

    Ok(HttpRegistry::new(config)?)
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    // The catalog is static; no config or controller needed.
    if let Commands::Events = cli.command {
        cmd_webhook::print_events();
        return Ok(());
    }

    let config = load_config(&cli)?;
    init_tracing(&config.logging)?;

    let validation = ConfigValidator::validate(&config);
    for warning in validation.warnings() {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        let errors: Vec<String> = validation.errors().map(|e| format!("  {}", e)).collect();
        return Err(format!("Invalid configuration:\n{}", errors.join("\n")).into());
    }

    let registry = build_registry(&config.registry)?;
    debug!("Using registry at {}", registry.collection_url());

    let mut manager = WebhookManager::new(Arc::new(registry));
    cmd_webhook::handle_webhook_command(cli.command, &mut manager).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        if cmd_webhook::suggests_refresh(e.as_ref()) {
            eprintln!("The webhook list may be out of date. Run `access-webhooks list` to refresh.");
        }
        std::process::exit(1);
    }
}

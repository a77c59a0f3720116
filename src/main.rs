use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::{self, EnvFilter};

use letter_reset::client::ResetClient;
use letter_reset::config::Config;
use letter_reset::error::ResetError;
use letter_reset::session::{self, Outcome};

/// Asks for confirmation, then resets every motivation letter of the account
/// the configured token belongs to.
#[derive(Parser)]
#[command(name = "letter-reset")]
#[command(about = "Deletes all motivation letters and resets job statuses to pending")]
#[command(version)]
struct Cli {
    /// TOML file holding the API base URL and bearer token (falls back to LETTER_RESET_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diagnostics level on stderr: error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log request details to stderr (same as --log-level debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// `--config` wins; LETTER_RESET_CONFIG is only consulted without it
    fn config_path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => std::env::var_os("LETTER_RESET_CONFIG").map(PathBuf::from),
        }
    }
}

fn parse_level(level: &str) -> Result<Level, ResetError> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(ResetError::InvalidData(format!(
            "Invalid log level: {level}. Valid levels are: error, warn, info, debug, trace"
        ))),
    }
}

/// Initialize logging on stderr; stdout carries the report and the prompt
fn init_logging(config: &Config, cli: &Cli) -> Result<(), ResetError> {
    let configured = config.logging().level;
    let log_level = if cli.verbose {
        "debug"
    } else if let Some(ref level) = cli.log_level {
        level.as_str()
    } else {
        configured.as_deref().unwrap_or("warn")
    };

    parse_level(log_level)?;

    // An explicit flag wins over RUST_LOG, RUST_LOG wins over the config file
    let explicit = cli.verbose || cli.log_level.is_some();
    let env_filter = if explicit {
        EnvFilter::try_new(log_level)
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))
    }
    .map_err(|e| ResetError::InvalidData(format!("Failed to create log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    debug!("Logging initialized with level: {}", log_level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ResetError> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config_path()) {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .init();
            error!("Configuration error: {}", e);
            error!("Please check your configuration file and environment variables");
            return Err(ResetError::Config(e));
        }
    };

    if let Err(e) = init_logging(&config, &cli) {
        eprintln!("Failed to initialize logging: {e}");
        return Err(e);
    }

    info!("Starting letter-reset v{}", env!("CARGO_PKG_VERSION"));
    debug!("API configuration: {:?}", config.api);

    let client = ResetClient::new(config.api.clone())?;
    info!("Reset endpoint: {}", client.endpoint());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = session::run(&client, &mut stdin.lock(), &mut stdout.lock()).await?;

    match outcome {
        Outcome::Succeeded(_) => info!("Reset finished successfully"),
        Outcome::Failed(ref e) => warn!("Reset finished with failure: {e}"),
        Outcome::Cancelled => info!("Reset cancelled"),
    }

    Ok(())
}

use std::process::ExitCode;

use tracing::{error, info, warn};

use stash::{Config, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration. Problems are reported once logging is up.
    let (mut config, load_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let env_result = config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = stash::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        stash::logging::init_console_only(&config.logging.level);
    }

    if let Some(e) = load_error {
        warn!(path = %config_path, error = %e, "Failed to load config, using defaults");
    }

    if let Err(e) = env_result {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let server = match WebServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("stash file service starting on {}", server.addr());

    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

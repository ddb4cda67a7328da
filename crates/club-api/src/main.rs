//! Server binary.
//!
//! Reads configuration from the environment (honoring a `.env` file in
//! development) and serves until interrupted.

use club_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting club membership API server"
    );

    if let Err(e) = club_api::run(config).await {
        error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}

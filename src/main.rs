use tracing_subscriber::EnvFilter;

use caretide::advisor::ReferenceData;
use caretide::api::server::start_server_on;
use caretide::api::types::ApiContext;
use caretide::config::{self, ServerConfig};
use caretide::db::sqlite::open_database;
use caretide::upstream::AdvisorClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        version = config::APP_VERSION,
        db = %config.db_path.display(),
        "starting caretide"
    );

    let conn = open_database(&config.db_path)?;
    let reference = ReferenceData::load()?;

    let advisor = match &config.advisor_url {
        Some(url) => {
            tracing::info!(%url, timeout = config.advisor_timeout_secs, "advisory service configured");
            Some(AdvisorClient::new(url, config.advisor_timeout_secs)?)
        }
        None => {
            tracing::info!("no advisory service configured, serving local fallback only");
            None
        }
    };

    let ctx = ApiContext::new(conn, reference, advisor, config.api_token.clone());
    let mut server = start_server_on(ctx, config.bind_addr).await?;
    tracing::info!(addr = %server.addr, "listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();
    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Caretide";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Request budget for the external advisor service. Any call that has not
/// completed within this window is treated as unavailable.
pub const DEFAULT_ADVISOR_TIMEOUT_SECS: u64 = 5;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "caretide=info,tower_http=warn"
}

/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP API binds to.
    pub bind_addr: SocketAddr,
    /// Path of the SQLite record store.
    pub db_path: PathBuf,
    /// Bearer token required on protected routes.
    pub api_token: String,
    /// Base URL of the external AI advisor service. `None` means
    /// unconfigured, so every request goes straight to the local engine.
    pub advisor_url: Option<String>,
    /// Per-request budget for advisor calls, in seconds.
    pub advisor_timeout_secs: u64,
}

impl ServerConfig {
    /// Read configuration from `CARETIDE_*` environment variables,
    /// falling back to development defaults.
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("CARETIDE_ADDR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)));

        let db_path = std::env::var("CARETIDE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("caretide.db"));

        let api_token =
            std::env::var("CARETIDE_API_TOKEN").unwrap_or_else(|_| "dev-token".to_string());

        let advisor_url = std::env::var("CARETIDE_ADVISOR_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let advisor_timeout_secs = std::env::var("CARETIDE_ADVISOR_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ADVISOR_TIMEOUT_SECS);

        Self {
            bind_addr,
            db_path,
            api_token,
            advisor_url,
            advisor_timeout_secs,
        }
    }
}

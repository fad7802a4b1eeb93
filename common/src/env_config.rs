use std::{env, sync::Arc};

/// Value of `CORS_ALLOWED_ORIGIN` that opens the API to every origin.
pub const ANY_ORIGIN: &str = "*";

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the subscription service:
/// database location, bind address, worker count, CORS origin and
/// logging preferences.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the SQLite database to open.
    pub database_url: String,
    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS, or `*` for any origin.
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// File that receives a copy of the log output. `None` disables it.
    pub log_file: Option<String>,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads a `.env` file first if one is present. Every setting is optional.
    ///
    /// # Environment Variables
    ///
    /// - `ENVIRONMENT`: deployment name (default: "development")
    /// - `DATABASE_URL`: SQLite URL (default: "sqlite://subscriptions.sqlite?mode=rwc")
    /// - `DB_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 4000)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "*")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Log file path, empty to disable (default: "subscriptions.log")
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();
        Arc::new(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Config {
            environment: var("ENVIRONMENT", "development"),
            database_url: var("DATABASE_URL", "sqlite://subscriptions.sqlite?mode=rwc"),
            db_max_connections: var("DB_MAX_CONNECTIONS", "5").parse().unwrap_or(5),
            server_host: var("IP", "127.0.0.1"),
            server_port: var("PORT", "4000").parse().unwrap_or(4000),
            num_workers: var("WORKERS", "4").parse().unwrap_or(4),
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN", ANY_ORIGIN),
            console_logging_enabled: var("ENABLE_CONSOLE_LOGGING", "true").to_lowercase()
                == "true",
            log_file: Some(var("LOG_FILE", "subscriptions.log")).filter(|path| !path.is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

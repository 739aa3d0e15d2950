use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    /// Storage deadline applied when the caller does not send one.
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // PG_DSN is the name older deployments exported.
        let database_url = env_required("DATABASE_URL")
            .or_else(|_| env_required("PG_DSN"))
            .map_err(|_| "Missing required environment variable: DATABASE_URL (or PG_DSN)".to_string())?;

        let host: IpAddr = env_or("AUTH_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid AUTH_HOST: {e}"))?;

        let port: u16 = env_or("AUTH_PORT", "50051")
            .parse()
            .map_err(|e| format!("Invalid AUTH_PORT: {e}"))?;

        let db_max_connections: u32 = env_or("AUTH_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid AUTH_DB_MAX_CONNECTIONS: {e}"))?;
        if db_max_connections == 0 {
            return Err("Invalid AUTH_DB_MAX_CONNECTIONS: must be at least 1".to_string());
        }

        let db_acquire_timeout = env_secs("AUTH_DB_ACQUIRE_TIMEOUT_SECS", "5")?;
        let request_timeout = env_secs("AUTH_REQUEST_TIMEOUT_SECS", "30")?;

        let log_level = env_or("AUTH_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            db_max_connections,
            db_acquire_timeout,
            request_timeout,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_secs(key: &str, default: &str) -> Result<Duration, String> {
    parse_positive_secs(key, &env_or(key, default))
}

/// Parse a whole number of seconds for `key`. Zero is rejected: a zero
/// timeout would fail every call that uses it.
pub fn parse_positive_secs(key: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw.parse().map_err(|e| format!("Invalid {key}: {e}"))?;
    if secs == 0 {
        return Err(format!("Invalid {key}: must be at least 1"));
    }
    Ok(Duration::from_secs(secs))
}

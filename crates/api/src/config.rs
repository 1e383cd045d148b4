use agencybrain_core::quiz::DEFAULT_PASS_PERCENT;

use crate::auth::jwt::JwtConfig;

/// Default staff-portal session lifetime in hours.
const DEFAULT_STAFF_SESSION_TTL_HOURS: i64 = 24;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the listener closes.
    pub shutdown_timeout_secs: u64,
    /// Hosted-auth JWT verification settings.
    pub jwt: JwtConfig,
    /// Lifetime of a staff-portal session in hours (default: `24`).
    pub staff_session_ttl_hours: i64,
    /// Minimum quiz score (percent) that completes a lesson (default: `70`).
    pub quiz_pass_percent: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                       |
    /// | `STAFF_SESSION_TTL_HOURS` | `24`                       |
    /// | `QUIZ_PASS_PERCENT`       | `70`                       |
    ///
    /// See [`JwtConfig::from_env`] for the hosted-auth variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let staff_session_ttl_hours: i64 = std::env::var("STAFF_SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_STAFF_SESSION_TTL_HOURS.to_string())
            .parse()
            .expect("STAFF_SESSION_TTL_HOURS must be a valid i64");

        let quiz_pass_percent: u32 = std::env::var("QUIZ_PASS_PERCENT")
            .unwrap_or_else(|_| DEFAULT_PASS_PERCENT.to_string())
            .parse()
            .expect("QUIZ_PASS_PERCENT must be a valid u32");
        assert!(
            quiz_pass_percent <= 100,
            "QUIZ_PASS_PERCENT must be between 0 and 100"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            staff_session_ttl_hours,
            quiz_pass_percent,
        }
    }
}

use rivals_core::sanitize::SanitizeOptions;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// Store connection strings are read separately in `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins from the comma-separated `CORS_ORIGINS`. Empty
    /// means any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Key rewriting applied to input on the `/mongo` routes.
    pub sanitize: SanitizeOptions,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `5000`                     |
    /// | `CORS_ORIGINS`          | empty (any origin)         |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SANITIZE_REPLACE_WITH` | `_`                        |
    /// | `SANITIZE_ALLOW_DOTS`   | `true`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let defaults = SanitizeOptions::default();
        let replace_with = match std::env::var("SANITIZE_REPLACE_WITH") {
            Ok(value) => parse_single_char(&value)
                .expect("SANITIZE_REPLACE_WITH must be exactly one character"),
            Err(_) => defaults.replace_with,
        };
        let allow_dots: bool = match std::env::var("SANITIZE_ALLOW_DOTS") {
            Ok(value) => value
                .parse()
                .expect("SANITIZE_ALLOW_DOTS must be true or false"),
            Err(_) => defaults.allow_dots,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            sanitize: SanitizeOptions {
                replace_with,
                allow_dots,
            },
        }
    }
}

fn parse_single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

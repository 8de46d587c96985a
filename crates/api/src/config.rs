use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Maximum pool size (default: `20`).
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Externally visible base URL, used to build agent claim links.
    pub public_base_url: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `DATABASE_URL`         | required                   |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:8000`    |
    ///
    /// # Panics
    ///
    /// Panics on missing required variables or unparsable numbers, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = normalize_database_url(
            &std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
        );

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            database_url,
            db_max_connections,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            jwt,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accept the `postgresql://` scheme some hosting providers hand out.
fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgresql://") {
        Some(rest) => format!("postgres://{rest}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_filtered() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn postgresql_scheme_is_normalized() {
        assert_eq!(
            normalize_database_url("postgresql://u:p@h/db"),
            "postgres://u:p@h/db"
        );
        assert_eq!(normalize_database_url("postgres://h/db"), "postgres://h/db");
    }
}

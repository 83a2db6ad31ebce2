//! Storefront server configuration

use shared::CurrencyFormat;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded from the environment (`.env` supported)
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Connection pool size
    pub database_max_connections: u32,
    /// Environment: development | staging | production
    pub environment: String,
    /// Allowed CORS origins; empty means permissive (development only)
    pub cors_allowed_origins: Vec<String>,
    /// Request body limit in bytes
    pub max_body_size: usize,
    /// Display format of recalculated prices
    pub currency: CurrencyFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let cors_allowed_origins: Vec<String> = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if cors_allowed_origins.is_empty() && environment != "development" {
            return Err(
                format!("CORS_ALLOWED_ORIGINS must be set in {environment} environment").into(),
            );
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: env_parse("HTTP_PORT", 8080),
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 10),
            environment,
            cors_allowed_origins,
            max_body_size: env_parse("MAX_BODY_SIZE", 1024 * 1024),
            currency: currency_from_env()?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn currency_from_env() -> Result<CurrencyFormat, BoxError> {
    let mut currency = CurrencyFormat::default();
    if let Ok(symbol) = std::env::var("CURRENCY_SYMBOL") {
        currency.symbol = symbol;
    }
    if let Ok(sep) = std::env::var("CURRENCY_DECIMAL_SEPARATOR") {
        currency.decimal_separator = single_char("CURRENCY_DECIMAL_SEPARATOR", &sep)?;
    }
    if let Ok(sep) = std::env::var("CURRENCY_THOUSANDS_SEPARATOR") {
        currency.thousands_separator = single_char("CURRENCY_THOUSANDS_SEPARATOR", &sep)?;
    }
    if currency.decimal_separator == currency.thousands_separator {
        return Err("currency decimal and thousands separators must differ".into());
    }
    Ok(currency)
}

fn single_char(name: &str, value: &str) -> Result<char, BoxError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("{name} must be a single character, got {value:?}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char() {
        assert_eq!(single_char("X", ",").unwrap(), ',');
        assert!(single_char("X", "").is_err());
        assert!(single_char("X", ".,").is_err());
    }
}

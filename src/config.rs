use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Postgres connection string. `None` selects mock mode: deals and
    /// revenue are served from an in-memory fixture store.
    pub database_url: Option<String>,
    pub port: u16,
    /// Rate limit: sustained requests per second per client IP.
    pub rate_limit_per_second: u64,
    /// Rate limit: burst allowance per client IP.
    pub rate_limit_burst: u32,
    /// TTL for cached revenue/metrics aggregation responses.
    pub metrics_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })
                .transpose()?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            rate_limit_per_second: std::env::var("RATE_LIMIT_PER_SECOND")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_PER_SECOND must be a positive number"))?,
            rate_limit_burst: std::env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST must be a positive number"))?,
            metrics_cache_ttl_secs: std::env::var("METRICS_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("METRICS_CACHE_TTL_SECS must be a number"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        match &config.database_url {
            Some(url) => tracing::debug!("Database URL: {}...", &url[..20.min(url.len())]),
            None => tracing::info!("No DATABASE_URL configured, running in mock mode"),
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Fixed configuration used by tests; mock mode, no environment reads.
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            port: 3000,
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
            metrics_cache_ttl_secs: 60,
        }
    }
}

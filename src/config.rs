use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Endpoints and credentials of the third-party catalogs.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    pub rapidapi_key: Option<String>,
    pub exercisedb_base_url: String,
    pub mealdb_base_url: String,
    pub openfoodfacts_base_url: String,
    pub http_timeout_secs: u64,
}

/// How much of the exercise catalog is mirrored on first start.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ExerciseSeedConfig {
    pub max_total: usize,
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub sources: SourcesConfig,
    pub exercise_seed: ExerciseSeedConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env_parse("APP_PORT", 8080);
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://fittrack.db".into());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "fittrack".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "fittrack-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };
        let sources = SourcesConfig {
            rapidapi_key: std::env::var("RAPIDAPI_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            exercisedb_base_url: std::env::var("EXERCISEDB_BASE_URL")
                .unwrap_or_else(|_| "https://exercisedb.p.rapidapi.com".into()),
            mealdb_base_url: std::env::var("MEALDB_BASE_URL")
                .unwrap_or_else(|_| "https://themealdb.p.rapidapi.com".into()),
            openfoodfacts_base_url: std::env::var("OPENFOODFACTS_BASE_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org".into()),
            http_timeout_secs: env_parse("HTTP_TIMEOUT_SECS", 10),
        };
        let exercise_seed = ExerciseSeedConfig {
            max_total: env_parse("EXERCISE_SEED_MAX", 150),
            page_size: env_parse("EXERCISE_SEED_PAGE_SIZE", 50),
        };
        Ok(Self {
            host,
            port,
            database_url,
            jwt,
            sources,
            exercise_seed,
        })
    }
}

impl AppConfig {
    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

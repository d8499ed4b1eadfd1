use serde::Deserialize;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub secret_key: String,
    pub token_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let secret_key = std::env::var("SECRET_KEY")
            .unwrap_or_else(|_| "3d6f45a5fc12445dbac2f59c3b6c7cb1".into());
        let token_ttl_minutes = std::env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(30);
        Ok(Self {
            database_url,
            secret_key,
            token_ttl_minutes,
        })
    }
}

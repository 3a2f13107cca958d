use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::Path;

/// Application configuration loaded once from environment variables.
///
/// Immutable after construction; the pieces the codec and gate need are
/// passed into their constructors rather than looked up ambiently.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub private_key_path: String,
    pub public_key_path: String,
    pub jwt_algorithm: String,
    pub jwt_expiration_minutes: i64,
}

impl Config {
    /// Load configuration from environment variables, with development
    /// defaults for everything.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/app.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            private_key_path: env::var("PRIVATE_KEY_PATH")
                .unwrap_or_else(|_| "secrets/private.pem".to_string()),
            public_key_path: env::var("PUBLIC_KEY_PATH")
                .unwrap_or_else(|_| "secrets/public.pem".to_string()),
            jwt_algorithm: env::var("JWT_ALGORITHM").unwrap_or_else(|_| "RS256".to_string()),
            jwt_expiration_minutes: env::var("JWT_EXPIRATION_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("JWT_EXPIRATION_MINUTES must be a valid number")?,
        })
    }

    /// Read the signing key PEM. Failure here is fatal at startup.
    pub fn read_private_key(&self) -> Result<Vec<u8>> {
        std::fs::read(Path::new(&self.private_key_path))
            .with_context(|| format!("failed to read private key at {}", self.private_key_path))
    }

    /// Read the verification key PEM. Failure here is fatal at startup.
    pub fn read_public_key(&self) -> Result<Vec<u8>> {
        std::fs::read(Path::new(&self.public_key_path))
            .with_context(|| format!("failed to read public key at {}", self.public_key_path))
    }
}

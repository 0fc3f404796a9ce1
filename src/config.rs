//! Application configuration loaded from environment variables.
//!
//! Identity and storage are both hosted services, so the only secret the
//! server needs is the identity provider's web API key.

use std::env;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_PORT: u16 = 8080;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP / Firebase project ID (Firestore database and token audience)
    pub gcp_project_id: String,
    /// Identity Toolkit web API key
    pub firebase_api_key: String,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let gcp_project_id = env::var("GCP_PROJECT_ID")
            .or_else(|_| env::var("FIREBASE_PROJECT_ID"))
            .map_err(|_| ConfigError::Missing("GCP_PROJECT_ID"))?;

        let firebase_api_key = env::var("FIREBASE_API_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("FIREBASE_API_KEY"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            gcp_project_id,
            firebase_api_key,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port,
        })
    }

    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            firebase_api_key: "test-api-key".to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Whether the Firestore emulator is configured.
    pub fn firestore_emulator() -> bool {
        env::var("FIRESTORE_EMULATOR_HOST").is_ok()
    }

    /// Firebase Auth emulator host, if configured.
    pub fn auth_emulator_host() -> Option<String> {
        env::var("FIREBASE_AUTH_EMULATOR_HOST")
            .ok()
            .filter(|h| !h.is_empty())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

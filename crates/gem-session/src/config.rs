use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base URL (e.g. http://localhost:3000/api)
    pub api_url: String,

    /// Environment: development, production, test
    pub environment: String,

    /// Application display name
    pub app_name: String,

    /// Use the canned demo backend instead of the real API
    pub enable_demo_mode: bool,

    /// Directory holding the persisted session entries
    pub storage_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables (with .env support).
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if missing)
        let _ = dotenvy::dotenv();

        Config {
            api_url: std::env::var("GEM_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api".to_string()),
            environment: std::env::var("GEM_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            app_name: std::env::var("GEM_APP_NAME")
                .unwrap_or_else(|_| "Sistema Académico GEM".to_string()),
            enable_demo_mode: matches!(
                std::env::var("GEM_DEMO_MODE")
                    .unwrap_or_default()
                    .to_lowercase()
                    .as_str(),
                "true" | "1" | "yes"
            ),
            storage_dir: std::env::var("GEM_SESSION_DIR")
                .unwrap_or_else(|_| "./.gem-session".to_string())
                .into(),
        }
    }

    /// Check if running in development mode.
    pub fn is_dev(&self) -> bool {
        self.environment == "development"
    }
}

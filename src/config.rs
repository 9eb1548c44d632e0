use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Enrichment fan-out configuration
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Remote service endpoints
    #[serde(default)]
    pub services: ServicesConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: SHOWFINDER)
            .add_source(
                config::Environment::with_prefix("SHOWFINDER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Configuration for the enrichment fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum simultaneous in-flight detail fetches per stage
    pub max_concurrent: usize,

    /// Deadline for a single detail fetch (seconds)
    pub fetch_timeout_secs: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            fetch_timeout_secs: 10,
        }
    }
}

/// Remote service endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the cinema finder / showtime API
    pub cinelist_base_url: String,

    /// Base URL of the movie detail API
    pub tmdb_base_url: String,

    /// API key for the movie detail API
    pub tmdb_api_key: String,

    /// HTTP client timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            cinelist_base_url: "https://api.cinelist.co.uk".to_string(),
            tmdb_base_url: "https://api.themoviedb.org/3".to_string(),
            tmdb_api_key: String::new(),
            request_timeout_secs: 10,
        }
    }
}

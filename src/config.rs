use serde::{Deserialize, Serialize};

/// Main configuration structure loaded from outreach.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub sender: SenderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Text-generation endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_ms: u64,
    /// Extra attempts after the first failed request
    pub max_retries: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama3-8b-8192".to_string(),
            temperature: 0.3,
            max_tokens: None,
            timeout_ms: 30_000,
            max_retries: 2,
        }
    }
}

/// Identity used in signatures of rendered emails
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SenderConfig {
    pub from_name: String,
    pub from_email: String,
    pub contact_phone: String,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            from_name: "Insurance Specialist".to_string(),
            from_email: "insurance@youragency.com".to_string(),
            contact_phone: "(555) 123-4567".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "outreach.db".to_string(),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            log_level: "outreach_engine=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn load_from_env() -> Self {
        Self {
            api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "outreach_engine=info".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses OUTREACH_CONFIG or defaults to "outreach.toml".
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(env_path) = std::env::var("OUTREACH_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path =
            std::env::var("OUTREACH_CONFIG").unwrap_or_else(|_| "outreach.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("OUTREACH_MODEL") {
            self.generation.model = model;
            tracing::debug!("OUTREACH_MODEL env override applied");
        }
        if let Ok(url) = std::env::var("OUTREACH_BASE_URL") {
            self.generation.base_url = url;
            tracing::debug!("OUTREACH_BASE_URL env override applied");
        }
        if let Some(t) = std::env::var("OUTREACH_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
        {
            self.generation.temperature = t;
        }
        if let Some(ms) = std::env::var("OUTREACH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.generation.timeout_ms = ms;
        }
        if let Some(n) = std::env::var("OUTREACH_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            self.generation.max_retries = n;
        }
        if let Ok(path) = std::env::var("OUTREACH_DB_PATH") {
            self.storage.db_path = path;
        }
        if let Ok(name) = std::env::var("FROM_NAME") {
            self.sender.from_name = name;
        }
        if let Ok(email) = std::env::var("FROM_EMAIL") {
            self.sender.from_email = email;
        }
        if let Ok(phone) = std::env::var("CONTACT_PHONE") {
            self.sender.contact_phone = phone;
        }
    }

    /// Clamp values that have a safe range instead of rejecting them
    pub fn normalize(&mut self) {
        if self.generation.max_retries > 5 {
            tracing::warn!(
                "max_retries {} exceeds max 5, clamping to 5",
                self.generation.max_retries
            );
            self.generation.max_retries = 5;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            anyhow::bail!(
                "generation temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            );
        }
        if self.generation.timeout_ms == 0 {
            anyhow::bail!("generation timeout_ms must be > 0");
        }
        if !self.generation.base_url.starts_with("http://")
            && !self.generation.base_url.starts_with("https://")
        {
            tracing::warn!(
                "Generation base URL '{}' doesn't start with http:// or https://",
                self.generation.base_url
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [generation]
            model = "llama-3.1-8b-instant"

            [sender]
            from_name = "Dana Reyes"
            "#,
        )
        .unwrap();
        assert_eq!(config.generation.model, "llama-3.1-8b-instant");
        assert_eq!(config.generation.max_retries, 2);
        assert_eq!(config.sender.from_name, "Dana Reyes");
        assert_eq!(config.sender.contact_phone, "(555) 123-4567");
        assert_eq!(config.storage.db_path, "outreach.db");
    }

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.generation.temperature, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_temperature() {
        let mut config = Config::default();
        config.generation.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.generation.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn normalize_clamps_retries() {
        let mut config = Config::default();
        config.generation.max_retries = 40;
        config.normalize();
        assert_eq!(config.generation.max_retries, 5);
    }
}

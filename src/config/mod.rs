use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default browser-like identifying header. Some marketing hosts 4xx
/// unidentified clients.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/125.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    pub http: HttpConfig,

    /// Media-platform endpoints
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Timeout for the whole extraction run, in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Metadata endpoint template; `{media_id}` is replaced with the
    /// discovered embed identifier
    pub metadata_url_template: String,

    /// Base URL that relative caption `src` values resolve against
    pub caption_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                user_agent: DEFAULT_USER_AGENT.to_string(),
                timeout_secs: 30,
            },
            platform: PlatformConfig {
                metadata_url_template: "https://fast.wistia.com/embed/medias/{media_id}.json"
                    .to_string(),
                caption_base_url: "https://fast.wistia.com/".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("pagescribe").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.http.user_agent.is_empty() {
            anyhow::bail!("HTTP user agent must not be empty");
        }

        if !self.platform.metadata_url_template.contains("{media_id}") {
            anyhow::bail!("Metadata URL template must contain a {{media_id}} placeholder");
        }

        url::Url::parse(&self.platform.caption_base_url)
            .context("Caption base URL is not a valid absolute URL")?;

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  User-Agent: {}", self.http.user_agent);
        println!("  Timeout: {}s", self.http.timeout_secs);
        println!("  Metadata URL template: {}", self.platform.metadata_url_template);
        println!("  Caption base URL: {}", self.platform.caption_base_url);
    }

    /// Derive the metadata endpoint for a discovered embed identifier
    pub fn metadata_url(&self, media_id: &str) -> String {
        self.platform
            .metadata_url_template
            .replace("{media_id}", media_id)
    }
}

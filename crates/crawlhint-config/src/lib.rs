//! Configuration management for crawlhint.
//!
//! Parses `crawlhint.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every section is
//! optional; the defaults describe the `victorfts.com` deployment.
//!
//! Credentials never live in the file. They are read from the process
//! environment through [`Credentials`].
//!
//! ## Environment Variable Expansion
//!
//! String values in `[site]` and `[endpoints]` support environment variable
//! expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod credentials;
mod expand;

pub use credentials::{Credentials, GOOGLE_SERVICE_ACCOUNT_KEY_VAR, INDEXNOW_KEY_VAR};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "crawlhint.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Public site description.
    pub site: SiteConfig,
    /// Remote notification endpoints.
    pub endpoints: EndpointsConfig,
    /// HTTP client settings.
    pub http: HttpConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Public site description.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin prepended to every permalink.
    pub origin: String,
    /// Hostname reported to `IndexNow`. Derived from `origin` when unset.
    pub host: Option<String>,
    /// Path of the feed announced to the `WebSub` hub.
    pub feed_path: String,
    /// Directory prefixes holding content files.
    pub content_paths: Vec<String>,
    /// Content file extension, including the dot.
    pub extension: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://victorfts.com".to_owned(),
            host: None,
            feed_path: "/feed.xml".to_owned(),
            content_paths: vec!["docs/_posts/".to_owned(), "docs/_pages/".to_owned()],
            extension: ".md".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Hostname of the site, e.g. `victorfts.com`.
    #[must_use]
    pub fn host(&self) -> String {
        if let Some(host) = &self.host {
            return host.clone();
        }
        let without_scheme = self
            .origin
            .split_once("://")
            .map_or(self.origin.as_str(), |(_, rest)| rest);
        without_scheme
            .split('/')
            .next()
            .unwrap_or(without_scheme)
            .to_owned()
    }

    /// Absolute URL of the site feed.
    #[must_use]
    pub fn feed_url(&self) -> String {
        format!("{}{}", self.origin, self.feed_path)
    }
}

/// Remote notification endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// OAuth2 token endpoint for the JWT-bearer grant.
    pub google_token: String,
    /// Google Indexing API publish endpoint.
    pub google_indexing: String,
    /// `IndexNow` submission endpoint.
    pub indexnow: String,
    /// `WebSub` hub.
    pub websub_hub: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            google_token: "https://oauth2.googleapis.com/token".to_owned(),
            google_indexing: "https://indexing.googleapis.com/v3/urlNotifications:publish"
                .to_owned(),
            indexnow: "https://api.indexnow.org/indexnow".to_owned(),
            websub_hub: "https://pubsubhubbub.appspot.com/".to_owned(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.origin`").
        field: String,
        /// Error message (e.g., `${SITE_ORIGIN} not set`).
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `crawlhint.toml` in `start_dir` and its parents, falling back to
    /// defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(config_path: Option<&Path>, start_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match Self::discover_config(start_dir) {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Search for config file in `start_dir` and its parents.
    fn discover_config(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.normalize();
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_endpoints()?;

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.origin, "site.origin")?;
        require_http_url(&self.site.origin, "site.origin")?;
        require_non_empty(&self.site.extension, "site.extension")?;

        if self.site.content_paths.is_empty() {
            return Err(ConfigError::Validation(
                "site.content_paths cannot be empty".to_owned(),
            ));
        }
        for path in &self.site.content_paths {
            require_non_empty(path, "site.content_paths")?;
        }
        if let Some(host) = &self.site.host {
            require_non_empty(host, "site.host")?;
        }

        Ok(())
    }

    fn validate_endpoints(&self) -> Result<(), ConfigError> {
        let endpoints = [
            (&self.endpoints.google_token, "endpoints.google_token"),
            (&self.endpoints.google_indexing, "endpoints.google_indexing"),
            (&self.endpoints.indexnow, "endpoints.indexnow"),
            (&self.endpoints.websub_hub, "endpoints.websub_hub"),
        ];
        for (url, field) in endpoints {
            require_non_empty(url, field)?;
            require_http_url(url, field)?;
        }
        Ok(())
    }

    /// Trim the origin so permalinks can be appended directly.
    fn normalize(&mut self) {
        let trimmed = self.site.origin.trim_end_matches('/').len();
        self.site.origin.truncate(trimmed);
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.origin = expand::expand_env(&self.site.origin, "site.origin")?;
        if let Some(ref host) = self.site.host {
            self.site.host = Some(expand::expand_env(host, "site.host")?);
        }
        self.site.feed_path = expand::expand_env(&self.site.feed_path, "site.feed_path")?;

        let endpoints = &mut self.endpoints;
        endpoints.google_token =
            expand::expand_env(&endpoints.google_token, "endpoints.google_token")?;
        endpoints.google_indexing =
            expand::expand_env(&endpoints.google_indexing, "endpoints.google_indexing")?;
        endpoints.indexnow = expand::expand_env(&endpoints.indexnow, "endpoints.indexnow")?;
        endpoints.websub_hub = expand::expand_env(&endpoints.websub_hub, "endpoints.websub_hub")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.origin, "https://victorfts.com");
        assert_eq!(config.site.host(), "victorfts.com");
        assert_eq!(config.site.feed_url(), "https://victorfts.com/feed.xml");
        assert_eq!(
            config.site.content_paths,
            vec!["docs/_posts/".to_owned(), "docs/_pages/".to_owned()]
        );
        assert_eq!(config.site.extension, ".md");
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.origin, "https://victorfts.com");
        assert_eq!(
            config.endpoints.indexnow,
            "https://api.indexnow.org/indexnow"
        );
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
origin = "https://example.org"
content_paths = ["content/"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.origin, "https://example.org");
        assert_eq!(config.site.host(), "example.org");
        assert_eq!(config.site.content_paths, vec!["content/".to_owned()]);
        assert_eq!(config.site.extension, ".md");
    }

    #[test]
    fn test_explicit_host_wins() {
        let site = SiteConfig {
            origin: "https://www.example.org:8443/blog".to_owned(),
            host: Some("example.org".to_owned()),
            ..SiteConfig::default()
        };
        assert_eq!(site.host(), "example.org");
    }

    #[test]
    fn test_host_strips_path() {
        let site = SiteConfig {
            origin: "https://example.org/blog".to_owned(),
            ..SiteConfig::default()
        };
        assert_eq!(site.host(), "example.org");
    }

    #[test]
    fn test_validate_rejects_non_http_origin() {
        let mut config = Config::default();
        config.site.origin = "ftp://example.org".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.origin"));
    }

    #[test]
    fn test_validate_rejects_empty_content_paths() {
        let mut config = Config::default();
        config.site.content_paths.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.content_paths"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/crawlhint.toml")), Path::new("."));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_discovers_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[site]\norigin = \"https://example.org/\"\n",
        )
        .unwrap();
        let nested = dir.path().join("docs/_posts");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config::load(None, &nested).unwrap();
        assert_eq!(config.site.origin, "https://example.org");
        assert_eq!(
            config.config_path,
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_expands_env_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[endpoints]\nindexnow = \"${CRAWLHINT_TEST_UNSET_ENDPOINT:-https://yandex.com/indexnow}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), dir.path()).unwrap();
        assert_eq!(config.endpoints.indexnow, "https://yandex.com/indexnow");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site\norigin = ").unwrap();

        let result = Config::load(Some(&path), dir.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

use crate::{ChatSettings, ConfigError};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use url::Url;

pub const DEFAULT_SECRETS_PATH: &str = ".legalease/secrets.toml";

/// Model API credential. Its `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(default)]
    openai: Option<OpenAiSecrets>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAiSecrets {
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigSources<'a> {
    pub api_key: Option<&'a str>,
    pub secrets_path: &'a Path,
    pub base_url: &'a str,
    pub chat: ChatSettings,
}

/// Settings resolved once at start-up and passed by reference afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKey,
    pub base_url: Url,
    pub chat: ChatSettings,
}

impl AppConfig {
    pub fn resolve(sources: ConfigSources<'_>) -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(sources.api_key, sources.secrets_path)?;
        let base_url = Url::parse(sources.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: sources.base_url.to_string(),
            source,
        })?;

        Ok(Self {
            api_key,
            base_url,
            chat: sources.chat,
        })
    }
}

/// An explicit key (flag or environment) wins over the secrets file.
pub fn resolve_api_key(explicit: Option<&str>, secrets_path: &Path) -> Result<ApiKey, ConfigError> {
    if let Some(key) = non_blank(explicit) {
        return Ok(ApiKey::new(key));
    }

    let missing = || ConfigError::MissingCredential(secrets_path.display().to_string());
    let raw = match fs::read_to_string(secrets_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => return Err(missing()),
        Err(source) => {
            return Err(ConfigError::SecretsFile {
                path: secrets_path.display().to_string(),
                source,
            })
        }
    };

    let secrets: SecretsFile = toml::from_str(&raw).map_err(|source| ConfigError::SecretsParse {
        path: secrets_path.display().to_string(),
        source,
    })?;

    let key = secrets.openai.and_then(|openai| openai.api_key);
    non_blank(key.as_deref()).map(ApiKey::new).ok_or_else(missing)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

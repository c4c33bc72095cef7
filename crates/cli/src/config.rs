//! Credentials and endpoint overrides read from the environment.

use pipeline::ConfigError;

pub const NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ANTHROPIC_BASE_URL: &str = "ANTHROPIC_BASE_URL";

const REQUIRED: [&str; 2] = [NEWS_API_KEY, ANTHROPIC_API_KEY];

/// Everything the adapters need from the environment.
#[derive(Clone)]
pub struct Settings {
    pub news_api_key: String,
    pub anthropic_api_key: String,
    pub news_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
}

impl Settings {
    /// Reads the process environment. Load `.env` first with `dotenvy::dotenv`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Builds settings from `lookup`. Every missing credential is reported in one error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|&&name| get(name).is_none())
            .map(|&name| name.to_string())
            .collect();
        if !missing.is_empty() {
            for name in &missing {
                tracing::warn!(credential = %name, "Credential not found");
            }
            return Err(ConfigError::MissingCredentials { names: missing });
        }

        let news_api_key = get(NEWS_API_KEY).unwrap_or_default();
        let anthropic_api_key = get(ANTHROPIC_API_KEY).unwrap_or_default();
        tracing::info!(credential = NEWS_API_KEY, preview = %mask(&news_api_key), "Credential loaded");
        tracing::info!(credential = ANTHROPIC_API_KEY, preview = %mask(&anthropic_api_key), "Credential loaded");

        Ok(Self {
            news_api_key,
            anthropic_api_key,
            news_base_url: get(NEWS_API_BASE_URL),
            anthropic_base_url: get(ANTHROPIC_BASE_URL),
        })
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("news_api_key", &mask(&self.news_api_key))
            .field("anthropic_api_key", &mask(&self.anthropic_api_key))
            .field("news_base_url", &self.news_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .finish()
    }
}

/// Presence of one required credential, for `--check-config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStatus {
    pub name: &'static str,
    /// Masked preview, `None` when the credential is absent.
    pub preview: Option<String>,
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.preview {
            Some(preview) => write!(f, "{} is set ({})", self.name, preview),
            None => write!(f, "{} is missing", self.name),
        }
    }
}

/// Reports every required credential without revealing its value.
pub fn credential_report(lookup: impl Fn(&str) -> Option<String>) -> Vec<CredentialStatus> {
    REQUIRED
        .iter()
        .map(|&name| CredentialStatus {
            name,
            preview: lookup(name)
                .filter(|v| !v.trim().is_empty())
                .map(|v| mask(&v)),
        })
        .collect()
}

/// Shows at most the first four characters and the length of a secret.
pub fn mask(value: &str) -> String {
    let length = value.chars().count();
    if length <= 8 {
        return format!("**** ({length} chars)");
    }
    let head: String = value.chars().take(4).collect();
    format!("{head}... ({length} chars)")
}

/// Logs the outcome of loading `.env`. A missing file is not an error.
pub fn report_dotenv(result: &Result<std::path::PathBuf, dotenvy::Error>) {
    match result {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Could not read .env file"),
    }
}

pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn both_credentials_present() {
        let settings = Settings::from_lookup(lookup(&[
            (NEWS_API_KEY, "news-key-123456"),
            (ANTHROPIC_API_KEY, "sk-ant-abcdefgh"),
            (NEWS_API_BASE_URL, "http://localhost:8080"),
        ]))
        .unwrap();
        assert_eq!(settings.news_api_key, "news-key-123456");
        assert_eq!(settings.anthropic_api_key, "sk-ant-abcdefgh");
        assert_eq!(settings.news_base_url.as_deref(), Some("http://localhost:8080"));
        assert!(settings.anthropic_base_url.is_none());
    }

    #[test]
    fn all_missing_credentials_are_reported_together() {
        let err = Settings::from_lookup(lookup(&[(ANTHROPIC_API_KEY, "  ")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingCredentials {
                names: vec![NEWS_API_KEY.to_string(), ANTHROPIC_API_KEY.to_string()]
            }
        );
    }

    #[test]
    fn mask_never_reveals_short_secrets() {
        assert_eq!(mask("abc"), "**** (3 chars)");
        assert_eq!(mask("sk-ant-api03-xyz"), "sk-a... (16 chars)");
    }

    #[test]
    fn debug_output_is_masked() {
        let settings = Settings::from_lookup(lookup(&[
            (NEWS_API_KEY, "news-secret-value"),
            (ANTHROPIC_API_KEY, "anthropic-secret-value"),
        ]))
        .unwrap();
        let printed = format!("{settings:?}");
        assert!(!printed.contains("news-secret-value"));
        assert!(!printed.contains("anthropic-secret-value"));
    }

    #[test]
    fn report_lists_each_credential() {
        let report = credential_report(lookup(&[(NEWS_API_KEY, "news-key-123456")]));
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].to_string(), "NEWS_API_KEY is set (news... (15 chars))");
        assert_eq!(report[1].to_string(), "ANTHROPIC_API_KEY is missing");
    }
}

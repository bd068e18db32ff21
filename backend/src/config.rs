//! Runtime configuration read from the environment (and `.env`, when present).

use common::limits::DEFAULT_MODEL;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` runs the service in fallback mode.
    pub google_api_key: Option<String>,
    pub google_model: String,
    pub gemini_base_url: String,
    pub llm_temperature: f32,
    pub max_output_tokens: u32,
    pub api_host: String,
    pub api_port: u16,
    pub fonts_dir: PathBuf,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            llm_temperature: 0.3,
            max_output_tokens: 4000,
            api_host: "127.0.0.1".to_string(),
            api_port: 8080,
            fonts_dir: PathBuf::from("./fonts"),
            open_browser: true,
        }
    }
}

impl Config {
    /// Loads `.env` if there is one, then reads the process environment.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from any key lookup; unset or unparsable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            google_api_key: string("GOOGLE_API_KEY").filter(|key| !key.starts_with("your_")),
            google_model: string("GOOGLE_MODEL").unwrap_or(defaults.google_model),
            gemini_base_url: string("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gemini_base_url),
            llm_temperature: parsed(&string, "LLM_TEMPERATURE", defaults.llm_temperature),
            max_output_tokens: parsed(&string, "MAX_OUTPUT_TOKENS", defaults.max_output_tokens),
            api_host: string("API_HOST").unwrap_or(defaults.api_host),
            api_port: parsed(&string, "API_PORT", defaults.api_port),
            fonts_dir: string("FONTS_DIR").map(PathBuf::from).unwrap_or(defaults.fonts_dir),
            open_browser: string("OPEN_BROWSER")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(defaults.open_browser),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.api_host, self.api_port)
    }
}

fn parsed<T, F>(string: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match string(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has an invalid value '{}', using the default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn values_are_read_and_parsed() {
        let config = config_from(&[
            ("GOOGLE_API_KEY", "abc123"),
            ("GOOGLE_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9000/v1beta/"),
            ("LLM_TEMPERATURE", "0.7"),
            ("API_PORT", "9090"),
            ("OPEN_BROWSER", "false"),
        ]);

        assert_eq!(config.google_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.google_model, "gemini-2.5-pro");
        assert_eq!(config.gemini_base_url, "http://localhost:9000/v1beta");
        assert!((config.llm_temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.api_port, 9090);
        assert!(!config.open_browser);
    }

    #[test]
    fn placeholder_key_and_bad_numbers_fall_back() {
        let config = config_from(&[
            ("GOOGLE_API_KEY", "your_google_api_key_here"),
            ("API_PORT", "eighty"),
            ("MAX_OUTPUT_TOKENS", "  "),
        ]);

        assert!(config.google_api_key.is_none());
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.max_output_tokens, 4000);
    }
}

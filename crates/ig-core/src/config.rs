//! Configuration management
//!
//! Settings are resolved in the following order:
//! 1. Environment variables
//! 2. ig-tools.toml configuration file
//! 3. Defaults
//!
//! `${VAR_NAME}` placeholders inside the configuration file are expanded
//! from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

fn default_api_version() -> String {
    "v22.0".to_string()
}

/// Credentials and endpoint version for the Instagram Graph API.
///
/// Read-only after construction; a missing access token or account id is a
/// fatal configuration error raised here, never later at request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Instagram Graph API access token
    pub access_token: String,

    /// Instagram professional account (IG user) id
    pub account_id: String,

    /// Graph API version segment, e.g. "v22.0"
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl GraphConfig {
    /// Create a configuration from explicit values
    pub fn new(
        access_token: impl Into<String>,
        account_id: impl Into<String>,
        api_version: Option<String>,
    ) -> Result<Self> {
        let access_token = access_token.into();
        let account_id = account_id.into();

        if access_token.is_empty() {
            return Err(Error::Config("access token must not be empty".to_string()));
        }
        if account_id.is_empty() {
            return Err(Error::Config("account id must not be empty".to_string()));
        }

        Ok(Self {
            access_token,
            account_id,
            api_version: api_version.unwrap_or_else(default_api_version),
        })
    }

    /// Load configuration from environment variables
    ///
    /// `INSTAGRAM_ACCESS_TOKEN` (or `META_PAGE_ACCESS_TOKEN`) and
    /// `INSTAGRAM_ACCOUNT_ID` are required; `META_GRAPH_API_VERSION` is
    /// optional.
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("INSTAGRAM_ACCESS_TOKEN")
            .or_else(|_| std::env::var("META_PAGE_ACCESS_TOKEN"))
            .map_err(|_| {
                Error::Config(
                    "INSTAGRAM_ACCESS_TOKEN or META_PAGE_ACCESS_TOKEN not set".to_string(),
                )
            })?;

        let account_id = std::env::var("INSTAGRAM_ACCOUNT_ID")
            .map_err(|_| Error::Config("INSTAGRAM_ACCOUNT_ID not set".to_string()))?;

        Self::new(
            access_token,
            account_id,
            std::env::var("META_GRAPH_API_VERSION")
                .ok()
                .filter(|v| !v.is_empty()),
        )
    }

    /// Load configuration from a TOML file
    ///
    /// `${VAR_NAME}` placeholders are expanded from the environment before
    /// parsing; environment variables then take precedence over file values.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let toml_content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded = expand_env_vars(&toml_content);

        let file: TomlConfig = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let instagram = file.instagram.unwrap_or_default();

        let mut access_token = instagram.access_token.unwrap_or_default();
        let mut account_id = instagram.account_id.unwrap_or_default();
        let mut api_version = instagram.api_version;

        // Environment variables win over the file
        if let Ok(token) = std::env::var("INSTAGRAM_ACCESS_TOKEN") {
            access_token = token;
        }
        if let Ok(id) = std::env::var("INSTAGRAM_ACCOUNT_ID") {
            account_id = id;
        }
        if let Ok(version) = std::env::var("META_GRAPH_API_VERSION") {
            if !version.is_empty() {
                api_version = Some(version);
            }
        }

        Self::new(access_token, account_id, api_version)
    }

    /// Load configuration from the default locations
    ///
    /// Uses `./ig-tools.toml` when present, otherwise the environment.
    pub fn load() -> Result<Self> {
        if Path::new("ig-tools.toml").exists() {
            return Self::from_toml_file("ig-tools.toml");
        }

        Self::from_env()
    }
}

/// Expand `${VAR_NAME}` placeholders with environment variable values.
///
/// Unset variables expand to the empty string.
fn expand_env_vars(value: &str) -> String {
    let mut result = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '}' {
                    chars.next(); // consume '}'
                    break;
                }
                var_name.push(chars.next().unwrap());
            }

            if let Ok(env_value) = std::env::var(&var_name) {
                result.push_str(&env_value);
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Top-level structure of ig-tools.toml
#[derive(Debug, Deserialize)]
struct TomlConfig {
    instagram: Option<TomlInstagramConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlInstagramConfig {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    account_id: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_api_version() {
        let cfg = GraphConfig::new("token", "1789", None).unwrap();
        assert_eq!(cfg.api_version, "v22.0");
    }

    #[test]
    fn test_new_rejects_empty_token() {
        let err = GraphConfig::new("", "1789", None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_new_rejects_empty_account_id() {
        let err = GraphConfig::new("token", "", None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("IG_TOOLS_TEST_VAR", "test_value");
        }

        let result = expand_env_vars("prefix_${IG_TOOLS_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = expand_env_vars("prefix_${IG_TOOLS_NONEXISTENT}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("IG_TOOLS_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        assert_eq!(expand_env_vars("no_vars_here"), "no_vars_here");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_content = r#"
[instagram]
access_token = "file_token"
account_id = "17890000000000000"
api_version = "v21.0"
"#;

        let parsed: TomlConfig = toml::from_str(toml_content).unwrap();
        let instagram = parsed.instagram.unwrap();
        assert_eq!(instagram.access_token, Some("file_token".to_string()));
        assert_eq!(instagram.account_id, Some("17890000000000000".to_string()));
        assert_eq!(instagram.api_version, Some("v21.0".to_string()));
    }
}

//! Configuration loading from disk and the environment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::schema::{CredentialsConfig, RelayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Listen port.
pub const ENV_PORT: &str = "PORT";
/// Public half of the upstream credential pair.
pub const ENV_PUBLIC_KEY: &str = "CYBERHUB_PUBLIC_KEY";
/// Private half of the upstream credential pair.
pub const ENV_PRIVATE_KEY: &str = "CYBERHUB_PRIVATE_KEY";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the effective configuration: defaults, then the optional TOML file,
/// then process environment, then the credential fallback file.
pub fn resolve_config(path: Option<&Path>, env_file: &Path) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config_file(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    if !config.credentials.is_complete() {
        let file_vars = read_env_file(env_file);
        fill_missing_credentials(&mut config.credentials, |key| file_vars.get(key).cloned());
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply `PORT` and credential variables found through `lookup`.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT).filter(|v| !v.trim().is_empty()) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            key: ENV_PORT,
            value: port.clone(),
        })?;
    }

    if let Some(public_key) = lookup(ENV_PUBLIC_KEY).filter(|v| !v.is_empty()) {
        config.credentials.public_key = public_key;
    }
    if let Some(private_key) = lookup(ENV_PRIVATE_KEY).filter(|v| !v.is_empty()) {
        config.credentials.private_key = private_key;
    }

    Ok(())
}

/// Fill whichever credential halves are still empty.
pub fn fill_missing_credentials<F>(credentials: &mut CredentialsConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if credentials.public_key.is_empty() {
        if let Some(value) = lookup(ENV_PUBLIC_KEY) {
            credentials.public_key = value;
        }
    }
    if credentials.private_key.is_empty() {
        if let Some(value) = lookup(ENV_PRIVATE_KEY) {
            credentials.private_key = value;
        }
    }
}

/// Read a `KEY=VALUE` file without touching the process environment.
///
/// A missing or unreadable file yields an empty map.
pub fn read_env_file(path: &Path) -> HashMap<String, String> {
    match fs::read_to_string(path) {
        Ok(content) => parse_env_lines(&content),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Credential file not loaded");
            HashMap::new()
        }
    }
}

/// Values are taken literally: no `$VAR` expansion, no inline comments.
/// Blank lines and lines without `=` are skipped; key and value are trimmed
/// and surrounding quotes are removed from the value.
fn parse_env_lines(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let (key, value) = line.trim().split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("relay-env-{}", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_env_overrides_port_and_credentials() {
        let mut config = RelayConfig::default();
        apply_env_overrides(
            &mut config,
            lookup_from(&[
                ("PORT", "3001"),
                ("CYBERHUB_PUBLIC_KEY", "pk"),
                ("CYBERHUB_PRIVATE_KEY", "sk"),
            ]),
        )
        .unwrap();

        assert_eq!(config.listener.port, 3001);
        assert_eq!(config.credentials.public_key, "pk");
        assert_eq!(config.credentials.private_key, "sk");
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        let mut config = RelayConfig::default();
        let err = apply_env_overrides(&mut config, lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: "PORT", .. }));
    }

    #[test]
    fn test_empty_port_keeps_default() {
        let mut config = RelayConfig::default();
        apply_env_overrides(&mut config, lookup_from(&[("PORT", "")])).unwrap();
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn test_env_file_parsing() {
        let path = temp_file(
            "# upstream keys\n\
             \n\
             CYBERHUB_PUBLIC_KEY=\"pk_quoted\"\n\
             not a pair\n\
             CYBERHUB_PRIVATE_KEY='sk_single'\n",
        );

        let vars = read_env_file(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(vars.get("CYBERHUB_PUBLIC_KEY").map(String::as_str), Some("pk_quoted"));
        assert_eq!(vars.get("CYBERHUB_PRIVATE_KEY").map(String::as_str), Some("sk_single"));
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let path = std::env::temp_dir().join(format!("relay-missing-{}", uuid::Uuid::new_v4()));
        assert!(read_env_file(&path).is_empty());
    }

    #[test]
    fn test_file_only_fills_missing_credentials() {
        let mut credentials = CredentialsConfig {
            public_key: "from_env".into(),
            private_key: String::new(),
        };
        fill_missing_credentials(
            &mut credentials,
            lookup_from(&[
                ("CYBERHUB_PUBLIC_KEY", "from_file"),
                ("CYBERHUB_PRIVATE_KEY", "secret_from_file"),
            ]),
        );

        assert_eq!(credentials.public_key, "from_env");
        assert_eq!(credentials.private_key, "secret_from_file");
    }

    #[test]
    fn test_env_file_values_are_literal() {
        let path = temp_file(
            "CYBERHUB_PUBLIC_KEY=\"pk #1\"\n\
             CYBERHUB_PRIVATE_KEY=sk_x$yz\n\
             OTHER = a #b\n\
             =no_key\n",
        );

        let vars = read_env_file(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(vars.get("CYBERHUB_PUBLIC_KEY").map(String::as_str), Some("pk #1"));
        assert_eq!(vars.get("CYBERHUB_PRIVATE_KEY").map(String::as_str), Some("sk_x$yz"));
        assert_eq!(vars.get("OTHER").map(String::as_str), Some("a #b"));
        assert_eq!(vars.len(), 3);
    }

    #[test]
    fn test_value_keeps_inner_equals_sign() {
        let vars = parse_env_lines("CYBERHUB_PRIVATE_KEY=c2s=\n");
        assert_eq!(vars.get("CYBERHUB_PRIVATE_KEY").map(String::as_str), Some("c2s="));
    }

    #[test]
    fn test_resolve_config_validates_file() {
        let path = temp_file("[upstream]\ntimeout_secs = 0\n");
        let missing = std::env::temp_dir().join(format!("relay-missing-{}", uuid::Uuid::new_v4()));
        let result = resolve_config(Some(&path), &missing);
        fs::remove_file(&path).unwrap();

        match result {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::ZeroTimeout]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}

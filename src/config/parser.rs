use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use crate::errors::VermatrixError;
use super::types::{VermatrixConfig, VERSION_PLACEHOLDER};
use super::schema::CONFIG_SCHEMA;
use tracing::debug;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+){0,2}$").expect("version pattern compiles"));

pub async fn parse_config(path: &Path) -> Result<VermatrixConfig, VermatrixError> {
    if !path.exists() {
        return Err(VermatrixError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(VermatrixError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse and validate config text. An empty document yields the default config.
pub fn parse_config_str(content: &str) -> Result<VermatrixConfig, VermatrixError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    if yaml.is_null() {
        debug!("Empty config document, using defaults");
        return Ok(VermatrixConfig::default());
    }

    validate_schema(&yaml)?;

    let config: VermatrixConfig = serde_yaml::from_value(yaml)?;

    validate_config(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), VermatrixError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| VermatrixError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| VermatrixError::Internal(format!("Schema compilation error: {}", e)))?;

    let messages: Vec<String> = match compiled.validate(&json_value) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{} at {}", e, path)
                }
            })
            .collect(),
    };

    if messages.is_empty() {
        Ok(())
    } else {
        // Unquoted versions such as 3.10 arrive as floats and fail the string check
        Err(VermatrixError::Config(format!(
            "Invalid config ({}). Quote version numbers, e.g. \"3.10\".",
            messages.join("; ")
        )))
    }
}

/// Checks that go beyond the schema: version syntax, template placeholder,
/// environment prefix shape.
pub fn validate_config(config: &VermatrixConfig) -> Result<(), VermatrixError> {
    if let Some(versions) = &config.versions {
        validate_versions(versions)?;
    }

    if let Some(template) = &config.interpreter {
        if !template.contains(VERSION_PLACEHOLDER) {
            return Err(VermatrixError::Config(format!(
                "Interpreter template '{}' must contain {}",
                template, VERSION_PLACEHOLDER
            )));
        }
    }

    if let Some(prefix) = &config.env_prefix {
        if prefix.contains('/') || prefix.contains('\\') {
            return Err(VermatrixError::Config(format!(
                "Environment prefix '{}' must be a plain directory name prefix",
                prefix
            )));
        }
    }

    Ok(())
}

/// A version list is usable when it is non-empty, every entry looks like
/// `3`, `3.12` or `3.12.1`, and no entry repeats.
pub fn validate_versions(versions: &[String]) -> Result<(), VermatrixError> {
    if versions.is_empty() {
        return Err(VermatrixError::Config("Version list is empty".into()));
    }

    let mut seen = HashSet::new();
    for version in versions {
        if !VERSION_RE.is_match(version) {
            return Err(VermatrixError::Config(format!("Malformed version identifier: '{}'", version)));
        }
        if !seen.insert(version.as_str()) {
            return Err(VermatrixError::Config(format!("Duplicate version identifier: '{}'", version)));
        }
    }

    Ok(())
}

/// Split a comma-separated `--versions` value.
pub fn parse_version_list(raw: &str) -> Result<Vec<String>, VermatrixError> {
    let versions: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    validate_versions(&versions)?;
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_versions_accepts_common_forms() {
        assert!(validate_versions(&strings(&["3", "3.12", "3.12.1"])).is_ok());
    }

    #[test]
    fn test_validate_versions_rejects_malformed() {
        assert!(validate_versions(&strings(&["3.x"])).is_err());
        assert!(validate_versions(&strings(&["python3.12"])).is_err());
        assert!(validate_versions(&strings(&[""])).is_err());
        assert!(validate_versions(&strings(&["3.12; rm -rf /"])).is_err());
    }

    #[test]
    fn test_validate_versions_rejects_non_ascii_digits() {
        // Arabic-Indic and fullwidth digits
        assert!(validate_versions(&strings(&["٣.١٢"])).is_err());
        assert!(validate_versions(&strings(&["３.１２"])).is_err());
        assert!(parse_version_list("3.12,٣.١٣").is_err());
    }

    #[test]
    fn test_validate_versions_rejects_duplicates() {
        let err = validate_versions(&strings(&["3.11", "3.12", "3.11"])).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_validate_versions_rejects_empty() {
        assert!(validate_versions(&[]).is_err());
    }

    #[test]
    fn test_parse_version_list() {
        let versions = parse_version_list(" 3.10, 3.11 ,3.12").unwrap();
        assert_eq!(versions, strings(&["3.10", "3.11", "3.12"]));
        assert!(parse_version_list(",,").is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
versions: ["3.10", "3.11"]
project_dir: "."
env_prefix: ".venv-ci-"
interpreter: "python{version}"
checks:
  config: ".pre-commit-config.yaml"
  hooks: ["ruff", "mypy"]
  extra_packages: ["tox"]
step_timeout_secs: 600
fail_fast: true
"#;
        let config = parse_config_str(yaml).unwrap();
        assert_eq!(config.versions.unwrap().len(), 2);
        assert_eq!(config.env_prefix.as_deref(), Some(".venv-ci-"));
        assert_eq!(config.step_timeout_secs, Some(600));
        assert_eq!(config.fail_fast, Some(true));
    }

    #[test]
    fn test_parse_empty_config_is_default() {
        let config = parse_config_str("").unwrap();
        assert!(config.versions.is_none());
    }

    #[test]
    fn test_unquoted_versions_rejected() {
        let err = parse_config_str("versions: [3.10, 3.11]\n").unwrap_err();
        assert!(matches!(err, VermatrixError::Config(_)));
        assert!(err.to_string().contains("Quote version numbers"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config_str("pythons: [\"3.10\"]\n").is_err());
    }

    #[test]
    fn test_interpreter_template_requires_placeholder() {
        let err = parse_config_str("interpreter: \"python3\"\n").unwrap_err();
        assert!(err.to_string().contains("{version}"));
    }

    #[test]
    fn test_env_prefix_must_not_be_a_path() {
        assert!(parse_config_str("env_prefix: \"../escape-\"\n").is_err());
    }

    #[test]
    fn test_malformed_version_in_file() {
        assert!(parse_config_str("versions: [\"3.10\", \"latest\"]\n").is_err());
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let err = parse_config(Path::new("/nonexistent/vermatrix.yaml")).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

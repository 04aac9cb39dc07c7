//! rollbook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Output style for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Plain,
}

/// Top-level rollbook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbookConfig {
    /// Backing file for student records.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Listing format when `--format` is not given.
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("students.txt")
}

impl Default for RollbookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_format: OutputFormat::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim; references inside them are not
/// expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. the explicit `path` (`--config`), which must exist
/// 2. `rollbook.toml` in the current directory
/// 3. `~/.config/rollbook/config.toml`
///
/// Environment variable override: `ROLLBOOK_DATA_FILE`.
pub fn load_config_from(path: Option<&Path>) -> Result<RollbookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("rollbook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => RollbookConfig::default(),
    };

    if let Ok(data_file) = std::env::var("ROLLBOOK_DATA_FILE") {
        if !data_file.is_empty() {
            config.data_file = PathBuf::from(data_file);
        }
    }

    config.data_file = PathBuf::from(resolve_env_vars(&config.data_file.to_string_lossy()));
    tracing::debug!("using data file {}", config.data_file.display());

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<RollbookConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<RollbookConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("rollbook"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_ROLLBOOK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_ROLLBOOK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_ROLLBOOK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_vars"), "no_vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_ROLLBOOK_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_reexpand_values() {
        std::env::set_var("_ROLLBOOK_SELF_REF", "${_ROLLBOOK_SELF_REF}");
        std::env::set_var("_ROLLBOOK_OUTER", "${_ROLLBOOK_INNER}");
        std::env::set_var("_ROLLBOOK_INNER", "inner");

        assert_eq!(
            resolve_env_vars("${_ROLLBOOK_SELF_REF}.txt"),
            "${_ROLLBOOK_SELF_REF}.txt"
        );
        assert_eq!(
            resolve_env_vars("${_ROLLBOOK_OUTER}/${_ROLLBOOK_INNER}"),
            "${_ROLLBOOK_INNER}/inner"
        );

        std::env::remove_var("_ROLLBOOK_SELF_REF");
        std::env::remove_var("_ROLLBOOK_OUTER");
        std::env::remove_var("_ROLLBOOK_INNER");
    }

    #[test]
    fn default_config() {
        let config = RollbookConfig::default();
        assert_eq!(config.data_file, PathBuf::from("students.txt"));
        assert_eq!(config.default_format, OutputFormat::Table);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
data_file = "/var/lib/rollbook/class-7b.txt"
default_format = "json"
"#;
        let config: RollbookConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.data_file,
            PathBuf::from("/var/lib/rollbook/class-7b.txt")
        );
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn parse_empty_config_uses_defaults() {
        let config: RollbookConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_file, PathBuf::from("students.txt"));
        assert_eq!(config.default_format, OutputFormat::Table);
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/rollbook.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rollbook.toml");
        std::fs::write(&path, "data_file = \"class.txt\"\ndefault_format = \"plain\"\n").unwrap();

        let config = parse_config_file(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("class.txt"));
        assert_eq!(config.default_format, OutputFormat::Plain);
    }

    #[test]
    fn malformed_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rollbook.toml");
        std::fs::write(&path, "data_file = [not toml").unwrap();
        assert!(parse_config_file(&path).is_err());
    }
}

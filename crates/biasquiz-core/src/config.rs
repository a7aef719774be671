//! Quiz configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::loader::{DEFAULT_LIMIT, DEFAULT_SOURCES};

/// Top-level biasquiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Candidate claim files, tried in order.
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,
    /// Maximum number of claims per quiz.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_sources() -> Vec<PathBuf> {
    DEFAULT_SOURCES.iter().map(PathBuf::from).collect()
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            limit: default_limit(),
        }
    }
}

impl QuizConfig {
    /// Put `path` ahead of every configured source.
    pub fn prepend_source(&mut self, path: impl Into<PathBuf>) {
        self.sources.insert(0, path.into());
    }

    /// Reject configurations that can never produce a quiz.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.limit == 0 {
            return Err(QuizError::InvalidConfig("limit must be at least 1".into()));
        }
        if self.sources.is_empty() {
            return Err(QuizError::InvalidConfig("no claim sources configured".into()));
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `biasquiz.toml` in the current directory
/// 2. `~/.config/biasquiz/config.toml`
///
/// Environment variable overrides: `BIASQUIZ_LIMIT`, `BIASQUIZ_DATA`.
///
/// An explicit `path` must exist and replaces the search. The result is not
/// validated; callers apply their own overrides first and then call
/// [`QuizConfig::validate`].
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config_from`] with a caller-supplied environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<QuizConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("biasquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path(&env)
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config, &env)?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut QuizConfig, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(limit) = env("BIASQUIZ_LIMIT") {
        config.limit = limit
            .trim()
            .parse()
            .with_context(|| format!("BIASQUIZ_LIMIT is not a number: {limit}"))?;
    }

    if let Some(data) = env("BIASQUIZ_DATA") {
        if !data.trim().is_empty() {
            config.prepend_source(data.trim());
        }
    }

    Ok(())
}

fn dirs_path<F>(env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    env("HOME").map(|h| PathBuf::from(h).join(".config").join("biasquiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.limit, 10);
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.sources[0], PathBuf::from("./biases.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_toml() {
        let config: QuizConfig = toml::from_str("limit = 5").unwrap();
        assert_eq!(config.limit, 5);
        assert_eq!(config.sources, default_sources());
    }

    #[test]
    fn parse_sources() {
        let toml_str = r#"
sources = ["/srv/quiz/biases.json", "fallback.json"]
limit = 3
"#;
        let config: QuizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[1], PathBuf::from("fallback.json"));
    }

    #[test]
    fn zero_limit_rejected() {
        let config = QuizConfig {
            limit: 0,
            ..QuizConfig::default()
        };
        assert!(matches!(config.validate(), Err(QuizError::InvalidConfig(_))));
    }

    #[test]
    fn prepend_goes_first() {
        let mut config = QuizConfig::default();
        config.prepend_source("mine.json");
        assert_eq!(config.sources[0], PathBuf::from("mine.json"));
        assert_eq!(config.sources.len(), 4);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biasquiz.toml");
        std::fs::write(&path, "limit = 4\nsources = [\"x.json\"]\n").unwrap();

        let config = load_config_with(Some(&path), no_env).unwrap();
        assert_eq!(config.limit, 4);
        assert_eq!(config.sources, vec![PathBuf::from("x.json")]);
    }

    #[test]
    fn env_limit_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biasquiz.toml");
        std::fs::write(&path, "limit = 4\n").unwrap();

        let config = load_config_with(Some(&path), |key| {
            (key == "BIASQUIZ_LIMIT").then(|| " 7 ".to_string())
        })
        .unwrap();
        assert_eq!(config.limit, 7);
    }

    #[test]
    fn env_limit_must_be_numeric() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biasquiz.toml");
        std::fs::write(&path, "").unwrap();

        let err = load_config_with(Some(&path), |key| {
            (key == "BIASQUIZ_LIMIT").then(|| "ten".to_string())
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("BIASQUIZ_LIMIT is not a number: ten"));
    }

    #[test]
    fn env_data_is_tried_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biasquiz.toml");
        std::fs::write(&path, "sources = [\"a.json\", \"b.json\"]\n").unwrap();

        let config = load_config_with(Some(&path), |key| {
            (key == "BIASQUIZ_DATA").then(|| "mine.json".to_string())
        })
        .unwrap();
        assert_eq!(
            config.sources,
            vec![
                PathBuf::from("mine.json"),
                PathBuf::from("a.json"),
                PathBuf::from("b.json"),
            ]
        );
    }

    #[test]
    fn blank_env_data_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biasquiz.toml");
        std::fs::write(&path, "sources = [\"a.json\"]\n").unwrap();

        let config = load_config_with(Some(&path), |key| {
            (key == "BIASQUIZ_DATA").then(|| "   ".to_string())
        })
        .unwrap();
        assert_eq!(config.sources, vec![PathBuf::from("a.json")]);
    }

    #[test]
    fn loading_does_not_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biasquiz.toml");
        std::fs::write(&path, "limit = 0\n").unwrap();

        let mut config = load_config_with(Some(&path), no_env).unwrap();
        assert!(config.validate().is_err());
        config.limit = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn global_config_found_via_home() {
        let home = tempfile::tempdir().unwrap();
        let global = home.path().join(".config").join("biasquiz");
        std::fs::create_dir_all(&global).unwrap();
        std::fs::write(global.join("config.toml"), "limit = 2\n").unwrap();

        let home_str = home.path().display().to_string();
        let config =
            load_config_with(None, |key| (key == "HOME").then(|| home_str.clone())).unwrap();
        assert_eq!(config.limit, 2);
    }
}

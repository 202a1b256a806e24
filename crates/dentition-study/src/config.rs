//! dentition configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dentition_core::navigator::DEFAULT_ANIMATION_DELAY;
use dentition_core::search::SearchMode;

use crate::rng::{RandomSource, SplitMix64};
use crate::session::StudyType;

/// Top-level dentition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DentitionConfig {
    /// Directory holding saved study state.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// How long timeline navigation is locked after each move.
    #[serde(default = "default_animation_delay_ms")]
    pub animation_delay_ms: u64,
    /// Study type for new sessions.
    #[serde(default)]
    pub default_study_type: StudyType,
    /// Search policy when `--mode` is not given.
    #[serde(default)]
    pub default_search_mode: SearchMode,
    /// Fixed shuffle seed. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./.dentition")
}
fn default_animation_delay_ms() -> u64 {
    DEFAULT_ANIMATION_DELAY.as_millis() as u64
}

impl Default for DentitionConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            animation_delay_ms: default_animation_delay_ms(),
            default_study_type: StudyType::default(),
            default_search_mode: SearchMode::default(),
            seed: None,
        }
    }
}

impl DentitionConfig {
    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.animation_delay_ms)
    }

    /// Shuffle source: seeded when configured, otherwise from entropy.
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(SplitMix64::new(seed)),
            None => Box::new(SplitMix64::from_entropy()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `dentition.toml` in the current directory
/// 2. `~/.config/dentition/config.toml`
///
/// Environment variable override: `DENTITION_DATA_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<DentitionConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("dentition.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => DentitionConfig::default(),
    };

    if let Ok(dir) = std::env::var("DENTITION_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<DentitionConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("dentition"))
}

/// Starter config written by `dentition init`.
pub const SAMPLE_CONFIG: &str = r#"# dentition configuration

# Where study sessions and statistics are saved.
data_dir = "./.dentition"

# Timeline navigation lock after each step, in milliseconds.
animation_delay_ms = 500

# eruption, notation or mixed
default_study_type = "eruption"

# tokenized, fuzzy or exact
default_search_mode = "tokenized"

# Uncomment for reproducible card order.
# seed = 42
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_DENTITION_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_DENTITION_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_DENTITION_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_DENTITION_TEST_VAR");
    }

    #[test]
    fn resolved_values_are_not_expanded_again() {
        std::env::set_var("_DENTITION_SELF_REF", "${_DENTITION_SELF_REF}");
        assert_eq!(
            resolve_env_vars("a/${_DENTITION_SELF_REF}/b"),
            "a/${_DENTITION_SELF_REF}/b"
        );
        std::env::remove_var("_DENTITION_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = DentitionConfig::default();
        assert_eq!(config.animation_delay(), Duration::from_millis(500));
        assert_eq!(config.default_study_type, StudyType::Eruption);
        assert_eq!(config.default_search_mode, SearchMode::Tokenized);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn sample_config_parses_to_defaults() {
        let config = parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, DentitionConfig::default());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
default_study_type = "notation"
default_search_mode = "fuzzy"
seed = 7
"#,
        )
        .unwrap();
        assert_eq!(config.default_study_type, StudyType::Notation);
        assert_eq!(config.default_search_mode, SearchMode::Fuzzy);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.data_dir, PathBuf::from("./.dentition"));
    }

    #[test]
    fn unknown_study_type_is_an_error() {
        assert!(parse_config(r#"default_study_type = "essay""#).is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/dentition.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dentition.toml");
        std::fs::write(&path, "animation_delay_ms = 10\nseed = 1\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.animation_delay_ms, 10);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn seeded_random_source_is_reproducible() {
        let config = DentitionConfig {
            seed: Some(11),
            ..Default::default()
        };
        let a = config.random_source().next_u64();
        let b = config.random_source().next_u64();
        assert_eq!(a, b);
    }
}

//! Splitter settings loaded from the `splitter:` section of a YAML config file.

use serde::{Deserialize, Serialize};
use splitkit_core::{AppError, AppResult};
use std::fs;
use std::path::Path;

use crate::config::{KeepSeparator, SplitConfig};
use crate::language::Language;
use crate::length::LengthUnit;

/// Serializable splitter settings.
///
/// ```yaml
/// splitter:
///   chunk_size: 512
///   chunk_overlap: 64
///   language: markdown
///   keep_separator: start
///   length: graphemes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterSettings {
    /// Maximum chunk length
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Explicit separators; empty means "use the language table"
    #[serde(default)]
    pub separators: Vec<String>,

    /// Treat `separators` as regular expressions
    #[serde(default)]
    pub is_separator_regex: bool,

    #[serde(default)]
    pub keep_separator: KeepSeparator,

    /// Length unit for `chunk_size` and `chunk_overlap`
    #[serde(default)]
    pub length: LengthUnit,

    /// Language tag; unknown tags fall back to the generic separators
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default = "default_true")]
    pub strip_whitespace: bool,

    #[serde(default)]
    pub add_start_index: bool,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_true() -> bool {
    true
}

impl Default for SplitterSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            separators: Vec::new(),
            is_separator_regex: false,
            keep_separator: KeepSeparator::None,
            length: LengthUnit::Chars,
            language: None,
            strip_whitespace: true,
            add_start_index: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    splitter: Option<SplitterSettings>,
}

impl SplitterSettings {
    /// Build a validated [`SplitConfig`].
    pub fn into_config(self) -> AppResult<SplitConfig> {
        let language = self.language.as_deref().and_then(|tag| {
            let language = Language::from_tag(tag);
            if language.is_none() {
                tracing::debug!(
                    "Unknown language '{}' in settings, using generic separators",
                    tag
                );
            }
            language
        });

        let config = SplitConfig {
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            separators: self.separators,
            use_regex: self.is_separator_regex,
            keep_separator: self.keep_separator,
            length_function: self.length.into(),
            language,
            strip_whitespace: self.strip_whitespace,
            add_start_index: self.add_start_index,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Load splitter settings from a YAML config file.
///
/// A missing file, or a file without a `splitter:` section, yields the
/// defaults.
pub fn load_settings(path: &Path) -> AppResult<SplitterSettings> {
    if !path.exists() {
        tracing::debug!("No config file at {:?}, using default splitter settings", path);
        return Ok(SplitterSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read config at {:?}: {}", path, e))
    })?;

    if content.trim().is_empty() {
        return Ok(SplitterSettings::default());
    }

    let file: SettingsFile = serde_yaml::from_str(&content).map_err(|e| {
        AppError::Config(format!("Failed to parse config at {:?}: {}", path, e))
    })?;

    let settings = file.splitter.unwrap_or_default();
    tracing::debug!("Loaded splitter settings from {:?}", path);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("splitkit.yaml")).unwrap();

        assert_eq!(settings, SplitterSettings::default());
        assert_eq!(settings.chunk_size, 1000);
        assert_eq!(settings.chunk_overlap, 200);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let file = write_config(
            "logging:\n  level: info\nsplitter:\n  chunk_size: 256\n  keep_separator: true\n  length: graphemes\n",
        );
        let settings = load_settings(file.path()).unwrap();

        assert_eq!(settings.chunk_size, 256);
        assert_eq!(settings.chunk_overlap, 200);
        assert_eq!(settings.keep_separator, KeepSeparator::Start);
        assert_eq!(settings.length, LengthUnit::Graphemes);
        assert!(settings.strip_whitespace);
    }

    #[test]
    fn test_no_splitter_section() {
        let file = write_config("logging:\n  level: debug\n");
        assert_eq!(load_settings(file.path()).unwrap(), SplitterSettings::default());
    }

    #[test]
    fn test_malformed_yaml() {
        let file = write_config("splitter: [unclosed\n");
        assert!(matches!(load_settings(file.path()), Err(AppError::Config(_))));
    }

    #[test]
    fn test_into_config_validates() {
        let settings = SplitterSettings {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Default::default()
        };
        assert!(matches!(settings.into_config(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_into_config_language() {
        let settings = SplitterSettings {
            language: Some("rs".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.into_config().unwrap().language, Some(Language::Rust));

        let settings = SplitterSettings {
            language: Some("klingon".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.into_config().unwrap().language, None);
    }
}

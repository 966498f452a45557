//! Splitter configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use splitkit_core::{AppError, AppResult};

use crate::language::Language;
use crate::length::LengthFunction;

/// Where a matched separator ends up after splitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeepSeparator {
    /// Separator text is dropped from pieces and reinserted when joining
    #[default]
    None,

    /// Separator is attached to the start of the piece that follows it
    Start,

    /// Separator is attached to the end of the piece that precedes it
    End,
}

impl KeepSeparator {
    /// True when separators travel inside pieces.
    pub fn is_kept(self) -> bool {
        !matches!(self, KeepSeparator::None)
    }
}

impl From<bool> for KeepSeparator {
    fn from(keep: bool) -> Self {
        if keep {
            KeepSeparator::Start
        } else {
            KeepSeparator::None
        }
    }
}

impl std::str::FromStr for KeepSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "false" | "no" => Ok(KeepSeparator::None),
            "start" | "true" | "yes" => Ok(KeepSeparator::Start),
            "end" => Ok(KeepSeparator::End),
            other => Err(format!(
                "unknown keep-separator policy '{}' (expected none, start or end)",
                other
            )),
        }
    }
}

/// Accepts `true`, `false`, `"start"`, `"end"` or `"none"`.
impl<'de> Deserialize<'de> for KeepSeparator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Side(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(flag) => Ok(flag.into()),
            Repr::Side(side) => side.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for KeepSeparator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            KeepSeparator::None => serializer.serialize_bool(false),
            KeepSeparator::Start => serializer.serialize_str("start"),
            KeepSeparator::End => serializer.serialize_str("end"),
        }
    }
}

/// Immutable splitter configuration.
///
/// Built with [`SplitConfig::new`] and the `with_*` methods, then checked
/// by [`SplitConfig::validate`] (splitter constructors call it).
///
/// # Example
/// ```
/// use splitkit_splitter::{KeepSeparator, SplitConfig};
///
/// let config = SplitConfig::new(200)
///     .with_chunk_overlap(20)
///     .with_keep_separator(KeepSeparator::End);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Maximum chunk length, measured by `length_function`
    pub chunk_size: usize,

    /// Maximum overlap carried from one chunk into the next
    pub chunk_overlap: usize,

    /// Separators from coarsest to finest; empty means "resolve from `language`"
    pub separators: Vec<String>,

    /// Interpret `separators` as regular expressions
    pub use_regex: bool,

    /// Separator placement policy
    pub keep_separator: KeepSeparator,

    /// Length measurement
    pub length_function: LengthFunction,

    /// Language whose separator table is used when `separators` is empty
    pub language: Option<Language>,

    /// Trim whitespace around merged chunks
    pub strip_whitespace: bool,

    /// Record `start_index` in split document metadata
    pub add_start_index: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            separators: Vec::new(),
            use_regex: false,
            keep_separator: KeepSeparator::None,
            length_function: LengthFunction::Chars,
            language: None,
            strip_whitespace: true,
            add_start_index: false,
        }
    }
}

impl SplitConfig {
    /// Configuration with the given chunk size and no overlap.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap: 0,
            ..Default::default()
        }
    }

    pub fn with_chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }

    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }

    pub fn with_keep_separator(mut self, keep: impl Into<KeepSeparator>) -> Self {
        self.keep_separator = keep.into();
        self
    }

    pub fn with_length_function(mut self, length_function: LengthFunction) -> Self {
        self.length_function = length_function;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_strip_whitespace(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }

    pub fn with_start_index(mut self, add_start_index: bool) -> Self {
        self.add_start_index = add_start_index;
        self
    }

    /// Reject sizes the merger cannot honour.
    pub fn validate(&self) -> AppResult<()> {
        if self.chunk_size == 0 {
            return Err(AppError::InvalidConfig(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(AppError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        Ok(())
    }

    /// Measure `text` with the configured length function.
    pub fn measure(&self, text: &str) -> usize {
        self.length_function.measure(text)
    }
}

//! Recursive character splitter.

use splitkit_core::AppResult;

use super::TextSplitter;
use crate::chunk::TextChunk;
use crate::config::SplitConfig;
use crate::language::{Language, SeparatorSet};
use crate::matcher::SeparatorMatcher;
use crate::merging::merge_segments;
use crate::recursive::{split_segments, Segment};

/// Splits on the coarsest separator present, recursing into pieces that are
/// still too large, then merges the pieces with overlap.
///
/// # Example
/// ```
/// use splitkit_splitter::{RecursiveCharacterSplitter, SplitConfig, TextSplitter};
///
/// let splitter = RecursiveCharacterSplitter::new(SplitConfig::new(3)).unwrap();
/// let chunks: Vec<String> = splitter
///     .split_text("foo bar baz 123")
///     .into_iter()
///     .map(|c| c.content)
///     .collect();
/// assert_eq!(chunks, vec!["foo", "bar", "baz", "123"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    config: SplitConfig,
    matchers: Vec<SeparatorMatcher>,
}

impl RecursiveCharacterSplitter {
    /// Validate `config` and compile its separators.
    ///
    /// With no explicit separators, the table for `config.language` (or the
    /// generic prose list) is used, along with that table's regex mode.
    pub fn new(mut config: SplitConfig) -> AppResult<Self> {
        config.validate()?;

        if config.separators.is_empty() {
            let set = match config.language {
                Some(language) => language.separator_set(),
                None => SeparatorSet::generic(),
            };
            config.separators = set.separators;
            config.use_regex = set.is_regex;
        }

        let matchers = SeparatorMatcher::compile_all(&config.separators, config.use_regex)?;

        tracing::debug!(
            "Recursive splitter ready: {} separators (regex: {}), size {}, overlap {}",
            matchers.len(),
            config.use_regex,
            config.chunk_size,
            config.chunk_overlap
        );

        Ok(Self { config, matchers })
    }

    /// Splitter using a language's separator table.
    pub fn for_language(language: Language, config: SplitConfig) -> AppResult<Self> {
        Self::new(config.with_language(language).with_separators(Vec::<String>::new()))
    }

    /// Atomic pieces before merging, grouped into runs.
    pub fn split_segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        split_segments(text, &self.matchers, &self.config)
    }
}

impl TextSplitter for RecursiveCharacterSplitter {
    fn config(&self) -> &SplitConfig {
        &self.config
    }

    fn split_text(&self, text: &str) -> Vec<TextChunk> {
        let segments = self.split_segments(text);
        let chunks = merge_segments(&segments, &self.config);

        tracing::debug!(
            "Recursive splitter created {} chunks from {} bytes",
            chunks.len(),
            text.len()
        );

        chunks
    }
}

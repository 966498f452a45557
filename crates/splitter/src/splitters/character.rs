//! Single-separator splitter.

use splitkit_core::AppResult;

use super::TextSplitter;
use crate::chunk::TextChunk;
use crate::config::SplitConfig;
use crate::matcher::SeparatorMatcher;
use crate::merging::merge_pieces;

/// Splits on one separator and merges the pieces, without recursion.
///
/// Pieces longer than the chunk size are kept whole and flagged oversized.
/// The separator is the first entry of `config.separators`, or `"\n\n"`.
#[derive(Debug, Clone)]
pub struct CharacterSplitter {
    config: SplitConfig,
    matcher: SeparatorMatcher,
}

impl CharacterSplitter {
    pub fn new(mut config: SplitConfig) -> AppResult<Self> {
        config.validate()?;

        let separator = config
            .separators
            .first()
            .cloned()
            .unwrap_or_else(|| "\n\n".to_string());
        config.separators = vec![separator];

        let matcher = SeparatorMatcher::new(&config.separators[0], config.use_regex)?;
        Ok(Self { config, matcher })
    }
}

impl TextSplitter for CharacterSplitter {
    fn config(&self) -> &SplitConfig {
        &self.config
    }

    fn split_text(&self, text: &str) -> Vec<TextChunk> {
        let pieces = self.matcher.split(text, 0, self.config.keep_separator);
        let chunks = merge_pieces(&pieces, &self.config);

        tracing::debug!(
            "Character splitter created {} chunks from {} bytes",
            chunks.len(),
            text.len()
        );

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeepSeparator;

    fn contents(chunks: Vec<TextChunk>) -> Vec<String> {
        chunks.into_iter().map(|c| c.content).collect()
    }

    #[test]
    fn test_splits_by_double_newline() {
        let splitter = CharacterSplitter::new(SplitConfig::new(40)).unwrap();
        let text = "First paragraph.\n\nSecond paragraph.\n\nThird paragraph.";

        assert_eq!(
            contents(splitter.split_text(text)),
            vec!["First paragraph.\n\nSecond paragraph.", "Third paragraph."]
        );
    }

    #[test]
    fn test_custom_separator() {
        let splitter =
            CharacterSplitter::new(SplitConfig::new(20).with_separators([", "])).unwrap();

        assert_eq!(
            contents(splitter.split_text("apple, banana, cherry, date")),
            vec!["apple, banana", "cherry, date"]
        );
    }

    #[test]
    fn test_overlap_repeats_words() {
        let config = SplitConfig::new(10)
            .with_chunk_overlap(5)
            .with_separators([" "]);
        let splitter = CharacterSplitter::new(config).unwrap();

        assert_eq!(
            contents(splitter.split_text("one two three four five")),
            vec!["one two", "two three", "three four", "four five"]
        );
    }

    #[test]
    fn test_long_piece_not_recursed() {
        let splitter = CharacterSplitter::new(SplitConfig::new(5).with_separators([" "])).unwrap();
        let chunks = splitter.split_text("a abcdefgh b");

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].content, "abcdefgh");
        assert!(chunks[1].oversized);
    }

    #[test]
    fn test_regex_separator_with_keep_end() {
        let config = SplitConfig::new(12)
            .with_separators([r"[.!?] "])
            .with_regex(true)
            .with_keep_separator(KeepSeparator::End);
        let splitter = CharacterSplitter::new(config).unwrap();

        assert_eq!(
            contents(splitter.split_text("Hi there. Go now! Done")),
            vec!["Hi there.", "Go now! Done"]
        );
    }
}

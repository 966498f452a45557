//! Literal and regex separators behind one matcher.

use regex::Regex;
use splitkit_core::{AppError, AppResult};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::KeepSeparator;

/// An atomic piece of source text produced by one split.
///
/// Pieces borrow from the source, so joining consecutive pieces with their
/// `lead` reproduces the source text between them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'a> {
    /// Piece text (includes the separator when it is kept)
    pub text: &'a str,

    /// Byte offset of `text` in the original source
    pub offset: usize,

    /// Source text between the previous piece and this one
    pub lead: &'a str,
}

/// A compiled separator.
#[derive(Debug, Clone)]
pub enum SeparatorMatcher {
    /// Plain substring
    Literal(String),

    /// Regular expression
    Pattern(Regex),

    /// The empty separator: every grapheme boundary
    Graphemes,
}

impl SeparatorMatcher {
    /// Compile a separator. `""` means grapheme splitting in both modes.
    pub fn new(separator: &str, use_regex: bool) -> AppResult<Self> {
        if separator.is_empty() {
            return Ok(SeparatorMatcher::Graphemes);
        }

        if use_regex {
            let regex = Regex::new(separator).map_err(|e| {
                AppError::InvalidConfig(format!("Invalid separator pattern {:?}: {}", separator, e))
            })?;
            Ok(SeparatorMatcher::Pattern(regex))
        } else {
            Ok(SeparatorMatcher::Literal(separator.to_string()))
        }
    }

    /// Compile a whole separator list.
    pub fn compile_all(separators: &[String], use_regex: bool) -> AppResult<Vec<Self>> {
        separators
            .iter()
            .map(|s| SeparatorMatcher::new(s, use_regex))
            .collect()
    }

    /// Whether splitting `text` on this separator can make progress.
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            SeparatorMatcher::Literal(literal) => text.contains(literal.as_str()),
            SeparatorMatcher::Pattern(regex) => regex.is_match(text),
            SeparatorMatcher::Graphemes => true,
        }
    }

    /// Byte ranges of every separator occurrence in `text`.
    fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match self {
            SeparatorMatcher::Literal(literal) => text
                .match_indices(literal.as_str())
                .map(|(start, m)| start..start + m.len())
                .collect(),
            SeparatorMatcher::Pattern(regex) => regex.find_iter(text).map(|m| m.range()).collect(),
            SeparatorMatcher::Graphemes => Vec::new(),
        }
    }

    /// Split `text` into non-empty pieces in source order.
    ///
    /// `base_offset` is the byte offset of `text` in the original source.
    pub fn split<'a>(&self, text: &'a str, base_offset: usize, keep: KeepSeparator) -> Vec<Piece<'a>> {
        let ranges: Vec<Range<usize>> = match self {
            SeparatorMatcher::Graphemes => text
                .grapheme_indices(true)
                .map(|(start, g)| start..start + g.len())
                .collect(),
            _ => piece_ranges(text.len(), &self.find_ranges(text), keep),
        };

        let mut pieces = Vec::with_capacity(ranges.len());
        let mut previous_end: Option<usize> = None;

        for range in ranges.into_iter().filter(|r| !r.is_empty()) {
            let lead = match previous_end {
                Some(end) => &text[end..range.start],
                None => "",
            };
            previous_end = Some(range.end);
            pieces.push(Piece {
                text: &text[range.clone()],
                offset: base_offset + range.start,
                lead,
            });
        }

        pieces
    }
}

/// Turn separator match ranges into piece ranges under a keep policy.
fn piece_ranges(len: usize, matches: &[Range<usize>], keep: KeepSeparator) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(matches.len() + 1);

    match keep {
        KeepSeparator::None => {
            let mut start = 0;
            for m in matches {
                ranges.push(start..m.start);
                start = m.end;
            }
            ranges.push(start..len);
        }
        KeepSeparator::Start => {
            let mut start = 0;
            for m in matches {
                ranges.push(start..m.start);
                start = m.start;
            }
            ranges.push(start..len);
        }
        KeepSeparator::End => {
            let mut start = 0;
            for m in matches {
                ranges.push(start..m.end);
                start = m.end;
            }
            ranges.push(start..len);
        }
    }

    ranges
}

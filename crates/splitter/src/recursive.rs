//! Recursive separator cascade.
//!
//! Text is split on the first separator that occurs in it. Pieces that fit
//! the chunk size are collected into runs; a piece that does not fit is
//! split again with the separators that come after the one just used, so
//! no separator is retried on the same text and recursion depth is bounded
//! by the length of the separator list.

use crate::config::SplitConfig;
use crate::matcher::{Piece, SeparatorMatcher};

/// Output of the recursive splitter, consumed by the merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Consecutive pieces from one split, each within the chunk size,
    /// to be packed together.
    Run(Vec<Piece<'a>>),

    /// A piece still above the chunk size with no separator left to try.
    Oversized(Piece<'a>),
}

/// Split `text` into segments using `matchers`, coarsest first.
///
/// An empty text yields no segments.
pub fn split_segments<'a>(
    text: &'a str,
    matchers: &[SeparatorMatcher],
    config: &SplitConfig,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    if !text.is_empty() {
        split_into(text, 0, matchers, config, &mut segments);
    }
    segments
}

fn split_into<'a>(
    text: &'a str,
    base_offset: usize,
    matchers: &[SeparatorMatcher],
    config: &SplitConfig,
    segments: &mut Vec<Segment<'a>>,
) {
    let Some((matcher, remaining)) = choose_separator(text, matchers) else {
        // No separators at all: the text is one atomic piece.
        emit_piece(
            Piece { text, offset: base_offset, lead: "" },
            config,
            segments,
        );
        return;
    };

    let mut run: Vec<Piece<'a>> = Vec::new();

    for piece in matcher.split(text, base_offset, config.keep_separator) {
        if config.measure(piece.text) <= config.chunk_size {
            run.push(piece);
            continue;
        }

        if !run.is_empty() {
            segments.push(Segment::Run(std::mem::take(&mut run)));
        }

        if remaining.is_empty() {
            segments.push(Segment::Oversized(piece));
        } else {
            split_into(piece.text, piece.offset, remaining, config, segments);
        }
    }

    if !run.is_empty() {
        segments.push(Segment::Run(run));
    }
}

/// First separator present in `text`, with the separators after it.
///
/// When none is present the last one is used with nothing left to try.
fn choose_separator<'m>(
    text: &str,
    matchers: &'m [SeparatorMatcher],
) -> Option<(&'m SeparatorMatcher, &'m [SeparatorMatcher])> {
    let exhausted: &'m [SeparatorMatcher] = &[];

    for (i, matcher) in matchers.iter().enumerate() {
        if matches!(matcher, SeparatorMatcher::Graphemes) {
            return Some((matcher, exhausted));
        }
        if matcher.is_match(text) {
            return Some((matcher, &matchers[i + 1..]));
        }
    }

    matchers.last().map(|last| (last, exhausted))
}

fn emit_piece<'a>(piece: Piece<'a>, config: &SplitConfig, segments: &mut Vec<Segment<'a>>) {
    if config.measure(piece.text) <= config.chunk_size {
        segments.push(Segment::Run(vec![piece]));
    } else {
        segments.push(Segment::Oversized(piece));
    }
}

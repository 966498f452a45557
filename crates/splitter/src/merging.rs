//! Chunk merging: greedy packing of pieces with overlap.

use std::collections::VecDeque;

use crate::chunk::TextChunk;
use crate::config::SplitConfig;
use crate::matcher::Piece;
use crate::recursive::Segment;

/// Merge recursive-splitter output into chunks.
///
/// Each run is packed on its own; oversized pieces become single chunks.
pub fn merge_segments(segments: &[Segment<'_>], config: &SplitConfig) -> Vec<TextChunk> {
    let mut chunks = Vec::new();

    for segment in segments {
        match segment {
            Segment::Run(pieces) => chunks.extend(merge_pieces(pieces, config)),
            Segment::Oversized(piece) => {
                if let Some(chunk) = render(std::slice::from_ref(piece), config) {
                    chunks.push(chunk);
                }
            }
        }
    }

    chunks
}

/// Pack consecutive pieces into chunks no longer than `chunk_size`.
///
/// After each flush the next window is seeded with the longest suffix of
/// the flushed window that fits in `chunk_overlap` and still leaves room for
/// the incoming piece. A piece longer than `chunk_size` is flushed alone and
/// the window restarts empty.
pub fn merge_pieces(pieces: &[Piece<'_>], config: &SplitConfig) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let mut window: VecDeque<Piece<'_>> = VecDeque::new();
    let mut total = 0usize;

    for piece in pieces {
        let len = config.measure(piece.text);

        if len > config.chunk_size {
            flush(&window, config, &mut chunks);
            window.clear();
            total = 0;
            if let Some(chunk) = render(std::slice::from_ref(piece), config) {
                chunks.push(chunk);
            }
            continue;
        }

        if !window.is_empty() && total + config.measure(piece.lead) + len > config.chunk_size {
            flush(&window, config, &mut chunks);

            while let Some(front) = window.front() {
                let lead_len = config.measure(piece.lead);
                let over_overlap = total > config.chunk_overlap;
                let no_room = total + lead_len + len > config.chunk_size;
                if !(over_overlap || no_room) {
                    break;
                }

                let next_lead = window.get(1).map_or(0, |next| config.measure(next.lead));
                total = total.saturating_sub(config.measure(front.text) + next_lead);
                window.pop_front();
            }
        }

        if !window.is_empty() {
            total += config.measure(piece.lead);
        }
        total += len;
        window.push_back(*piece);
    }

    flush(&window, config, &mut chunks);

    tracing::debug!(
        "Merged {} pieces into {} chunks (size: {}, overlap: {})",
        pieces.len(),
        chunks.len(),
        config.chunk_size,
        config.chunk_overlap
    );

    chunks
}

fn flush(window: &VecDeque<Piece<'_>>, config: &SplitConfig, chunks: &mut Vec<TextChunk>) {
    if window.is_empty() {
        return;
    }
    let (head, tail) = window.as_slices();
    let pieces: Vec<Piece<'_>> = head.iter().chain(tail).copied().collect();
    if let Some(chunk) = render(&pieces, config) {
        chunks.push(chunk);
    }
}

/// Join pieces with their source separators. Returns `None` for chunks
/// that are empty after optional whitespace stripping.
fn render(pieces: &[Piece<'_>], config: &SplitConfig) -> Option<TextChunk> {
    let first = pieces.first()?;

    let mut content = String::from(first.text);
    for piece in &pieces[1..] {
        content.push_str(piece.lead);
        content.push_str(piece.text);
    }

    let mut offset = first.offset;
    if config.strip_whitespace {
        let trimmed_start = content.trim_start();
        offset += content.len() - trimmed_start.len();
        content = trimmed_start.trim_end().to_string();
    }

    if content.is_empty() {
        return None;
    }

    let length = config.measure(&content);
    let oversized = length > config.chunk_size;
    if oversized {
        tracing::warn!(
            "Created a chunk of size {} at byte {}, which is longer than the specified {}",
            length,
            offset,
            config.chunk_size
        );
    }

    Some(TextChunk {
        content,
        start_offset: Some(offset),
        oversized,
    })
}

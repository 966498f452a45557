//! End-to-end scenarios with exact expected chunks.

use crate::config::{KeepSeparator, SplitConfig};
use crate::splitters::{RecursiveCharacterSplitter, TextSplitter};

const HARRISON: &str = "Hi.\n\nI'm Harrison.\n\nHow? Are? You?\nOkay then f f f f.\nThis is a weird text to write, but gotta test the splittingggg some how.\n\nBye!\n\n-H.";

fn split(text: &str, config: SplitConfig) -> Vec<String> {
    RecursiveCharacterSplitter::new(config)
        .unwrap()
        .split_text(text)
        .into_iter()
        .map(|c| c.content)
        .collect()
}

#[test]
fn test_harrison_dropping_separators() {
    let chunks = split(HARRISON, SplitConfig::new(10).with_chunk_overlap(1));

    assert_eq!(
        chunks,
        vec![
            "Hi.",
            "I'm",
            "Harrison.",
            "How? Are?",
            "You?",
            "Okay then",
            "f f f f.",
            "This is a",
            "a weird",
            "text to",
            "write, but",
            "gotta test",
            "the",
            "splittingg",
            "ggg",
            "some how.",
            "Bye!\n\n-H.",
        ]
    );
}

#[test]
fn test_harrison_keeping_separators_at_start() {
    let config = SplitConfig::new(10)
        .with_chunk_overlap(1)
        .with_keep_separator(KeepSeparator::Start);
    let chunks = split(HARRISON, config);

    assert_eq!(
        chunks,
        vec![
            "Hi.",
            "I'm",
            "Harrison.",
            "How? Are?",
            "You?",
            "Okay then",
            "f f f f.",
            "This is a",
            "weird",
            "text to",
            "write,",
            "but gotta",
            "test the",
            "splitting",
            "gggg",
            "some how.",
            "Bye!",
            "-H.",
        ]
    );
}

#[test]
fn test_harrison_offsets_point_into_source() {
    let splitter = RecursiveCharacterSplitter::new(SplitConfig::new(10).with_chunk_overlap(1)).unwrap();
    let chunks = splitter.split_text(HARRISON);

    assert_eq!(chunks[0].start_offset, Some(0));
    assert_eq!(chunks[1].start_offset, Some(5));
    for chunk in &chunks {
        let (start, end) = chunk.byte_range().unwrap();
        assert_eq!(&HARRISON[start..end], chunk.content);
        assert!(!chunk.oversized);
    }
}

#[test]
fn test_foo_bar_baz() {
    assert_eq!(
        split("foo bar baz 123", SplitConfig::new(3)),
        vec!["foo", "bar", "baz", "123"]
    );
}

#[test]
fn test_long_word_with_overlap() {
    assert_eq!(
        split("abcdefghij", SplitConfig::new(4).with_chunk_overlap(1)),
        vec!["abcd", "defg", "ghij"]
    );
}

#[test]
fn test_multibyte_text_never_splits_graphemes() {
    let text = "Gamedex é um aplicativo 🎮 brasileiro com acentuação: ã, õ, ç. ".repeat(10);
    let splitter = RecursiveCharacterSplitter::new(SplitConfig::new(7).with_chunk_overlap(2)).unwrap();

    for chunk in splitter.split_text(&text) {
        assert!(chunk.content.chars().count() <= 7);
        let (start, end) = chunk.byte_range().unwrap();
        assert!(text.is_char_boundary(start) && text.is_char_boundary(end));
    }
}

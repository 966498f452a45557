//! Splitter implementations.

mod character;
mod recursive_character;

pub use character::CharacterSplitter;
pub use recursive_character::RecursiveCharacterSplitter;

use serde_json::{Map, Value};

use crate::chunk::TextChunk;
use crate::config::SplitConfig;
use crate::document::{self, DocumentRecord};

/// Common interface of text splitters.
///
/// Implementors only provide `config` and `split_text`; the document-level
/// operations are shared.
pub trait TextSplitter: Send + Sync {
    /// The validated configuration this splitter runs with.
    fn config(&self) -> &SplitConfig;

    /// Split text into chunks.
    fn split_text(&self, text: &str) -> Vec<TextChunk>;

    /// Split several texts, concatenating the results in input order.
    fn split_texts(&self, texts: &[&str]) -> Vec<TextChunk> {
        texts.iter().flat_map(|text| self.split_text(text)).collect()
    }

    /// Split each document, copying its metadata onto every chunk.
    fn split_documents(&self, documents: &[DocumentRecord]) -> Vec<DocumentRecord> {
        document::split_documents(documents, self)
    }

    /// Build documents from raw texts and optional per-text metadata, then split them.
    fn create_documents(
        &self,
        texts: &[&str],
        metadatas: Option<&[Map<String, Value>]>,
    ) -> Vec<DocumentRecord> {
        document::create_documents(texts, metadatas, self)
    }
}

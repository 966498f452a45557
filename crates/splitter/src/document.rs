//! Metadata-carrying documents.
//!
//! Splitting a document yields one new document per chunk. Every output
//! gets its own copy of the source metadata, so outputs never alias each
//! other or the source.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::splitters::TextSplitter;

/// Metadata key holding a chunk's byte offset in its source document.
pub const START_INDEX_KEY: &str = "start_index";

/// A text record with arbitrary metadata, as produced by loaders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub page_content: String,

    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl DocumentRecord {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Split every document with `splitter`, preserving document and chunk order.
pub fn split_documents<S>(documents: &[DocumentRecord], splitter: &S) -> Vec<DocumentRecord>
where
    S: TextSplitter + ?Sized,
{
    let output: Vec<DocumentRecord> = documents
        .iter()
        .flat_map(|document| split_document(document, splitter))
        .collect();

    tracing::debug!(
        "Split {} documents into {} chunks",
        documents.len(),
        output.len()
    );

    output
}

/// Parallel [`split_documents`]; output order matches the sequential version.
pub fn par_split_documents<S>(documents: &[DocumentRecord], splitter: &S) -> Vec<DocumentRecord>
where
    S: TextSplitter + ?Sized,
{
    let per_document: Vec<Vec<DocumentRecord>> = documents
        .par_iter()
        .map(|document| split_document(document, splitter))
        .collect();

    let output: Vec<DocumentRecord> = per_document.into_iter().flatten().collect();

    tracing::debug!(
        "Split {} documents into {} chunks on {} threads",
        documents.len(),
        output.len(),
        rayon::current_num_threads()
    );

    output
}

/// Wrap `texts` as documents (with the matching entry of `metadatas`, if
/// any) and split them.
pub fn create_documents<S>(
    texts: &[&str],
    metadatas: Option<&[Map<String, Value>]>,
    splitter: &S,
) -> Vec<DocumentRecord>
where
    S: TextSplitter + ?Sized,
{
    let documents: Vec<DocumentRecord> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| DocumentRecord {
            page_content: text.to_string(),
            metadata: metadatas
                .and_then(|m| m.get(i))
                .cloned()
                .unwrap_or_default(),
        })
        .collect();

    split_documents(&documents, splitter)
}

fn split_document<S>(document: &DocumentRecord, splitter: &S) -> Vec<DocumentRecord>
where
    S: TextSplitter + ?Sized,
{
    let add_start_index = splitter.config().add_start_index;

    splitter
        .split_text(&document.page_content)
        .into_iter()
        .map(|chunk| {
            let mut metadata = document.metadata.clone();
            if add_start_index {
                if let Some(offset) = chunk.start_offset {
                    metadata.insert(START_INDEX_KEY.to_string(), Value::from(offset));
                }
            }
            DocumentRecord {
                page_content: chunk.content,
                metadata,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SplitConfig;
    use crate::splitters::RecursiveCharacterSplitter;
    use serde_json::json;

    fn splitter(config: SplitConfig) -> RecursiveCharacterSplitter {
        RecursiveCharacterSplitter::new(config).unwrap()
    }

    #[test]
    fn test_metadata_copied_per_chunk() {
        let doc = DocumentRecord::new("alpha beta gamma")
            .with_metadata("source", "notes.txt")
            .with_metadata("tags", json!(["a", "b"]));

        let chunks = split_documents(&[doc.clone()], &splitter(SplitConfig::new(5)));

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert_eq!(chunk.metadata, doc.metadata);
        }
    }

    #[test]
    fn test_metadata_copies_are_independent() {
        let doc = DocumentRecord::new("one two").with_metadata("source", "a.txt");
        let mut chunks = split_documents(&[doc.clone()], &splitter(SplitConfig::new(3)));

        chunks[0]
            .metadata
            .insert("source".to_string(), json!("changed"));

        assert_eq!(chunks[1].metadata["source"], json!("a.txt"));
        assert_eq!(doc.metadata["source"], json!("a.txt"));
    }

    #[test]
    fn test_start_index() {
        let doc = DocumentRecord::new("foo bar baz");
        let chunks = split_documents(&[doc], &splitter(SplitConfig::new(3).with_start_index(true)));

        let starts: Vec<_> = chunks
            .iter()
            .map(|c| c.metadata[START_INDEX_KEY].as_u64().unwrap())
            .collect();
        assert_eq!(starts, vec![0, 4, 8]);
    }

    #[test]
    fn test_start_index_absent_by_default() {
        let chunks = split_documents(&[DocumentRecord::new("foo bar")], &splitter(SplitConfig::new(3)));
        assert!(chunks.iter().all(|c| !c.metadata.contains_key(START_INDEX_KEY)));
    }

    #[test]
    fn test_create_documents() {
        let mut meta = Map::new();
        meta.insert("page".to_string(), json!(1));

        let metadatas = vec![meta.clone()];
        let splitter = splitter(SplitConfig::new(3));
        let docs = splitter.create_documents(&["foo bar", "baz"], Some(metadatas.as_slice()));

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].metadata, meta);
        assert_eq!(docs[1].metadata, meta);
        assert!(docs[2].metadata.is_empty());
        assert_eq!(docs[2].page_content, "baz");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let documents: Vec<DocumentRecord> = (0..32)
            .map(|i| {
                DocumentRecord::new(format!("document {} has a few words in it", i))
                    .with_metadata("n", i)
            })
            .collect();
        let splitter = splitter(SplitConfig::new(12).with_chunk_overlap(4));

        assert_eq!(
            par_split_documents(&documents, &splitter),
            split_documents(&documents, &splitter)
        );
    }

    #[test]
    fn test_serde_camel_case() {
        let doc: DocumentRecord =
            serde_json::from_str(r#"{"pageContent": "hi", "metadata": {"k": 1}}"#).unwrap();
        assert_eq!(doc.page_content, "hi");
        assert_eq!(doc.metadata["k"], json!(1));

        let doc: DocumentRecord = serde_json::from_str(r#"{"pageContent": "bare"}"#).unwrap();
        assert!(doc.metadata.is_empty());
    }
}

//! Output chunks.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One bounded-length unit of output text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Chunk text
    pub content: String,

    /// Byte offset of `content` in the source text, when known
    pub start_offset: Option<usize>,

    /// Set when the chunk exceeds the configured size because a single
    /// atomic piece could not be split any further
    #[serde(default)]
    pub oversized: bool,
}

impl TextChunk {
    pub fn new(content: impl Into<String>, start_offset: Option<usize>) -> Self {
        Self {
            content: content.into(),
            start_offset,
            oversized: false,
        }
    }

    /// Byte range of the chunk in its source, when the offset is known.
    pub fn byte_range(&self) -> Option<(usize, usize)> {
        self.start_offset
            .map(|start| (start, start + self.content.len()))
    }

    /// SHA-256 hex digest of the content.
    pub fn content_hash(&self) -> String {
        hash_content(&self.content)
    }
}

/// SHA-256 hex digest of `content`.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

//! Recursive, language-aware text splitting for retrieval pipelines.
//!
//! The pipeline has four stages, each a pure function of its inputs:
//! - separator resolution per language ([`language`])
//! - recursive splitting into atomic pieces ([`recursive`])
//! - greedy merging with overlap ([`merging`])
//! - metadata propagation onto chunked documents ([`document`])
//!
//! # Example
//! ```
//! use splitkit_splitter::{RecursiveCharacterSplitter, SplitConfig, TextSplitter};
//!
//! let splitter = RecursiveCharacterSplitter::new(SplitConfig::new(10).with_chunk_overlap(1))?;
//! for chunk in splitter.split_text("Hi.\n\nI'm Harrison.\n\nBye!") {
//!     assert!(chunk.content.chars().count() <= 10);
//! }
//! # Ok::<(), splitkit_core::AppError>(())
//! ```

pub mod chunk;
pub mod config;
pub mod document;
pub mod language;
pub mod length;
pub mod matcher;
pub mod merging;
pub mod recursive;
pub mod settings;
pub mod splitters;

#[cfg(test)]
mod tests;

pub use chunk::{hash_content, TextChunk};
pub use config::{KeepSeparator, SplitConfig};
pub use document::{par_split_documents, split_documents, DocumentRecord, START_INDEX_KEY};
pub use language::{resolve, resolve_strict, Language, SeparatorSet};
pub use length::{LengthFunction, LengthUnit};
pub use settings::{load_settings, SplitterSettings};
pub use splitters::{CharacterSplitter, RecursiveCharacterSplitter, TextSplitter};

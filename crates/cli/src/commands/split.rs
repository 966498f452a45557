//! Split command handler.
//!
//! Reads files, directories or stdin, splits every input with the
//! recursive splitter and prints the chunks.

use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};
use splitkit_core::{config::AppConfig, AppError, AppResult};
use splitkit_splitter::{
    hash_content, load_settings, par_split_documents, DocumentRecord, KeepSeparator, Language,
    LengthUnit, RecursiveCharacterSplitter, SplitterSettings,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use walkdir::WalkDir;

/// Metadata key naming where a chunk came from.
const SOURCE_KEY: &str = "source";

/// Source name used for stdin input.
const STDIN_SOURCE: &str = "<stdin>";

/// Split text into chunks
#[derive(Args, Debug)]
pub struct SplitCommand {
    /// Files to split (reads stdin when no files or paths are given)
    pub files: Vec<PathBuf>,

    /// Directories to walk recursively
    #[arg(long)]
    pub path: Vec<PathBuf>,

    /// Maximum chunk length
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between consecutive chunks
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Language tag; detected from each file's extension when omitted
    #[arg(short, long)]
    pub language: Option<String>,

    /// Custom separator, coarsest first (repeatable)
    #[arg(long = "separator")]
    pub separators: Vec<String>,

    /// Treat separators as regular expressions
    #[arg(long)]
    pub regex: bool,

    /// Keep separators attached to pieces (none, start, end)
    #[arg(long)]
    pub keep_separator: Option<KeepSeparator>,

    /// Length unit (chars, bytes, graphemes)
    #[arg(long)]
    pub length: Option<LengthUnit>,

    /// Keep leading and trailing whitespace on chunks
    #[arg(long)]
    pub no_strip: bool,

    /// Record each chunk's byte offset as `start_index` metadata
    #[arg(long)]
    pub start_index: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One text to split, with the language its separators come from.
#[derive(Debug)]
struct Input {
    document: DocumentRecord,
    language: Option<Language>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChunkOutput<'a> {
    page_content: &'a str,
    metadata: &'a Map<String, Value>,
    content_hash: String,
}

impl SplitCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing split command");
        tracing::debug!("Split options: {:?}", self);

        let settings = match &config.config_file {
            Some(path) => load_settings(path)?,
            None => SplitterSettings::default(),
        };
        let settings = self.apply_overrides(settings);

        let inputs = self.collect_inputs(&settings).await?;
        let bytes: usize = inputs.iter().map(|i| i.document.page_content.len()).sum();

        let mut splitters = HashMap::new();
        for input in &inputs {
            if !splitters.contains_key(&input.language) {
                let splitter = build_splitter(&settings, input.language)?;
                splitters.insert(input.language, splitter);
            }
        }

        let chunks = tokio::task::spawn_blocking(move || split_inputs(inputs, &splitters))
            .await
            .map_err(|e| AppError::Other(format!("Split task failed: {}", e)))?;

        tracing::info!("Split {} bytes into {} chunks", bytes, chunks.len());

        if self.json {
            let output: Vec<ChunkOutput<'_>> = chunks
                .iter()
                .map(|chunk| ChunkOutput {
                    page_content: &chunk.page_content,
                    metadata: &chunk.metadata,
                    content_hash: hash_content(&chunk.page_content),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for (i, chunk) in chunks.iter().enumerate() {
                let source = chunk
                    .metadata
                    .get(SOURCE_KEY)
                    .and_then(Value::as_str)
                    .unwrap_or(STDIN_SOURCE);
                println!("--- chunk {} ({}) ---", i + 1, source);
                println!("{}", chunk.page_content);
            }
        }

        Ok(())
    }

    /// Command-line flags win over the config file.
    fn apply_overrides(&self, mut settings: SplitterSettings) -> SplitterSettings {
        if let Some(chunk_size) = self.chunk_size {
            settings.chunk_size = chunk_size;
        }
        if let Some(chunk_overlap) = self.chunk_overlap {
            settings.chunk_overlap = chunk_overlap;
        }
        if self.language.is_some() {
            settings.language = self.language.clone();
        }
        if !self.separators.is_empty() {
            settings.separators = self.separators.clone();
        }
        if self.regex {
            settings.is_separator_regex = true;
        }
        if let Some(keep) = self.keep_separator {
            settings.keep_separator = keep;
        }
        if let Some(length) = self.length {
            settings.length = length;
        }
        if self.no_strip {
            settings.strip_whitespace = false;
        }
        if self.start_index {
            settings.add_start_index = true;
        }
        settings
    }

    async fn collect_inputs(&self, settings: &SplitterSettings) -> AppResult<Vec<Input>> {
        let fixed_language = settings.language.as_deref().and_then(Language::from_tag);
        let detect = settings.language.is_none() && settings.separators.is_empty();
        let language_for = |path: &Path| {
            if detect {
                Language::from_path(path)
            } else {
                fixed_language
            }
        };

        if self.files.is_empty() && self.path.is_empty() {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            let document = DocumentRecord::new(text).with_metadata(SOURCE_KEY, STDIN_SOURCE);
            return Ok(vec![Input {
                document,
                language: fixed_language,
            }]);
        }

        let mut inputs = Vec::new();

        for file in &self.files {
            let text = tokio::fs::read_to_string(file).await.map_err(|e| {
                AppError::Other(format!("Failed to read {:?}: {}", file, e))
            })?;
            inputs.push(Input {
                document: source_document(file, text),
                language: language_for(file),
            });
        }

        for dir in &self.path {
            if !dir.is_dir() {
                return Err(AppError::Other(format!("Not a directory: {:?}", dir)));
            }

            let mut entries: Vec<PathBuf> = WalkDir::new(dir)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .collect();
            entries.sort();

            for entry in entries {
                match tokio::fs::read_to_string(&entry).await {
                    Ok(text) => inputs.push(Input {
                        language: language_for(&entry),
                        document: source_document(&entry, text),
                    }),
                    Err(e) => tracing::warn!("Skipping {:?}: {}", entry, e),
                }
            }
        }

        tracing::debug!("Collected {} inputs", inputs.len());
        Ok(inputs)
    }
}

fn source_document(path: &Path, text: String) -> DocumentRecord {
    DocumentRecord::new(text).with_metadata(SOURCE_KEY, path.display().to_string())
}

fn build_splitter(
    settings: &SplitterSettings,
    language: Option<Language>,
) -> AppResult<RecursiveCharacterSplitter> {
    let mut config = settings.clone().into_config()?;
    if language.is_some() {
        config.language = language;
    }
    RecursiveCharacterSplitter::new(config)
}

/// Split inputs in order, batching neighbours that share a splitter.
fn split_inputs(
    inputs: Vec<Input>,
    splitters: &HashMap<Option<Language>, RecursiveCharacterSplitter>,
) -> Vec<DocumentRecord> {
    let mut chunks = Vec::new();
    let mut batch: Vec<DocumentRecord> = Vec::new();
    let mut batch_language: Option<Language> = None;

    for input in inputs {
        if !batch.is_empty() && input.language != batch_language {
            if let Some(splitter) = splitters.get(&batch_language) {
                chunks.extend(par_split_documents(&batch, splitter));
            }
            batch.clear();
        }
        batch_language = input.language;
        batch.push(input.document);
    }

    if let Some(splitter) = splitters.get(&batch_language) {
        chunks.extend(par_split_documents(&batch, splitter));
    }

    chunks
}

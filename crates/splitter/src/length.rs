//! Pluggable length measurement.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Measures text in the unit chunk sizes are expressed in.
///
/// Merging assumes the measure is roughly additive over concatenation;
/// chunks whose measured length still ends up above the limit are flagged
/// as oversized rather than re-split.
#[derive(Clone, Default)]
pub enum LengthFunction {
    /// Unicode scalar values
    #[default]
    Chars,

    /// UTF-8 bytes
    Bytes,

    /// Extended grapheme clusters
    Graphemes,

    /// Caller-supplied measure, e.g. a tokenizer's token count
    Custom(Arc<dyn Fn(&str) -> usize + Send + Sync>),
}

impl LengthFunction {
    /// Wrap a closure as a length function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> usize + Send + Sync + 'static,
    {
        LengthFunction::Custom(Arc::new(f))
    }

    /// Length of `text` in this unit.
    pub fn measure(&self, text: &str) -> usize {
        match self {
            LengthFunction::Chars => text.chars().count(),
            LengthFunction::Bytes => text.len(),
            LengthFunction::Graphemes => text.graphemes(true).count(),
            LengthFunction::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for LengthFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthFunction::Chars => f.write_str("Chars"),
            LengthFunction::Bytes => f.write_str("Bytes"),
            LengthFunction::Graphemes => f.write_str("Graphemes"),
            LengthFunction::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Serializable subset of [`LengthFunction`] used by settings files and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Chars,
    Bytes,
    Graphemes,
}

impl From<LengthUnit> for LengthFunction {
    fn from(unit: LengthUnit) -> Self {
        match unit {
            LengthUnit::Chars => LengthFunction::Chars,
            LengthUnit::Bytes => LengthFunction::Bytes,
            LengthUnit::Graphemes => LengthFunction::Graphemes,
        }
    }
}

impl std::str::FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chars" | "char" | "characters" => Ok(LengthUnit::Chars),
            "bytes" | "byte" => Ok(LengthUnit::Bytes),
            "graphemes" | "grapheme" => Ok(LengthUnit::Graphemes),
            other => Err(format!(
                "unknown length unit '{}' (expected chars, bytes or graphemes)",
                other
            )),
        }
    }
}

//! Separators command handler.
//!
//! Prints the separator table a language resolves to.

use clap::Args;
use serde::Serialize;
use splitkit_core::AppResult;
use splitkit_splitter::language::SEPARATOR_TABLE_VERSION;
use splitkit_splitter::{resolve, resolve_strict, Language, SeparatorSet};

/// Show the separator table for a language
#[derive(Args, Debug)]
pub struct SeparatorsCommand {
    /// Language tag or file extension (omit for the generic prose table)
    pub language: Option<String>,

    /// Fail on languages without a table instead of falling back
    #[arg(long)]
    pub strict: bool,

    /// List every supported language tag
    #[arg(long, conflicts_with = "language")]
    pub list: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeparatorReport<'a> {
    language: &'a str,
    table_version: u32,
    is_regex: bool,
    separators: &'a [String],
}

impl SeparatorsCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing separators command");
        tracing::debug!("Separators options: {:?}", self);

        if self.list {
            let tags: Vec<&str> = Language::ALL.iter().map(|l| l.as_str()).collect();
            if self.json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else {
                for tag in tags {
                    println!("{}", tag);
                }
            }
            return Ok(());
        }

        let set = self.resolve()?;
        let language = self
            .language
            .as_deref()
            .and_then(Language::from_tag)
            .map_or("generic", |l| l.as_str());

        if self.json {
            let report = SeparatorReport {
                language,
                table_version: SEPARATOR_TABLE_VERSION,
                is_regex: set.is_regex,
                separators: &set.separators,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "{} (table v{}{})",
                language,
                SEPARATOR_TABLE_VERSION,
                if set.is_regex { ", regex" } else { "" }
            );
            for separator in &set.separators {
                println!("  {:?}", separator);
            }
        }

        Ok(())
    }

    fn resolve(&self) -> AppResult<SeparatorSet> {
        match (&self.language, self.strict) {
            (Some(tag), true) => resolve_strict(tag),
            (tag, _) => Ok(resolve(tag.as_deref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitkit_core::AppError;

    fn command(language: Option<&str>, strict: bool) -> SeparatorsCommand {
        SeparatorsCommand {
            language: language.map(str::to_string),
            strict,
            list: false,
            json: false,
        }
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let set = command(Some("cobol"), false).resolve().unwrap();
        assert_eq!(set, SeparatorSet::generic());
    }

    #[test]
    fn test_strict_rejects_unknown_language() {
        let result = command(Some("cobol"), true).resolve();
        assert!(matches!(result, Err(AppError::UnsupportedLanguage(_))));
    }

    #[test]
    fn test_strict_without_language_is_generic() {
        assert_eq!(command(None, true).resolve().unwrap(), SeparatorSet::generic());
    }

    #[test]
    fn test_known_language() {
        let set = command(Some("py"), true).resolve().unwrap();
        assert_eq!(set.separators.first().map(String::as_str), Some("\nclass "));
    }
}

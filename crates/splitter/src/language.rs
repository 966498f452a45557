//! Separator resolution per language.
//!
//! Each [`Language`] maps to a fixed, ordered separator table, coarsest
//! boundary first. Every table ends with `""` (grapheme-level splitting) so
//! the recursive splitter always has a final fallback.
//!
//! The tables are data: extend them by adding a variant and a table, and
//! bump [`SEPARATOR_TABLE_VERSION`] whenever an existing table changes,
//! since that changes chunk boundaries for already-indexed corpora.

use serde::{Deserialize, Serialize};
use splitkit_core::{AppError, AppResult};
use std::fmt;
use std::path::Path;

/// Version of the built-in separator tables.
pub const SEPARATOR_TABLE_VERSION: u32 = 1;

/// Generic prose separators: paragraph, line, word, grapheme.
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

/// Languages with a built-in separator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    CSharp,
    Go,
    Java,
    Kotlin,
    JavaScript,
    TypeScript,
    Php,
    Proto,
    Python,
    Rst,
    Ruby,
    Rust,
    Scala,
    Swift,
    Lua,
    Elixir,
    Solidity,
    Markdown,
    Latex,
    Html,
}

/// An ordered separator list plus how to interpret its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeparatorSet {
    pub separators: Vec<String>,
    pub is_regex: bool,
}

impl SeparatorSet {
    fn from_table(table: &[&str], is_regex: bool) -> Self {
        Self {
            separators: table.iter().map(|s| s.to_string()).collect(),
            is_regex,
        }
    }

    /// The generic prose list.
    pub fn generic() -> Self {
        Self::from_table(DEFAULT_SEPARATORS, false)
    }
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Go,
        Language::Java,
        Language::Kotlin,
        Language::JavaScript,
        Language::TypeScript,
        Language::Php,
        Language::Proto,
        Language::Python,
        Language::Rst,
        Language::Ruby,
        Language::Rust,
        Language::Scala,
        Language::Swift,
        Language::Lua,
        Language::Elixir,
        Language::Solidity,
        Language::Markdown,
        Language::Latex,
        Language::Html,
    ];

    /// Canonical tag, as accepted by [`Language::from_tag`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Php => "php",
            Language::Proto => "proto",
            Language::Python => "python",
            Language::Rst => "rst",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Scala => "scala",
            Language::Swift => "swift",
            Language::Lua => "lua",
            Language::Elixir => "elixir",
            Language::Solidity => "solidity",
            Language::Markdown => "markdown",
            Language::Latex => "latex",
            Language::Html => "html",
        }
    }

    /// Parse a language tag, case-insensitively, accepting common aliases.
    pub fn from_tag(tag: &str) -> Option<Language> {
        let language = match tag.trim().to_ascii_lowercase().as_str() {
            "c" | "h" => Language::C,
            "cpp" | "c++" | "cxx" | "cc" | "hpp" => Language::Cpp,
            "csharp" | "c#" | "cs" => Language::CSharp,
            "go" | "golang" => Language::Go,
            "java" => Language::Java,
            "kotlin" | "kt" | "kts" => Language::Kotlin,
            "javascript" | "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "typescript" | "ts" | "tsx" => Language::TypeScript,
            "php" => Language::Php,
            "proto" | "protobuf" => Language::Proto,
            "python" | "py" => Language::Python,
            "rst" | "restructuredtext" => Language::Rst,
            "ruby" | "rb" => Language::Ruby,
            "rust" | "rs" => Language::Rust,
            "scala" | "sc" => Language::Scala,
            "swift" => Language::Swift,
            "lua" => Language::Lua,
            "elixir" | "ex" | "exs" => Language::Elixir,
            "solidity" | "sol" => Language::Solidity,
            "markdown" | "md" => Language::Markdown,
            "latex" | "tex" => Language::Latex,
            "html" | "htm" => Language::Html,
            _ => return None,
        };
        Some(language)
    }

    /// Detect the language from a file extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        Language::from_tag(ext)
    }

    /// Whether this language's table holds regular expressions.
    pub fn is_regex(&self) -> bool {
        matches!(self, Language::Markdown | Language::Rst | Language::Latex)
    }

    /// The fixed separator table, coarsest first.
    pub fn separators(&self) -> &'static [&'static str] {
        match self {
            Language::C | Language::Cpp => &[
                "\nclass ", "\nvoid ", "\nint ", "\nfloat ", "\ndouble ", "\nif ", "\nfor ",
                "\nwhile ", "\nswitch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::CSharp => &[
                "\ninterface ", "\nenum ", "\nimplements ", "\ndelegate ", "\nevent ",
                "\nclass ", "\nabstract ", "\npublic ", "\nprotected ", "\nprivate ",
                "\nstatic ", "\nreturn ", "\nif ", "\ncontinue ", "\nfor ", "\nforeach ",
                "\nwhile ", "\nswitch ", "\nbreak ", "\ncase ", "\nelse ", "\ntry ",
                "\nthrow ", "\nfinally ", "\ncatch ", "\n\n", "\n", " ", "",
            ],
            Language::Go => &[
                "\nfunc ", "\nvar ", "\nconst ", "\ntype ", "\nif ", "\nfor ", "\nswitch ",
                "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::Java => &[
                "\nclass ", "\npublic ", "\nprotected ", "\nprivate ", "\nstatic ", "\nif ",
                "\nfor ", "\nwhile ", "\nswitch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::Kotlin => &[
                "\nclass ", "\npublic ", "\nprotected ", "\nprivate ", "\ninternal ",
                "\ncompanion ", "\nfun ", "\nval ", "\nvar ", "\nif ", "\nfor ", "\nwhile ",
                "\nwhen ", "\ncase ", "\nelse ", "\n\n", "\n", " ", "",
            ],
            Language::JavaScript => &[
                "\nfunction ", "\nconst ", "\nlet ", "\nvar ", "\nclass ", "\nif ", "\nfor ",
                "\nwhile ", "\nswitch ", "\ncase ", "\ndefault ", "\n\n", "\n", " ", "",
            ],
            Language::TypeScript => &[
                "\nenum ", "\ninterface ", "\nnamespace ", "\ntype ", "\nclass ",
                "\nfunction ", "\nconst ", "\nlet ", "\nvar ", "\nif ", "\nfor ", "\nwhile ",
                "\nswitch ", "\ncase ", "\ndefault ", "\n\n", "\n", " ", "",
            ],
            Language::Php => &[
                "\nfunction ", "\nclass ", "\nif ", "\nforeach ", "\nwhile ", "\ndo ",
                "\nswitch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::Proto => &[
                "\nmessage ", "\nservice ", "\nenum ", "\noption ", "\nimport ", "\nsyntax ",
                "\n\n", "\n", " ", "",
            ],
            Language::Python => &["\nclass ", "\ndef ", "\n\tdef ", "\n\n", "\n", " ", ""],
            Language::Rst => &[
                r"\n=+\n", r"\n-+\n", r"\n\*+\n", r"\n\n\.\. \*\n\n", r"\n\n", r"\n", " ", "",
            ],
            Language::Ruby => &[
                "\ndef ", "\nclass ", "\nif ", "\nunless ", "\nwhile ", "\nfor ", "\ndo ",
                "\nbegin ", "\nrescue ", "\n\n", "\n", " ", "",
            ],
            Language::Rust => &[
                "\nfn ", "\nconst ", "\nlet ", "\nif ", "\nwhile ", "\nfor ", "\nloop ",
                "\nmatch ", "\n\n", "\n", " ", "",
            ],
            Language::Scala => &[
                "\nclass ", "\nobject ", "\ndef ", "\nval ", "\nvar ", "\nif ", "\nfor ",
                "\nwhile ", "\nmatch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::Swift => &[
                "\nfunc ", "\nclass ", "\nstruct ", "\nenum ", "\nif ", "\nfor ", "\nwhile ",
                "\ndo ", "\nswitch ", "\ncase ", "\n\n", "\n", " ", "",
            ],
            Language::Lua => &[
                "\nlocal ", "\nfunction ", "\nif ", "\nfor ", "\nwhile ", "\nrepeat ", "\n\n",
                "\n", " ", "",
            ],
            Language::Elixir => &[
                "\ndef ", "\ndefp ", "\ndefmodule ", "\ndefprotocol ", "\ndefmacro ",
                "\ndefmacrop ", "\nif ", "\nunless ", "\nwhile ", "\ncase ", "\ncond ",
                "\nwith ", "\nfor ", "\ndo ", "\n\n", "\n", " ", "",
            ],
            Language::Solidity => &[
                "\npragma ", "\nusing ", "\ncontract ", "\ninterface ", "\nlibrary ",
                "\nconstructor ", "\ntype ", "\nfunction ", "\nevent ", "\nmodifier ",
                "\nerror ", "\nstruct ", "\nenum ", "\nif ", "\nfor ", "\nwhile ",
                "\ndo while ", "\nassembly ", "\n\n", "\n", " ", "",
            ],
            Language::Markdown => &[
                r"\n#{1,6} ", r"```\n", r"\n\*\*\*+\n", r"\n---+\n", r"\n___+\n", r"\n\n",
                r"\n", " ", "",
            ],
            Language::Latex => &[
                r"\n\\chapter\{",
                r"\n\\section\{",
                r"\n\\subsection\{",
                r"\n\\subsubsection\{",
                r"\n\\begin\{enumerate\}",
                r"\n\\begin\{itemize\}",
                r"\n\\begin\{description\}",
                r"\n\\begin\{list\}",
                r"\n\\begin\{quote\}",
                r"\n\\begin\{quotation\}",
                r"\n\\begin\{verse\}",
                r"\n\\begin\{verbatim\}",
                r"\n\\begin\{align\}",
                r"\$\$",
                r"\$",
                " ",
                "",
            ],
            Language::Html => &[
                "<body", "<div", "<p", "<br", "<li", "<h1", "<h2", "<h3", "<h4", "<h5", "<h6",
                "<span", "<table", "<tr", "<td", "<th", "<ul", "<ol", "<header", "<footer",
                "<nav", "<head", "<style", "<script", "<meta", "<title", "",
            ],
        }
    }

    /// Separator table as an owned [`SeparatorSet`].
    pub fn separator_set(&self) -> SeparatorSet {
        SeparatorSet::from_table(self.separators(), self.is_regex())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_tag(s).ok_or_else(|| AppError::UnsupportedLanguage(s.to_string()))
    }
}

/// Resolve separators for an optional language tag.
///
/// Absent or unrecognised tags fall back to [`DEFAULT_SEPARATORS`] without
/// an error.
pub fn resolve(language_tag: Option<&str>) -> SeparatorSet {
    match language_tag {
        Some(tag) => match Language::from_tag(tag) {
            Some(language) => language.separator_set(),
            None => {
                tracing::debug!(
                    "No separator table for language '{}', using generic separators",
                    tag
                );
                SeparatorSet::generic()
            }
        },
        None => SeparatorSet::generic(),
    }
}

/// Resolve separators, failing on tags without a table.
pub fn resolve_strict(language_tag: &str) -> AppResult<SeparatorSet> {
    let language: Language = language_tag.parse()?;
    Ok(language.separator_set())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default() {
        let set = resolve(None);
        assert_eq!(set.separators, vec!["\n\n", "\n", " ", ""]);
        assert!(!set.is_regex);
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(resolve(Some("klingon")), SeparatorSet::generic());
    }

    #[test]
    fn test_resolve_strict_unknown_errors() {
        let result = resolve_strict("klingon");
        assert!(matches!(result, Err(AppError::UnsupportedLanguage(tag)) if tag == "klingon"));
    }

    #[test]
    fn test_resolve_python() {
        let set = resolve(Some("Python"));
        assert_eq!(set.separators[0], "\nclass ");
        assert!(!set.is_regex);
    }

    #[test]
    fn test_every_table_ends_with_empty_separator() {
        for language in Language::ALL {
            let table = language.separators();
            assert_eq!(table.last(), Some(&""), "{} table must end with \"\"", language);
        }
    }

    #[test]
    fn test_regex_tables_compile() {
        for language in Language::ALL.iter().filter(|l| l.is_regex()) {
            for pattern in language.separators() {
                assert!(
                    regex::Regex::new(pattern).is_ok(),
                    "bad pattern {:?} in {}",
                    pattern,
                    language
                );
            }
        }
    }

    #[test]
    fn test_tag_aliases_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_tag(language.as_str()), Some(*language));
        }
        assert_eq!(Language::from_tag("RS"), Some(Language::Rust));
        assert_eq!(Language::from_tag("c++"), Some(Language::Cpp));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path(Path::new("src/main.rs")), Some(Language::Rust));
        assert_eq!(Language::from_path(Path::new("README.md")), Some(Language::Markdown));
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }
}

//! Comment syntax sources
//!
//! A [`SyntaxSource`] answers "how does language X write comments?". Sources
//! are pluggable: a built-in table, a directory of language configuration
//! files, or several of those layered on top of each other.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Single-line comment delimiter(s) of a language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineComment {
    Single(String),
    Multiple(Vec<String>),
}

impl LineComment {
    /// Non-empty delimiters, in declaration order
    pub fn delimiters(&self) -> Vec<&str> {
        match self {
            LineComment::Single(delimiter) => vec![delimiter.as_str()],
            LineComment::Multiple(delimiters) => {
                delimiters.iter().map(String::as_str).collect()
            }
        }
        .into_iter()
        .filter(|d| !d.is_empty())
        .collect()
    }
}

/// Comment delimiters for one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSyntax {
    #[serde(default)]
    pub line_comment: Option<LineComment>,
    #[serde(default)]
    pub block_comment: Option<(String, String)>,
}

impl CommentSyntax {
    pub fn line(delimiter: &str) -> Self {
        Self {
            line_comment: Some(LineComment::Single(delimiter.to_string())),
            block_comment: None,
        }
    }

    pub fn with_block(mut self, start: &str, end: &str) -> Self {
        self.block_comment = Some((start.to_string(), end.to_string()));
        self
    }

    pub fn block(start: &str, end: &str) -> Self {
        Self::default().with_block(start, end)
    }

    pub fn line_delimiters(&self) -> Vec<&str> {
        self.line_comment
            .as_ref()
            .map(LineComment::delimiters)
            .unwrap_or_default()
    }

    /// Block delimiters, only when both halves are non-empty
    pub fn block_delimiters(&self) -> Option<(&str, &str)> {
        match &self.block_comment {
            Some((start, end)) if !start.is_empty() && !end.is_empty() => {
                Some((start.as_str(), end.as_str()))
            }
            _ => None,
        }
    }
}

/// Provider of comment syntax, keyed by canonical language id
pub trait SyntaxSource: Send + Sync {
    fn lookup(&self, language: &str) -> Option<CommentSyntax>;
}

impl<F> SyntaxSource for F
where
    F: Fn(&str) -> Option<CommentSyntax> + Send + Sync,
{
    fn lookup(&self, language: &str) -> Option<CommentSyntax> {
        self(language)
    }
}

/// (language, line delimiters, block delimiters)
type BuiltinEntry = (&'static str, &'static [&'static str], Option<(&'static str, &'static str)>);

const C_BLOCK: Option<(&str, &str)> = Some(("/*", "*/"));
const XML_BLOCK: Option<(&str, &str)> = Some(("<!--", "-->"));

const BUILTIN: &[BuiltinEntry] = &[
    ("apex", &["//"], C_BLOCK),
    ("bat", &["@REM"], None),
    ("c", &["//"], C_BLOCK),
    ("clojure", &[";"], None),
    ("coffeescript", &["#"], Some(("###", "###"))),
    ("cpp", &["//"], C_BLOCK),
    ("csharp", &["//"], C_BLOCK),
    ("css", &[], C_BLOCK),
    ("dart", &["//"], C_BLOCK),
    ("dockerfile", &["#"], None),
    ("elixir", &["#"], None),
    ("erlang", &["%"], None),
    ("fsharp", &["//"], Some(("(*", "*)"))),
    ("go", &["//"], C_BLOCK),
    ("haskell", &["--"], Some(("{-", "-}"))),
    ("html", &[], XML_BLOCK),
    ("ini", &[";"], None),
    ("java", &["//"], C_BLOCK),
    ("javascript", &["//"], C_BLOCK),
    ("javascriptreact", &["//"], C_BLOCK),
    ("julia", &["#"], Some(("#=", "=#"))),
    ("kotlin", &["//"], C_BLOCK),
    ("less", &["//"], C_BLOCK),
    ("lua", &["--"], Some(("--[[", "]]"))),
    ("makefile", &["#"], None),
    ("markdown", &[], XML_BLOCK),
    ("perl", &["#"], None),
    ("php", &["//", "#"], C_BLOCK),
    ("powershell", &["#"], Some(("<#", "#>"))),
    ("python", &["#"], Some(("\"\"\"", "\"\"\""))),
    ("r", &["#"], None),
    ("ruby", &["#"], Some(("=begin", "=end"))),
    ("rust", &["//"], C_BLOCK),
    ("scala", &["//"], C_BLOCK),
    ("scss", &["//"], C_BLOCK),
    ("shellscript", &["#"], None),
    ("sql", &["--"], C_BLOCK),
    ("swift", &["//"], C_BLOCK),
    ("tcl", &["#"], None),
    ("terraform", &["#", "//"], C_BLOCK),
    ("toml", &["#"], None),
    ("typescript", &["//"], C_BLOCK),
    ("typescriptreact", &["//"], C_BLOCK),
    ("vb", &["'"], None),
    ("xml", &[], XML_BLOCK),
    ("yaml", &["#"], None),
    ("zig", &["//"], None),
];

/// Compiled-in comment syntax for common languages
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSyntaxSource;

impl BuiltinSyntaxSource {
    pub fn languages() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(language, _, _)| *language)
    }
}

impl SyntaxSource for BuiltinSyntaxSource {
    fn lookup(&self, language: &str) -> Option<CommentSyntax> {
        let (_, lines, block) = BUILTIN.iter().find(|(id, _, _)| *id == language)?;

        let line_comment = match lines {
            [] => None,
            [single] => Some(LineComment::Single((*single).to_string())),
            many => Some(LineComment::Multiple(
                many.iter().map(|d| (*d).to_string()).collect(),
            )),
        };

        Some(CommentSyntax {
            line_comment,
            block_comment: block.map(|(start, end)| (start.to_string(), end.to_string())),
        })
    }
}

/// Reads `<dir>/<language>.json` language configuration files
///
/// Files are JSON with comments. The delimiters may sit at the top level or
/// under a `comments` object, as in editor language configuration files.
#[derive(Debug, Clone)]
pub struct FileSyntaxSource {
    dir: PathBuf,
}

impl FileSyntaxSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, language: &str) -> Option<PathBuf> {
        let valid = !language.is_empty()
            && language
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '#'))
            && !language.starts_with('.');
        valid.then(|| self.dir.join(format!("{}.json", language)))
    }
}

impl SyntaxSource for FileSyntaxSource {
    fn lookup(&self, language: &str) -> Option<CommentSyntax> {
        let path = self.path_for(language)?;
        if !path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read language file {}: {}", path.display(), e);
                return None;
            }
        };

        match parse_language_configuration(&content) {
            Ok(syntax) => {
                tracing::debug!("Loaded comment syntax for {} from {}", language, path.display());
                Some(syntax)
            }
            Err(e) => {
                tracing::warn!("Failed to parse language file {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Several sources consulted in order; the first answer wins
#[derive(Default)]
pub struct LayeredSyntaxSource {
    layers: Vec<Box<dyn SyntaxSource>>,
}

impl LayeredSyntaxSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, source: impl SyntaxSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl SyntaxSource for LayeredSyntaxSource {
    fn lookup(&self, language: &str) -> Option<CommentSyntax> {
        self.layers.iter().find_map(|layer| layer.lookup(language))
    }
}

/// Parse a JSON-with-comments language configuration document
pub fn parse_language_configuration(content: &str) -> Result<CommentSyntax, String> {
    let value: serde_json::Value = serde_json::from_str(&strip_jsonc(content))
        .map_err(|e| format!("JSON parse error: {}", e))?;

    let comments = value.get("comments").cloned().unwrap_or(value);
    serde_json::from_value(comments).map_err(|e| format!("Invalid comment syntax: {}", e))
}

/// Remove `//` and `/* */` comments and trailing commas, leaving strings intact
pub fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}

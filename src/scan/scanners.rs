//! Span scanners
//!
//! Four independent passes over a [`Scope`]: single-line comments, block
//! comments, `/** */` doc blocks and Markdown list items. Each pass walks its
//! pattern left to right over non-overlapping matches and reports
//! [`Decoration`]s in document coordinates.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::grammar::{Grammar, DOC_BLOCK_EXPRESSION};
use super::state::ParseState;
use crate::decorations::Decoration;
use crate::tags::TagRegistry;

static DOC_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(DOC_BLOCK_EXPRESSION).expect("doc block pattern is valid"));

/// A window onto a document's text
///
/// Scanners only look at `text[range]` but report offsets relative to the
/// start of `text`, so nested scans need no translation afterwards.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    text: &'a str,
    range: Range<usize>,
}

impl<'a> Scope<'a> {
    pub fn document(text: &'a str) -> Self {
        Self {
            text,
            range: 0..text.len(),
        }
    }

    /// Narrow to `range`; out-of-bounds or non-boundary ranges become empty
    pub fn sub_range(text: &'a str, range: Range<usize>) -> Self {
        let range = if text.get(range.clone()).is_some() {
            range
        } else {
            tracing::warn!(?range, len = text.len(), "Ignoring invalid scan range");
            0..0
        };
        Self { text, range }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn slice(&self) -> &'a str {
        &self.text[self.range.clone()]
    }

    /// Absolute offset of the slice start
    pub fn offset(&self) -> usize {
        self.range.start
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

/// Compiled form of a [`Grammar`]
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    single_line: Option<Regex>,
    block: Option<Regex>,
    block_line: Regex,
    doc_line: Regex,
    markdown_list: Regex,
}

impl CompiledGrammar {
    pub fn compile(grammar: &Grammar) -> Result<Self, regex::Error> {
        Ok(Self {
            single_line: grammar.single_line.as_deref().map(Regex::new).transpose()?,
            block: grammar.block.as_deref().map(Regex::new).transpose()?,
            block_line: Regex::new(&grammar.block_line)?,
            doc_line: Regex::new(&grammar.doc_line)?,
            markdown_list: Regex::new(&grammar.markdown_list)?,
        })
    }
}

/// One outer block comment match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRegion {
    /// Whole match, delimiters included
    pub range: Range<usize>,
    /// Text between the delimiters
    pub interior: Range<usize>,
}

pub fn scan_single_line(
    scope: &Scope<'_>,
    state: &ParseState,
    grammar: &CompiledGrammar,
    tags: &TagRegistry,
) -> Vec<Decoration> {
    if !state.highlight_single_line {
        return Vec::new();
    }
    let Some(regex) = &grammar.single_line else {
        return Vec::new();
    };

    let slice = scope.slice();
    let base = scope.offset();

    regex
        .captures_iter(slice)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if state.ignore_first_line && base + whole.start() == 0 {
                return None;
            }
            let tag = caps.name("tag")?;
            let definition = tags.find(tag.as_str())?;
            let rest = caps.name("rest").map_or(whole.end(), |m| m.end());
            let end = trim_line_end(slice, tag.end(), rest);
            Some(Decoration::new(
                definition.style,
                base + tag.start(),
                base + end,
            ))
        })
        .collect()
}

/// Outer block comment regions of a scope
pub fn block_regions(scope: &Scope<'_>, grammar: &CompiledGrammar) -> Vec<BlockRegion> {
    match &grammar.block {
        Some(regex) => find_regions(regex, scope),
        None => Vec::new(),
    }
}

pub fn scan_blocks(
    scope: &Scope<'_>,
    state: &ParseState,
    grammar: &CompiledGrammar,
    tags: &TagRegistry,
) -> Vec<Decoration> {
    if !state.highlight_block {
        return Vec::new();
    }

    let mut out = Vec::new();
    for region in block_regions(scope, grammar) {
        scan_comment_lines(&grammar.block_line, scope.text(), region.interior, tags, &mut out);
    }
    out
}

/// Doc comment lines inside `/** */`, whatever the language's own delimiters
pub fn scan_doc_blocks(
    scope: &Scope<'_>,
    state: &ParseState,
    grammar: &CompiledGrammar,
    tags: &TagRegistry,
) -> Vec<Decoration> {
    if !state.scans_doc_blocks() {
        return Vec::new();
    }

    let mut out = Vec::new();
    for region in find_regions(&DOC_BLOCK, scope) {
        scan_comment_lines(&grammar.doc_line, scope.text(), region.interior, tags, &mut out);
    }
    out
}

pub fn scan_markdown_lists(
    scope: &Scope<'_>,
    state: &ParseState,
    grammar: &CompiledGrammar,
    tags: &TagRegistry,
) -> Vec<Decoration> {
    if !state.markdown {
        return Vec::new();
    }

    let slice = scope.slice();
    let base = scope.offset();

    grammar
        .markdown_list
        .captures_iter(slice)
        .filter_map(|caps| {
            let tag = caps.name("tag")?;
            let definition = tags.find(tag.as_str())?;
            let end = trim_line_end(slice, tag.end(), caps.get(0)?.end());
            Some(Decoration::new(
                definition.style,
                base + tag.start(),
                base + end,
            ))
        })
        .collect()
}

fn find_regions(regex: &Regex, scope: &Scope<'_>) -> Vec<BlockRegion> {
    let base = scope.offset();
    regex
        .captures_iter(scope.slice())
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let interior = caps.name("interior")?;
            Some(BlockRegion {
                range: base + whole.start()..base + whole.end(),
                interior: base + interior.start()..base + interior.end(),
            })
        })
        .collect()
}

/// Run a per-line pattern over `text[interior]`
///
/// Offsets compose as interior start (absolute) plus the line match's own
/// position within the interior.
fn scan_comment_lines(
    regex: &Regex,
    text: &str,
    interior: Range<usize>,
    tags: &TagRegistry,
    out: &mut Vec<Decoration>,
) {
    let Some(body) = text.get(interior.clone()) else {
        return;
    };

    for caps in regex.captures_iter(body) {
        let (Some(whole), Some(tag)) = (caps.get(0), caps.name("tag")) else {
            continue;
        };
        let Some(definition) = tags.find(tag.as_str()) else {
            continue;
        };
        let end = trim_line_end(body, tag.end(), whole.end());
        out.push(Decoration::new(
            definition.style,
            interior.start + tag.start(),
            interior.start + end,
        ));
    }
}

/// Pull `end` back over trailing whitespace, never before `floor`
fn trim_line_end(text: &str, floor: usize, end: usize) -> usize {
    let trimmed = text[floor..end].trim_end();
    floor + trimmed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::state::ScanToggles;
    use crate::syntax::CommentSyntax;
    use crate::tags::TagSpec;

    fn tags() -> TagRegistry {
        TagRegistry::new(&[TagSpec::new("TODO"), TagSpec::new("!"), TagSpec::new("?")])
    }

    fn setup(language: &str, syntax: Option<CommentSyntax>) -> (ParseState, CompiledGrammar) {
        let state = ParseState::new(language, syntax.as_ref(), &ScanToggles::default());
        let grammar = CompiledGrammar::compile(&Grammar::build(&state, &tags())).unwrap();
        (state, grammar)
    }

    fn c_like() -> Option<CommentSyntax> {
        Some(CommentSyntax::line("//").with_block("/*", "*/"))
    }

    fn spans(text: &str, decorations: &[Decoration]) -> Vec<String> {
        decorations
            .iter()
            .map(|d| text[d.range()].to_string())
            .collect()
    }

    #[test]
    fn test_single_line_span_starts_at_tag() {
        let (state, grammar) = setup("rust", c_like());
        let text = "fn main() {} // TODO: x  \n";
        let found = scan_single_line(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO: x"]);
    }

    #[test]
    fn test_single_line_unknown_token_dropped() {
        let (state, grammar) = setup("rust", c_like());
        let text = "// XYZ not a tag\n";
        assert!(scan_single_line(&Scope::document(text), &state, &grammar, &tags()).is_empty());
    }

    #[test]
    fn test_single_line_first_line_suppression() {
        let (state, grammar) = setup("python", Some(CommentSyntax::line("#")));
        let first = "#! TODO shebang\nx = 1\n";
        assert!(scan_single_line(&Scope::document(first), &state, &grammar, &tags()).is_empty());

        let later = "x = 1\n\n#! shout\n";
        let found = scan_single_line(&Scope::document(later), &state, &grammar, &tags());
        assert_eq!(spans(later, &found), vec!["! shout"]);
    }

    #[test]
    fn test_single_line_respects_sub_range() {
        let (state, grammar) = setup("rust", c_like());
        let text = "// TODO outside\n// ? inside\n";
        let scope = Scope::sub_range(text, 16..text.len());
        let found = scan_single_line(&scope, &state, &grammar, &tags());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 19);
        assert_eq!(spans(text, &found), vec!["? inside"]);
    }

    #[test]
    fn test_block_regions_are_non_overlapping() {
        let (_, grammar) = setup("c", c_like());
        let text = "/* TODO a */ /* TODO b */";
        let regions = block_regions(&Scope::document(text), &grammar);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].range, 0..12);
        assert_eq!(regions[1].range, 12..25);
    }

    #[test]
    fn test_block_lines() {
        let (state, grammar) = setup("c", c_like());
        let text = "int x;\n/*\n  TODO: first\n  plain line\n  ! second\n*/\n";
        let found = scan_blocks(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO: first", "! second"]);
    }

    #[test]
    fn test_doc_block_lines() {
        let (state, grammar) = setup("typescript", c_like());
        let text = "/**\n * TODO document\n * @param x\n */\nfunction f(x) {}\n";
        let found = scan_doc_blocks(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO document"]);
        assert_eq!(found[0].start, text.find("TODO").unwrap());
    }

    #[test]
    fn test_bare_tag_in_block() {
        let (state, grammar) = setup("c", c_like());
        let text = "/*\n  TODO\n  more text\n*/\n";
        let found = scan_blocks(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO"]);
    }

    #[test]
    fn test_bare_tag_in_doc_block() {
        let (state, grammar) = setup("typescript", c_like());
        let text = "/**\n * TODO\n */\n";
        let found = scan_doc_blocks(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO"]);
    }

    #[test]
    fn test_crlf_block_lines() {
        let (state, grammar) = setup("c", c_like());
        let text = "/*\r\n  TODO\r\n  ! careful\r\n*/\r\n";
        let found = scan_blocks(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO", "! careful"]);

        let (state, grammar) = setup("typescript", c_like());
        let text = "/**\r\n * TODO\r\n */\r\n";
        let found = scan_doc_blocks(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO"]);
    }

    #[test]
    fn test_block_start_as_line_delimiter_stops_at_block_end() {
        let (state, grammar) = setup("html", Some(CommentSyntax::block("<!--", "-->")));
        let text = "<p><!-- TODO: inline --></p>\n<!-- ! unclosed\n";
        let found = scan_single_line(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO: inline", "! unclosed"]);
    }

    #[test]
    fn test_markdown_lists() {
        let (state, grammar) = setup("markdown", Some(CommentSyntax::block("<!--", "-->")));
        let text = "# Title\n\n- [ ] TODO write docs\n* ! urgent\n- nothing\n";
        let found = scan_markdown_lists(&Scope::document(text), &state, &grammar, &tags());
        assert_eq!(spans(text, &found), vec!["TODO write docs", "! urgent"]);
    }

    #[test]
    fn test_invalid_sub_range_is_empty() {
        let scope = Scope::sub_range("short", 2..50);
        assert_eq!(scope.slice(), "");
        assert_eq!(scope.offset(), 0);
    }

    #[test]
    fn test_trim_line_end() {
        assert_eq!(trim_line_end("TODO x \r", 0, 8), 6);
        assert_eq!(trim_line_end("TODO   ", 0, 7), 4);
        assert_eq!(trim_line_end("TODO", 4, 4), 4);
    }
}

//! Comment grammar builder
//!
//! Turns a [`ParseState`] and the tag registry into regex *sources*. Nothing
//! here compiles a pattern; that happens in the scanners. Flags are inlined
//! (`(?i)`, `(?im)`) so each source is self-contained.
//!
//! Named groups shared by the patterns:
//! - `tag`: the captured marker, looked up in the registry
//! - `interior`: the text between block delimiters

use super::state::ParseState;
use crate::tags::TagRegistry;

/// `/** ... */` regions, independent of the language's own delimiters
pub const DOC_BLOCK_EXPRESSION: &str = r"(?m)(?:^|[ \t])(?:/\*\*)+(?P<interior>[\s\S]*?)(?:\*/)";

/// Markdown code fences with an optional language hint
pub const FENCE_EXPRESSION: &str =
    r"(?m)^[ \t]*```[ \t]*(?P<hint>[^\s`]*)[^\r\n]*\r?\n(?P<body>[\s\S]*?)^[ \t]*```";

/// Regex sources for one language and tag set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// `None` when the single-line scanner cannot run
    pub single_line: Option<String>,
    /// `None` when the language has no block delimiters or blocks are off
    pub block: Option<String>,
    pub block_line: String,
    pub doc_line: String,
    pub markdown_list: String,
}

impl Grammar {
    pub fn build(state: &ParseState, tags: &TagRegistry) -> Self {
        Self {
            single_line: state
                .highlight_single_line
                .then(|| single_line_expression(state, tags)),
            block: state.highlight_block.then(|| block_expression(state)),
            block_line: block_line_expression(tags),
            doc_line: doc_line_expression(tags),
            markdown_list: markdown_list_expression(tags),
        }
    }
}

/// Comment opener (or line start for plain text), the tag, the rest of the line
///
/// When the opener is a borrowed block start, `rest` stops before the block
/// end on the same line.
pub fn single_line_expression(state: &ParseState, tags: &TagRegistry) -> String {
    let prefix = if state.plain_text {
        "^[ \\t]*".to_string()
    } else {
        format!("(?:{})+[ \\t]*", state.delimiter)
    };
    let rest = if state.line_from_block {
        format!("(?P<rest>.*?)(?:{}|$)", state.block_end)
    } else {
        "(?P<rest>.*)".to_string()
    };
    format!("(?im){}(?P<tag>{}){}", prefix, tags.alternation(), rest)
}

/// Outer block region; the interior is non-greedy so adjacent blocks stay apart
pub fn block_expression(state: &ParseState) -> String {
    format!(
        "(?im)(?:^|[ \\t])(?:{}\\s)+(?P<interior>[\\s\\S]*?)(?:{})",
        state.block_start, state.block_end
    )
}

/// A tag-bearing line inside a block's interior
///
/// The body is optional, but when present it must start with something other
/// than `*` or `/` so a closing delimiter is never taken for comment text.
pub fn block_line_expression(tags: &TagRegistry) -> String {
    format!(
        "(?im)^[ \\t]*(?P<tag>{}){}",
        tags.alternation(),
        LINE_BODY
    )
}

/// Like [`block_line_expression`], after the conventional leading `*`
pub fn doc_line_expression(tags: &TagRegistry) -> String {
    format!(
        "(?im)^[ \\t]*\\*[ \\t]*(?P<tag>{}){}",
        tags.alternation(),
        LINE_BODY
    )
}

/// Separator, optional body, then the end of the line (CRLF included)
const LINE_BODY: &str = r"[ :]*(?:[^*/\r\n][^\r\n]*)?\r?$";

/// `* `, `- `, `* [ ] ` or `- [ ] ` list items starting with a tag
pub fn markdown_list_expression(tags: &TagRegistry) -> String {
    format!(
        "(?im)^[ \\t]*[*-] (?:\\[ \\] )?(?P<tag>{})(?P<rest>.*)",
        tags.alternation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::state::ScanToggles;
    use crate::syntax::{CommentSyntax, PLAIN_TEXT};
    use crate::tags::TagSpec;
    use regex::Regex;

    fn tags() -> TagRegistry {
        TagRegistry::new(&[TagSpec::new("TODO"), TagSpec::new("!"), TagSpec::new("//")])
    }

    fn rust_state() -> ParseState {
        let syntax = CommentSyntax::line("//").with_block("/*", "*/");
        ParseState::new("rust", Some(&syntax), &ScanToggles::default())
    }

    #[test]
    fn test_single_line_expression() {
        let source = single_line_expression(&rust_state(), &tags());
        assert_eq!(source, "(?im)(?:\\/\\/)+[ \\t]*(?P<tag>TODO|!|\\/\\/)(?P<rest>.*)");
        let regex = Regex::new(&source).unwrap();
        let caps = regex.captures("let x = 1; // todo: later").unwrap();
        assert_eq!(&caps["tag"], "todo");
        assert_eq!(&caps["rest"], ": later");
    }

    #[test]
    fn test_single_line_expression_plain_text() {
        let toggles = ScanToggles {
            highlight_plain_text: true,
            ..Default::default()
        };
        let state = ParseState::new(PLAIN_TEXT, None, &toggles);
        let regex = Regex::new(&single_line_expression(&state, &tags())).unwrap();
        assert!(regex.is_match("first\n  TODO second"));
        assert!(!regex.is_match("no tag here TODO"));
    }

    #[test]
    fn test_single_line_expression_with_block_start() {
        let html = CommentSyntax::block("<!--", "-->");
        let state = ParseState::new("html", Some(&html), &ScanToggles::default());
        let regex = Regex::new(&single_line_expression(&state, &tags())).unwrap();
        let caps = regex.captures("<!-- TODO: x -->").unwrap();
        assert_eq!(&caps["rest"], ": x ");
    }

    #[test]
    fn test_line_expressions_accept_bare_tag() {
        let block = Regex::new(&block_line_expression(&tags())).unwrap();
        assert!(block.is_match("  TODO"));
        assert!(block.is_match("  TODO:\r\n"));
        let doc = Regex::new(&doc_line_expression(&tags())).unwrap();
        assert!(doc.is_match(" * TODO\n"));
    }

    #[test]
    fn test_block_expression_is_non_greedy() {
        let regex = Regex::new(&block_expression(&rust_state())).unwrap();
        let interiors: Vec<_> = regex
            .captures_iter("/* TODO a */ /* TODO b */")
            .map(|c| c["interior"].to_string())
            .collect();
        assert_eq!(interiors, vec!["TODO a ", "TODO b "]);
    }

    #[test]
    fn test_block_line_rejects_closing_delimiter() {
        let regex = Regex::new(&block_line_expression(&tags())).unwrap();
        assert!(regex.is_match("  TODO: fix this"));
        assert!(!regex.is_match("  TODO*/"));
    }

    #[test]
    fn test_doc_line_expression() {
        let regex = Regex::new(&doc_line_expression(&tags())).unwrap();
        let caps = regex.captures("\n * TODO document this\n").unwrap();
        assert_eq!(&caps["tag"], "TODO");
        assert!(!regex.is_match("\n   TODO no star\n"));
    }

    #[test]
    fn test_markdown_list_expression() {
        let regex = Regex::new(&markdown_list_expression(&tags())).unwrap();
        for line in ["* TODO a", "- TODO a", "* [ ] TODO a", "- [ ] todo a", "  - TODO nested"] {
            assert!(regex.is_match(line), "{:?} should match", line);
        }
        for line in ["TODO a", "+ TODO a", "-TODO a", "1. TODO a"] {
            assert!(!regex.is_match(line), "{:?} should not match", line);
        }
    }

    #[test]
    fn test_fence_expression() {
        let regex = Regex::new(FENCE_EXPRESSION).unwrap();
        let text = "intro\n```py title\n# TODO fix\n```\n";
        let caps = regex.captures(text).unwrap();
        assert_eq!(&caps["hint"], "py");
        assert_eq!(&caps["body"], "# TODO fix\n");
    }

    #[test]
    fn test_grammar_skips_disabled_scanners() {
        let toggles = ScanToggles {
            multiline_comments: false,
            ..Default::default()
        };
        let syntax = CommentSyntax::line("//").with_block("/*", "*/");
        let state = ParseState::new("rust", Some(&syntax), &toggles);
        let grammar = Grammar::build(&state, &tags());
        assert!(grammar.single_line.is_some());
        assert!(grammar.block.is_none());
    }
}

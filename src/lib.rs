//! tagline - tagged comment highlighting
//!
//! This crate finds comments that start with user-defined tags (`TODO`,
//! `!`, `?`, ...) in source code and Markdown and reports their exact
//! ranges so they can be styled.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod decorations;
pub mod document;
pub mod report;
pub mod scan;
pub mod syntax;
pub mod tags;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use config::Config;
pub use decorations::{Decoration, DecorationSink, Decorations};
pub use document::{Document, Position};
pub use scan::{Highlighter, ParseState, ScanToggles};
pub use syntax::{CommentSyntax, SyntaxResolver, SyntaxSource};
pub use tags::{StyleId, TagDefinition, TagRegistry, TagSpec};

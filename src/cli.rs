//! Command-line argument parsing
//!
//! Supports:
//! - Scanning files, or stdin when no path is given
//! - Overriding the detected language
//! - Plain listing, JSON records or painted output
//! - Flipping the configured highlighting switches for one run

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;

/// Highlight tagged comments in source files
#[derive(Parser, Debug)]
#[command(name = "tagline", version, about = "Highlight tagged comments in source files")]
pub struct CliArgs {
    /// Files to scan (reads stdin when empty)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Language id to scan as, instead of detecting it from the extension
    #[arg(short, long, value_name = "ID")]
    pub language: Option<String>,

    /// Config file to use instead of ~/.config/tagline/config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of <languageId>.json comment syntax files
    #[arg(long, value_name = "DIR")]
    pub languages: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Ignore block comments
    #[arg(long)]
    pub no_multiline: bool,

    /// Ignore Markdown list items and code fences
    #[arg(long)]
    pub no_markdown: bool,

    /// Treat lines of plain text files as comments
    #[arg(long)]
    pub plain_text: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `path:line:col: TAG  text` per match
    Text,
    /// One JSON object per match
    Json,
    /// The whole input with tagged spans colored
    Paint,
}

/// Where the text to scan comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl CliArgs {
    pub fn inputs(&self) -> Vec<Input> {
        if self.paths.is_empty() {
            vec![Input::Stdin]
        } else {
            self.paths
                .iter()
                .map(|p| {
                    if p.as_os_str() == "-" {
                        Input::Stdin
                    } else {
                        Input::File(p.clone())
                    }
                })
                .collect()
        }
    }

    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if self.no_multiline {
            config.multiline_comments = false;
        }
        if self.no_markdown {
            config.highlight_markdown = false;
        }
        if self.plain_text {
            config.highlight_plain_text = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("tagline").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_paths_reads_stdin() {
        assert_eq!(parse(&[]).inputs(), vec![Input::Stdin]);
    }

    #[test]
    fn test_dash_is_stdin() {
        let args = parse(&["a.rs", "-"]);
        assert_eq!(
            args.inputs(),
            vec![Input::File(PathBuf::from("a.rs")), Input::Stdin]
        );
    }

    #[test]
    fn test_format_and_language() {
        let args = parse(&["--format", "json", "-l", "py", "x"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.language.as_deref(), Some("py"));
    }

    #[test]
    fn test_overrides() {
        let args = parse(&["--no-multiline", "--plain-text"]);
        let config = args.apply_overrides(Config::default());
        assert!(!config.multiline_comments);
        assert!(config.highlight_plain_text);
        assert!(config.highlight_markdown);
    }
}

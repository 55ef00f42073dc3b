use std::io::{self, Read, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use tagline::cli::{CliArgs, Input, OutputFormat};
use tagline::config_paths;
use tagline::report::collect_matches;
use tagline::syntax::{
    BuiltinSyntaxSource, FileSyntaxSource, LayeredSyntaxSource, SyntaxResolver, PLAIN_TEXT,
};
use tagline::theme::TerminalPainter;
use tagline::{Config, Document, Highlighter};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    tagline::tracing::init(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load_from(path).map_err(anyhow::Error::msg)?,
        None => Config::load(),
    };
    let config = args.apply_overrides(config);

    let mut source = LayeredSyntaxSource::new();
    if let Some(dir) = args.languages.clone().or_else(config_paths::languages_dir) {
        tracing::debug!("Reading language syntax files from {}", dir.display());
        source = source.with_layer(FileSyntaxSource::new(dir));
    }
    let source = source.with_layer(BuiltinSyntaxSource);

    let highlighter = Highlighter::new(
        config.tag_registry(),
        config.toggles(),
        Arc::new(SyntaxResolver::new(source)),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;

    for input in args.inputs() {
        let (label, document) = match load(&input, args.language.as_deref()) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("tagline: {:#}", e);
                failures += 1;
                continue;
            }
        };

        let decorations = highlighter.scan_document(&document);
        tracing::debug!(
            source = %label,
            language = document.language(),
            matches = decorations.len(),
            "Scanned input"
        );

        match args.format {
            OutputFormat::Text => {
                for found in collect_matches(&label, &document, highlighter.tags(), &decorations) {
                    writeln!(out, "{}", found.to_text_line())?;
                }
            }
            OutputFormat::Json => {
                for found in collect_matches(&label, &document, highlighter.tags(), &decorations) {
                    writeln!(out, "{}", found.to_json_line().map_err(anyhow::Error::msg)?)?;
                }
            }
            OutputFormat::Paint => {
                let mut painter = TerminalPainter::new(highlighter.tags());
                decorations.apply(&mut painter);
                write!(out, "{}", painter.paint(&document.text()))?;
            }
        }
    }

    out.flush()?;
    if failures > 0 {
        anyhow::bail!("{} input(s) could not be read", failures);
    }
    Ok(())
}

fn load(input: &Input, language: Option<&str>) -> Result<(String, Document)> {
    let (label, document) = match input {
        Input::Stdin => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            ("<stdin>".to_string(), Document::with_text(&text, PLAIN_TEXT))
        }
        Input::File(path) => {
            let document = Document::from_file(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (path.display().to_string(), document)
        }
    };

    Ok(match language {
        Some(language) => (label, document.with_language(language)),
        None => (label, document),
    })
}

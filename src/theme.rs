//! Tag styling for terminal output
//!
//! Resolves the pass-through style strings of each tag into colors and
//! paints decorated text with 24-bit ANSI escapes. Malformed colors are
//! logged and dropped; the rest of the style still applies.

use std::ops::Range;

use crate::decorations::DecorationSink;
use crate::tags::{StyleId, TagRegistry, TagStyle};

pub const RESET: &str = "\x1b[0m";

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse from "#RGB", "#RRGGBB" or "#RRGGBBAA"
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |range: Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|h| u8::from_str_radix(h, 16).map_err(|e| format!("{}: {}", s, e)))
        };

        match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Terminal rendition of a [`TagStyle`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnsiStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl AnsiStyle {
    pub fn from_tag_style(style: &TagStyle) -> Self {
        Self {
            foreground: parse_optional_color(style.color.as_deref()),
            background: parse_optional_color(style.background_color.as_deref()),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strikethrough: style.strikethrough,
        }
    }

    /// SGR escape sequence switching this style on (empty for a plain style)
    pub fn prefix(&self) -> String {
        let mut codes = Vec::new();
        if self.bold {
            codes.push("1".to_string());
        }
        if self.italic {
            codes.push("3".to_string());
        }
        if self.underline {
            codes.push("4".to_string());
        }
        if self.strikethrough {
            codes.push("9".to_string());
        }
        if let Some(c) = self.foreground {
            codes.push(format!("38;2;{};{};{}", c.r, c.g, c.b));
        }
        if let Some(c) = self.background {
            codes.push(format!("48;2;{};{};{}", c.r, c.g, c.b));
        }

        if codes.is_empty() {
            String::new()
        } else {
            format!("\x1b[{}m", codes.join(";"))
        }
    }
}

fn parse_optional_color(value: Option<&str>) -> Option<Color> {
    let value = value?;
    match Color::from_hex(value) {
        Ok(color) => Some(color),
        Err(e) => {
            tracing::warn!("Ignoring tag color: {}", e);
            None
        }
    }
}

/// Paints decorated ranges into a string with ANSI escapes
#[derive(Debug, Clone, Default)]
pub struct TerminalPainter {
    styles: Vec<AnsiStyle>,
    ranges: Vec<Vec<Range<usize>>>,
}

impl TerminalPainter {
    pub fn new(tags: &TagRegistry) -> Self {
        let styles: Vec<AnsiStyle> = tags
            .definitions()
            .iter()
            .map(|def| {
                tags.style(def.style)
                    .map(AnsiStyle::from_tag_style)
                    .unwrap_or_default()
            })
            .collect();
        let ranges = vec![Vec::new(); styles.len()];
        Self { styles, ranges }
    }

    pub fn style(&self, id: StyleId) -> Option<&AnsiStyle> {
        self.styles.get(id.index())
    }

    /// Wrap every decorated range of `text` in its style
    ///
    /// Where ranges overlap, the one starting first is kept.
    pub fn paint(&self, text: &str) -> String {
        let mut spans: Vec<(usize, usize, &AnsiStyle)> = self
            .ranges
            .iter()
            .zip(&self.styles)
            .flat_map(|(ranges, style)| ranges.iter().map(move |r| (r.start, r.end, style)))
            .collect();
        spans.sort_by_key(|(start, end, _)| (*start, *end));

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end, style) in spans {
            if start < cursor || text.get(start..end).is_none() {
                continue;
            }
            let prefix = style.prefix();
            out.push_str(&text[cursor..start]);
            if prefix.is_empty() {
                out.push_str(&text[start..end]);
            } else {
                out.push_str(&prefix);
                out.push_str(&text[start..end]);
                out.push_str(RESET);
            }
            cursor = end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

impl DecorationSink for TerminalPainter {
    fn replace(&mut self, style: StyleId, ranges: &[Range<usize>]) {
        match self.ranges.get_mut(style.index()) {
            Some(slot) => {
                slot.clear();
                slot.extend_from_slice(ranges);
            }
            None => tracing::warn!(?style, "No terminal style for decoration"),
        }
    }
}

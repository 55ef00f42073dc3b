//! Scan results
//!
//! Scanners emit flat [`Decoration`]s; [`Decorations`] groups them per tag so
//! a renderer can replace the complete range set of each style in one go.

use std::ops::Range;

use serde::Serialize;

use crate::tags::{StyleId, TagRegistry};

/// A tagged span in document coordinates (byte offsets, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Decoration {
    pub style: StyleId,
    pub start: usize,
    pub end: usize,
}

impl Decoration {
    pub fn new(style: StyleId, start: usize, end: usize) -> Self {
        Self { style, start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// All ranges drawn with one tag's style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRanges {
    pub style: StyleId,
    pub tag: String,
    pub ranges: Vec<Range<usize>>,
}

/// Receiver of a scan's results
///
/// `replace` is called once per registered tag with the full range list,
/// which is empty when the tag no longer appears. Implementations drop
/// whatever they had for that style before applying the new ranges.
pub trait DecorationSink {
    fn replace(&mut self, style: StyleId, ranges: &[Range<usize>]);
}

/// Complete result of one scan, one entry per registered tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decorations {
    groups: Vec<TagRanges>,
}

impl Decorations {
    /// Group matches by tag; ranges come out sorted and without duplicates
    pub fn collect(tags: &TagRegistry, matches: impl IntoIterator<Item = Decoration>) -> Self {
        let mut groups: Vec<TagRanges> = tags
            .definitions()
            .iter()
            .map(|def| TagRanges {
                style: def.style,
                tag: def.tag.clone(),
                ranges: Vec::new(),
            })
            .collect();

        for decoration in matches {
            match groups.get_mut(decoration.style.index()) {
                Some(group) => group.ranges.push(decoration.range()),
                None => tracing::warn!(?decoration, "Dropping decoration with unknown style"),
            }
        }

        for group in &mut groups {
            group.ranges.sort_by_key(|r| (r.start, r.end));
            group.ranges.dedup();
        }

        Self { groups }
    }

    pub fn groups(&self) -> &[TagRanges] {
        &self.groups
    }

    pub fn ranges_for(&self, style: StyleId) -> &[Range<usize>] {
        self.groups
            .get(style.index())
            .map(|group| group.ranges.as_slice())
            .unwrap_or(&[])
    }

    /// Every decoration, ordered by position in the document
    pub fn to_sorted_vec(&self) -> Vec<Decoration> {
        let mut all: Vec<Decoration> = self
            .groups
            .iter()
            .flat_map(|group| {
                group
                    .ranges
                    .iter()
                    .map(move |r| Decoration::new(group.style, r.start, r.end))
            })
            .collect();
        all.sort_by_key(|d| (d.start, d.end, d.style));
        all
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.ranges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hand the full replacement set to a sink
    pub fn apply(&self, sink: &mut impl DecorationSink) {
        for group in &self.groups {
            sink.replace(group.style, &group.ranges);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagSpec;

    fn registry() -> TagRegistry {
        TagRegistry::new(&[TagSpec::new("!"), TagSpec::new("TODO")])
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<(StyleId, Vec<Range<usize>>)>,
    }

    impl DecorationSink for RecordingSink {
        fn replace(&mut self, style: StyleId, ranges: &[Range<usize>]) {
            self.calls.push((style, ranges.to_vec()));
        }
    }

    #[test]
    fn test_collect_groups_sorts_and_dedups() {
        let tags = registry();
        let todo = tags.definitions()[1].style;
        let decorations = Decorations::collect(
            &tags,
            vec![
                Decoration::new(todo, 20, 30),
                Decoration::new(todo, 5, 10),
                Decoration::new(todo, 20, 30),
            ],
        );

        assert_eq!(decorations.ranges_for(todo), &[5..10, 20..30]);
        assert_eq!(decorations.len(), 2);
        assert_eq!(decorations.groups().len(), 2);
    }

    #[test]
    fn test_apply_sends_every_tag() {
        let tags = registry();
        let todo = tags.definitions()[1].style;
        let decorations = Decorations::collect(&tags, vec![Decoration::new(todo, 0, 4)]);

        let mut sink = RecordingSink::default();
        decorations.apply(&mut sink);

        assert_eq!(sink.calls.len(), 2);
        assert!(sink.calls[0].1.is_empty());
        assert_eq!(sink.calls[1].1, vec![0..4]);
    }

    #[test]
    fn test_to_sorted_vec_orders_by_position() {
        let tags = registry();
        let bang = tags.definitions()[0].style;
        let todo = tags.definitions()[1].style;
        let decorations = Decorations::collect(
            &tags,
            vec![Decoration::new(bang, 40, 45), Decoration::new(todo, 3, 8)],
        );

        let sorted = decorations.to_sorted_vec();
        assert_eq!(sorted[0].style, todo);
        assert_eq!(sorted[1].style, bang);
    }
}

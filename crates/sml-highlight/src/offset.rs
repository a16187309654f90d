//! Offset translation between the source and its highlighted text.
//!
//! Highlighting expands every tab inside whitespace to `tab_width` spaces,
//! so character offsets shift after each expanded tab. The mapping records
//! the original offset of those tabs once and answers each query with a
//! binary search.

use sml_parser::{ParseTree, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMapping {
    /// Original character offsets of expanded tabs, ascending.
    tabs: Vec<usize>,
    /// Where each of those tabs starts in the highlighted text.
    expanded: Vec<usize>,
    /// Extra characters added per tab.
    growth: usize,
    original_len: usize,
    transformed_len: usize,
}

impl OffsetMapping {
    /// Build the mapping for `tree`. A `tab_width` of 0 is treated as 1.
    pub fn new(tree: &ParseTree, tab_width: usize) -> Self {
        let growth = tab_width.max(1) - 1;
        let mut tabs = Vec::new();
        let mut offset = 0;

        tree.for_each_piece(&mut |piece| {
            if piece.kind == PieceKind::Whitespace {
                for (i, c) in piece.text.chars().enumerate() {
                    if c == '\t' {
                        tabs.push(offset + i);
                    }
                }
            }
            offset += piece.text.chars().count();
        });

        let expanded = tabs.iter().enumerate().map(|(i, tab)| tab + i * growth).collect();

        Self {
            growth,
            original_len: offset,
            transformed_len: offset + tabs.len() * growth,
            tabs,
            expanded,
        }
    }

    /// Length of the source in characters.
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Length of the highlighted text in characters.
    pub fn transformed_len(&self) -> usize {
        self.transformed_len
    }

    /// Map a source offset to the highlighted text. Offsets past the end
    /// clamp to the end.
    pub fn original_to_transformed(&self, offset: usize) -> usize {
        let offset = offset.min(self.original_len);
        let tabs_before = self.tabs.partition_point(|&tab| tab < offset);
        offset + tabs_before * self.growth
    }

    /// Map a highlighted-text offset back to the source. Offsets inside an
    /// expanded tab land on the tab itself.
    pub fn transformed_to_original(&self, offset: usize) -> usize {
        let offset = offset.min(self.transformed_len);
        let width = self.growth + 1;
        let passed = self.expanded.partition_point(|&start| start + width <= offset);

        if passed < self.tabs.len() && self.expanded[passed] < offset {
            return self.tabs[passed];
        }
        offset - passed * self.growth
    }
}

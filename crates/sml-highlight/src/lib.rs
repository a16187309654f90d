//! SML Highlight
//!
//! Turns a [`ParseTree`](sml_parser::ParseTree) into styled text for a code
//! editor, and maps cursor offsets between the source and the highlighted
//! text (which differ where tabs were expanded).
//!
//! ```
//! use sml_highlight::{highlight_source, HighlightConfig, Style};
//!
//! let out = highlight_source("Page {\n\ttext: \"hi\"\n}", &HighlightConfig::default());
//! assert_eq!(out.styled.text(), "Page {\n    text: \"hi\"\n}");
//! assert_eq!(out.styled.runs().next().map(|r| r.style), Some(Style::Keyword));
//! assert_eq!(out.mapping.transformed_to_original(9), 7);
//! ```

pub mod config;
pub mod highlight;
pub mod offset;
pub mod style;

pub use config::{ConfigError, HighlightConfig, DEFAULT_TAB_WIDTH};
pub use highlight::{highlight, highlight_source, Highlighted, StyledRun, StyledSpan, StyledText};
pub use offset::OffsetMapping;
pub use style::{Palette, Style, StyleSpec};

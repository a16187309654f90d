use std::ops::Range;

use sml_parser::{ParseError, ParseTree, Parser, PieceKind};

use crate::config::HighlightConfig;
use crate::offset::OffsetMapping;
use crate::style::{Palette, Style, StyleSpec};

/// Highlighted text: the tab-expanded source split into styled runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    runs: Vec<(Range<usize>, Style)>,
    palette: Palette,
}

/// One run of [`StyledText`]. `range` is in bytes of [`StyledText::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun<'a> {
    pub text: &'a str,
    pub style: Style,
    pub range: Range<usize>,
}

/// A run resolved against the palette, ready for an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub style: StyleSpec,
}

impl StyledText {
    fn new(palette: Palette) -> Self {
        Self {
            text: String::new(),
            runs: Vec::new(),
            palette,
        }
    }

    /// Append `text`, merging with the previous run when the style matches.
    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();

        match self.runs.last_mut() {
            Some((range, last)) if *last == style => range.end = end,
            _ => self.runs.push((start..end, style)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Runs in order. They cover the text without gaps.
    pub fn runs(&self) -> impl Iterator<Item = StyledRun<'_>> {
        self.runs.iter().map(|(range, style)| StyledRun {
            text: &self.text[range.clone()],
            style: *style,
            range: range.clone(),
        })
    }

    /// Runs with a visible style. Plain runs are left out.
    pub fn spans(&self) -> Vec<StyledSpan> {
        self.runs
            .iter()
            .filter(|(_, style)| *style != Style::Plain)
            .map(|(range, style)| StyledSpan {
                range: range.clone(),
                style: self.palette.spec(*style),
            })
            .collect()
    }
}

/// Style every piece of `tree`. Tabs in whitespace are expanded to
/// `config.tab_width` spaces; all other text is copied verbatim.
pub fn highlight(tree: &ParseTree, config: &HighlightConfig) -> StyledText {
    let tab = " ".repeat(config.tab_width.max(1));
    let mut styled = StyledText::new(config.palette);

    tree.for_each_piece(&mut |piece| {
        let style = Style::of(piece.kind);
        if piece.kind == PieceKind::Whitespace && piece.text.contains('\t') {
            styled.push(&piece.text.replace('\t', &tab), style);
        } else {
            styled.push(piece.text, style);
        }
    });

    log::trace!(
        "highlighted {} bytes into {} runs",
        styled.text.len(),
        styled.runs.len()
    );
    styled
}

/// Everything an editor needs to redraw after an edit.
#[derive(Debug, Clone)]
pub struct Highlighted {
    /// The parsed tree, or the recovery tree when parsing failed.
    pub tree: ParseTree,
    pub styled: StyledText,
    pub mapping: OffsetMapping,
    pub error: Option<ParseError>,
}

impl Highlighted {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse and highlight `source`. Broken documents are highlighted from
/// [`Parser::recover`] so the text stays coloured while it is being typed.
pub fn highlight_source(source: &str, config: &HighlightConfig) -> Highlighted {
    let (tree, error) = match Parser::parse(source) {
        Ok(tree) => (tree, None),
        Err(e) => {
            log::debug!("highlighting without structure: {e}");
            (Parser::recover(source), Some(e))
        }
    };

    Highlighted {
        styled: highlight(&tree, config),
        mapping: OffsetMapping::new(&tree, config.tab_width),
        tree,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use sml_model::Color;

    fn runs(source: &str) -> Vec<(String, Style)> {
        let tree = Parser::parse(source).unwrap();
        highlight(&tree, &HighlightConfig::default())
            .runs()
            .map(|r| (r.text.to_string(), r.style))
            .collect()
    }

    fn run(text: &str, style: Style) -> (String, Style) {
        (text.to_string(), style)
    }

    // =========================================================================
    // Styles
    // =========================================================================

    #[test]
    fn test_page_with_text() {
        assert_eq!(
            runs("Page{color:\"#FFFFFF\" Text{text:\"Hi\"}}"),
            vec![
                run("Page", Style::Keyword),
                run("{", Style::Plain),
                run("color", Style::Attribute),
                run(":", Style::Plain),
                run("\"#FFFFFF\"", Style::String),
                run(" ", Style::Plain),
                run("Text", Style::Keyword),
                run("{", Style::Plain),
                run("text", Style::Attribute),
                run(":", Style::Plain),
                run("\"Hi\"", Style::String),
                run("}}", Style::Plain),
            ]
        );
    }

    #[test]
    fn test_comments_and_numbers() {
        assert_eq!(
            runs("// top\nSpacer { amount: 1.5 /* c */ }"),
            vec![
                run("// top", Style::Comment),
                run("\n", Style::Plain),
                run("Spacer", Style::Keyword),
                run(" { ", Style::Plain),
                run("amount", Style::Attribute),
                run(": ", Style::Plain),
                run("1.5", Style::Number),
                run(" ", Style::Plain),
                run("/* c */", Style::Comment),
                run(" }", Style::Plain),
            ]
        );
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let styled = runs("Text { fontSize: 007 }");
        assert!(styled.contains(&run("007", Style::Number)));
    }

    #[rstest]
    #[case("Page {\n\ttext: \"hi\"\n}", 4, "Page {\n    text: \"hi\"\n}")]
    #[case("Page {\n\t\tText {}\n}", 2, "Page {\n    Text {}\n}")]
    #[case("// a\tb\nPage { text: \"x\ty\" }", 4, "// a\tb\nPage { text: \"x\ty\" }")]
    fn test_tab_expansion(#[case] source: &str, #[case] tab_width: usize, #[case] expected: &str) {
        let config = HighlightConfig {
            tab_width,
            ..HighlightConfig::default()
        };
        let styled = highlight(&Parser::parse(source).unwrap(), &config);
        assert_eq!(styled.text(), expected);
    }

    #[test]
    fn test_runs_cover_text() {
        let source = "App {\n\tname: \"x\"\n\t// c\n\tTheme { primary: \"#FFFFFF\" }\n}\n";
        let styled = highlight(&Parser::parse(source).unwrap(), &HighlightConfig::default());
        let joined: String = styled.runs().map(|r| r.text).collect();
        assert_eq!(joined, styled.text());
        assert_eq!(joined, source.replace('\t', "    "));

        let mut end = 0;
        for r in styled.runs() {
            assert_eq!(r.range.start, end);
            end = r.range.end;
        }
        assert_eq!(end, styled.text().len());
    }

    #[test]
    fn test_spans_resolve_palette() {
        let styled = highlight(&Parser::parse("Page { padding: \"8\" }").unwrap(), &HighlightConfig::default());
        let spans = styled.spans();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].range, 0..4);
        assert_eq!(spans[0].style.color, Some(Color::rgb(0x61, 0xBE, 0xA6)));
        assert_eq!(spans[1].range, 7..14);
        assert_eq!(spans[1].style.color, Some(Color::rgb(0xA0, 0xD4, 0xFC)));
        assert_eq!(&styled.text()[spans[2].range.clone()], "\"8\"");
        assert_eq!(spans[2].style.color, Some(Color::rgb(0xBE, 0x89, 0x6F)));
    }

    #[test]
    fn test_empty_tree() {
        let styled = highlight(&ParseTree::default(), &HighlightConfig::default());
        assert!(styled.is_empty());
        assert_eq!(styled.runs().count(), 0);
    }

    // =========================================================================
    // highlight_source
    // =========================================================================

    #[test]
    fn test_highlight_source_valid() {
        let out = highlight_source("Page {\n\ttext: \"hi\"\n}", &HighlightConfig::default());
        assert!(out.is_valid());
        assert_eq!(out.styled.text(), "Page {\n    text: \"hi\"\n}");
        assert_eq!(out.mapping.original_to_transformed(8), 11);
        assert_eq!(out.tree.root().map(|r| r.name.as_str()), Some("Page"));
    }

    #[test]
    fn test_highlight_source_broken_input() {
        let source = "Page {\n\tText { text: \"Hi";
        let out = highlight_source(source, &HighlightConfig::default());
        assert_eq!(out.error.as_ref().map(|e| e.message.as_str()), Some("Unterminated string"));
        assert_eq!(out.styled.text(), source.replace('\t', "    "));

        let styles: Vec<_> = out.styled.runs().map(|r| (r.text, r.style)).collect();
        assert_eq!(styles[0], ("Page", Style::Keyword));
        assert!(styles.contains(&("text", Style::Keyword)));
        assert_eq!(styles.last(), Some(&(": \"Hi", Style::Plain)));
    }

    #[test]
    fn test_highlight_source_missing_brace() {
        let out = highlight_source("Page{", &HighlightConfig::default());
        assert!(!out.is_valid());
        assert_eq!(out.styled.text(), "Page{");
        assert_eq!(out.mapping.original_len(), 5);
    }

    #[test]
    fn test_highlight_source_deep_nesting() {
        let source = format!("Page{{{}{}", "Column{".repeat(999), "}".repeat(1000));
        let out = highlight_source(&source, &HighlightConfig::default());
        assert_eq!(out.error.as_ref().map(|e| e.message.as_str()), Some("Nesting too deep"));
        assert_eq!(out.styled.text(), source);

        let styles: Vec<_> = out.styled.runs().take(3).map(|r| (r.text, r.style)).collect();
        assert_eq!(
            styles,
            vec![("Page", Style::Keyword), ("{", Style::Plain), ("Column", Style::Keyword)]
        );
    }
}

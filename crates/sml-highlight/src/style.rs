use serde::{Deserialize, Serialize};
use sml_model::Color;
use sml_parser::PieceKind;

/// Style class of a highlighted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Whitespace, punctuation and unclassified text.
    Plain,
    Comment,
    /// Element names and bare identifiers.
    Keyword,
    /// Property names.
    Attribute,
    /// String literals, quotes included.
    String,
    /// Integer and float literals.
    Number,
}

impl Style {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Comment => Style::Comment,
            PieceKind::Name => Style::Keyword,
            PieceKind::PropertyName => Style::Attribute,
            PieceKind::StringValue => Style::String,
            PieceKind::NumberValue => Style::Number,
            PieceKind::Whitespace | PieceKind::Punctuation | PieceKind::Raw => Style::Plain,
        }
    }
}

/// How a run is drawn. `color: None` keeps the editor's text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSpec {
    pub color: Option<Color>,
    pub bold: bool,
}

/// Colors for each style class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub comment: Color,
    pub keyword: Color,
    pub attribute: Color,
    pub string: Color,
    pub number: Color,
    /// Draw keywords in bold.
    pub bold_keywords: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            comment: Color::rgb(0x80, 0x80, 0x80),
            keyword: Color::rgb(0x61, 0xBE, 0xA6),
            attribute: Color::rgb(0xA0, 0xD4, 0xFC),
            string: Color::rgb(0xBE, 0x89, 0x6F),
            number: Color::rgb(0xA0, 0xB5, 0x92),
            bold_keywords: false,
        }
    }
}

impl Palette {
    pub fn spec(&self, style: Style) -> StyleSpec {
        let color = match style {
            Style::Plain => None,
            Style::Comment => Some(self.comment),
            Style::Keyword => Some(self.keyword),
            Style::Attribute => Some(self.attribute),
            Style::String => Some(self.string),
            Style::Number => Some(self.number),
        };
        StyleSpec {
            color,
            bold: style == Style::Keyword && self.bold_keywords,
        }
    }
}

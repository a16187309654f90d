//! Lossless syntax tree for SML.
//!
//! Unlike a conventional AST, whitespace and comments are kept as nodes,
//! and literals keep their source text next to their decoded value. Every
//! tree therefore prints back to exactly the source it was parsed from.

use std::fmt;

use sml_lexer::Span;

/// A parsed document: the top-level sequence of elements and trivia.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseTree {
    pub items: Vec<ParsedElement>,
}

impl ParseTree {
    pub fn new(items: Vec<ParsedElement>) -> Self {
        Self { items }
    }

    /// The first top-level element, which decides the document type.
    pub fn root(&self) -> Option<&Element> {
        self.elements().next()
    }

    /// Top-level elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.items.iter().filter_map(ParsedElement::as_element)
    }

    /// Reconstruct the source text.
    pub fn to_source(&self) -> String {
        self.to_string()
    }

    /// Visit every piece of source text in document order.
    pub fn for_each_piece<'t>(&'t self, f: &mut impl FnMut(Piece<'t>)) {
        for item in &self.items {
            item.for_each_piece(f);
        }
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.items.iter().try_for_each(|item| write!(f, "{item}"))
    }
}

/// A node in the lossless tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedElement {
    /// A run of spaces, tabs and line breaks.
    Whitespace(String),

    /// A `// line` or `/* block */` comment, delimiters included.
    Comment(String),

    /// A bare name that is not the head of an element.
    Identifier(String),

    /// `name: value`
    Property(Property),

    /// `Name { children }`
    Element(Element),

    /// Unclassified source text; only produced by [`crate::Parser::recover`].
    Raw(String),
}

impl ParsedElement {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ParsedElement::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            ParsedElement::Property(prop) => Some(prop),
            _ => None,
        }
    }

    /// Length of the node's source text in characters.
    pub fn source_len(&self) -> usize {
        let mut len = 0;
        self.for_each_piece(&mut |piece| len += piece.text.chars().count());
        len
    }

    /// Visit the source text of this node, recursing into element bodies
    /// between their literal braces.
    pub fn for_each_piece<'t>(&'t self, f: &mut impl FnMut(Piece<'t>)) {
        match self {
            ParsedElement::Whitespace(text) => f(Piece::new(text, PieceKind::Whitespace)),
            ParsedElement::Comment(text) => f(Piece::new(text, PieceKind::Comment)),
            ParsedElement::Identifier(name) => f(Piece::new(name, PieceKind::Name)),
            ParsedElement::Raw(text) => f(Piece::new(text, PieceKind::Raw)),
            ParsedElement::Property(prop) => {
                f(Piece::new(&prop.name, PieceKind::PropertyName));
                trivia_pieces(&prop.before_colon, f);
                f(Piece::new(":", PieceKind::Punctuation));
                trivia_pieces(&prop.after_colon, f);
                let kind = match prop.value {
                    PropertyValue::String(_) => PieceKind::StringValue,
                    PropertyValue::Int(_) | PropertyValue::Float(_) => PieceKind::NumberValue,
                };
                f(Piece::new(&prop.raw_value, kind));
            }
            ParsedElement::Element(el) => {
                f(Piece::new(&el.name, PieceKind::Name));
                trivia_pieces(&el.head, f);
                f(Piece::new("{", PieceKind::Punctuation));
                for child in &el.children {
                    child.for_each_piece(f);
                }
                f(Piece::new("}", PieceKind::Punctuation));
            }
        }
    }
}

fn trivia_pieces<'t>(trivia: &'t [ParsedElement], f: &mut impl FnMut(Piece<'t>)) {
    for node in trivia {
        node.for_each_piece(f);
    }
}

impl fmt::Display for ParsedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = Ok(());
        self.for_each_piece(&mut |piece| {
            if result.is_ok() {
                result = f.write_str(piece.text);
            }
        });
        result
    }
}

/// A `name: value` pair inside an element body.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
    /// The literal as written, quotes included.
    pub raw_value: String,
    /// Trivia between the name and the colon.
    pub before_colon: Vec<ParsedElement>,
    /// Trivia between the colon and the value.
    pub after_colon: Vec<ParsedElement>,
    /// Span of the property name.
    pub span: Span,
}

/// A `Name { ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    /// Trivia between the name and the opening brace.
    pub head: Vec<ParsedElement>,
    /// Properties, nested elements and trivia in source order.
    pub children: Vec<ParsedElement>,
    /// Span of the element name.
    pub span: Span,
}

impl Element {
    /// Properties in source order, duplicates included.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.children.iter().filter_map(ParsedElement::as_property)
    }

    /// Nested elements in source order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(ParsedElement::as_element)
    }

    /// The value of the last property named `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties()
            .filter(|p| p.name == name)
            .last()
            .map(|p| &p.value)
    }
}

/// A decoded property literal. The variant is fixed by the literal's
/// syntax; there is no coercion between variants.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Float(f64),
}

impl PropertyValue {
    /// Name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::Int(_) => "integer",
            PropertyValue::Float(_) => "float",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "\"{s}\""),
            PropertyValue::Int(n) => write!(f, "{n}"),
            PropertyValue::Float(n) => write!(f, "{n:?}"),
        }
    }
}

/// A slice of source text together with its syntactic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece<'t> {
    pub text: &'t str,
    pub kind: PieceKind,
}

impl<'t> Piece<'t> {
    pub fn new(text: &'t str, kind: PieceKind) -> Self {
        Self { text, kind }
    }
}

/// Syntactic role of a [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Whitespace,
    Comment,
    /// An element name or bare identifier.
    Name,
    PropertyName,
    StringValue,
    NumberValue,
    /// `{`, `}` and `:`.
    Punctuation,
    Raw,
}

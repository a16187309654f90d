//! SML Model
//!
//! Decodes a [`ParseTree`] into the typed model renderers consume: a
//! [`Page`] of UI elements, an [`App`] project or a [`Book`] project.
//!
//! Decoding is forgiving. Unknown elements and properties, literals of the
//! wrong type and missing required properties become [`DecodeWarning`]s and
//! the schema default is used instead. Only a missing or unrecognized root
//! element is a [`DecodeError`].
//!
//! ```
//! use sml_model::{parse_page, UIElement};
//!
//! let decoded = parse_page("Page { padding: \"8\" Text { text: \"Hi\" } }").unwrap();
//! assert!(decoded.warnings.is_empty());
//! assert_eq!(decoded.value.padding.top, 8);
//! assert!(matches!(&decoded.value.elements[0], UIElement::Text(t) if t.text == "Hi"));
//! ```

pub mod color;
pub mod decode;
pub mod model;
pub mod padding;
pub mod schema;

pub use color::{hex_to_color, parse_hex_color, Color};
pub use decode::{decode, decode_app, decode_book, decode_page};
pub use model::{
    App, Book, ButtonElement, ContainerElement, DeployedFile, Deployment, FontWeight, ImageElement,
    MarkdownElement, Model, Navigation, NavigationItem, Page, Part, SceneElement, Size,
    SoundElement, SpacerElement, TextAlign, TextElement, Theme, UIElement, VideoElement,
    YoutubeElement,
};
pub use padding::{parse_padding, Padding};

use sml_parser::{ParseError, ParseTree, Parser};

/// A decoded value together with the problems found on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub warnings: Vec<DecodeWarning>,
}

impl<T> Decoded<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// A non-fatal decoding problem. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeWarning {
    #[error("line {line}: unknown element '{name}' inside '{parent}'")]
    UnknownElement {
        parent: String,
        name: String,
        line: usize,
    },

    #[error("line {line}: unknown property '{name}' on '{element}'")]
    UnknownProperty {
        element: String,
        name: String,
        line: usize,
    },

    #[error("line {line}: '{property}' on '{element}' expects {expected}, got {found}")]
    TypeMismatch {
        element: String,
        property: String,
        expected: &'static str,
        found: &'static str,
        line: usize,
    },

    #[error("line {line}: invalid value \"{value}\" for '{property}' on '{element}'")]
    InvalidValue {
        element: String,
        property: String,
        value: String,
        line: usize,
    },

    #[error("line {line}: '{element}' is missing required property '{property}'")]
    MissingProperty {
        element: String,
        property: String,
        line: usize,
    },

    #[error("line {line}: extra top-level element '{name}' is ignored")]
    ExtraRoot { name: String, line: usize },
}

/// Fatal decoding error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Unknown root element '{name}' at line {line}")]
    UnknownRoot { name: String, line: usize },

    #[error("Expected root element '{expected}', found '{found}'")]
    WrongRoot { expected: &'static str, found: String },
}

/// Parse and decode a document of any root type.
pub fn parse_model(source: &str) -> Result<Decoded<Model>, DecodeError> {
    decode(&parse(source)?)
}

pub fn parse_page(source: &str) -> Result<Decoded<Page>, DecodeError> {
    decode_page(&parse(source)?)
}

pub fn parse_app(source: &str) -> Result<Decoded<App>, DecodeError> {
    decode_app(&parse(source)?)
}

pub fn parse_book(source: &str) -> Result<Decoded<Book>, DecodeError> {
    decode_book(&parse(source)?)
}

fn parse(source: &str) -> Result<ParseTree, DecodeError> {
    Ok(Parser::parse(source)?)
}

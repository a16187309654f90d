//! SML Parser
//!
//! Parses `.sml` source into a lossless [`ParseTree`]: elements, properties,
//! whitespace and comments, in source order. Printing the tree gives back
//! the exact input.
//!
//! ```text
//! document   := ignored (element ignored)+
//! element    := ignored identifier ignored '{' content ignored '}'
//! content    := (property | element | ignored)*
//! property   := ignored identifier ignored ':' ignored value
//! value      := float | integer | string
//! ignored    := (whitespace | comment)*
//! ```
//!
//! # Example
//!
//! ```
//! use sml_parser::Parser;
//!
//! let source = "Page {\n  // greeting\n  Text { text: \"Hi\" }\n}\n";
//! let tree = Parser::parse(source).unwrap();
//! assert_eq!(tree.root().unwrap().name, "Page");
//! assert_eq!(tree.to_source(), source);
//! ```

pub mod ast;
pub mod parser;

pub use ast::{Element, ParseTree, ParsedElement, Piece, PieceKind, Property, PropertyValue};
pub use parser::{Parser, MAX_DEPTH};

use sml_lexer::LexerError;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    /// Best-effort byte offset of the problem.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        Self {
            message: e.message,
            offset: e.offset,
            line: e.line,
            column: e.column,
        }
    }
}

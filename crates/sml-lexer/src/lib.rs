//! SML Lexer
//!
//! Tokenizes `.sml` source into a lossless stream of tokens: every character
//! of the input belongs to exactly one token, trivia included. Unterminated
//! strings and block comments run to the end of input and are flagged on
//! the token rather than rejected.
//!
//! # Example
//!
//! ```
//! use sml_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("Page { }");
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(text, "Page { }");
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{is_line_break, Span, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    /// Byte offset of the offending token.
    pub offset: usize,
}

use crate::LexerError;

/// A position in source text. `start`/`end` are byte offsets; `line` and
/// `column` are 1-based, with the column counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// The empty span just past `text`, where `text` starts at this span.
    pub fn after(&self, text: &str) -> Span {
        let mut line = self.line;
        let mut column = self.column;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            if is_line_break(ch, chars.peek().copied()) {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Span::new(self.end, self.end, line, column)
    }
}

/// Whether `ch` ends a line. `\r\n` counts once, on the `\n`, and a lone
/// `\r` is a line break of its own.
pub fn is_line_break(ch: char, next: Option<char>) -> bool {
    ch == '\n' || (ch == '\r' && next != Some('\n'))
}

/// Token classification for SML source.
///
/// Every kind carries its literal text on the owning [`Token`], so the token
/// stream can always be concatenated back into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Names and literals
    Identifier,
    StringLiteral,
    IntegerLiteral,
    FloatLiteral,

    // Punctuation
    LBrace,
    RBrace,
    Colon,

    // Trivia
    Whitespace,
    LineComment,
    BlockComment,

    /// A single character that starts no other token.
    Unknown,
}

impl TokenKind {
    /// Whitespace and comments: interleaved anywhere, never structural.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Human-readable name used in parser diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string",
            TokenKind::IntegerLiteral => "integer",
            TokenKind::FloatLiteral => "float",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Colon => "':'",
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment | TokenKind::BlockComment => "comment",
            TokenKind::Unknown => "unknown character",
        }
    }
}

/// A token produced by the SML lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// The lexer never rejects input; tokens that could not be closed or
    /// recognized report themselves here instead.
    pub fn lex_error(&self) -> Option<LexerError> {
        let message = match self.kind {
            TokenKind::StringLiteral if !is_closed_string(&self.text) => "Unterminated string",
            TokenKind::BlockComment if !is_closed_block_comment(&self.text) => {
                "Unterminated block comment"
            }
            TokenKind::Unknown => {
                return Some(self.error(format!("Unexpected character: '{}'", self.text)));
            }
            _ => return None,
        };
        Some(self.error(message.to_string()))
    }

    /// String content without the surrounding quotes.
    pub fn string_content(&self) -> &str {
        let inner = self.text.strip_prefix('"').unwrap_or(&self.text);
        inner.strip_suffix('"').unwrap_or(inner)
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.span.line,
            column: self.span.column,
            offset: self.span.start,
        }
    }
}

fn is_closed_string(text: &str) -> bool {
    text.len() >= 2 && text.ends_with('"')
}

fn is_closed_block_comment(text: &str) -> bool {
    text.len() >= 4 && text.ends_with("*/")
}

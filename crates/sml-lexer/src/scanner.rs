use crate::token::{is_line_break, Span, Token, TokenKind};
use crate::LexerError;

/// SML source scanner.
///
/// Produces tokens covering the entire input with no gaps. Navigation is
/// index-based over a `Vec<char>` while spans are reported in bytes, so
/// token text can always be sliced straight out of the source.
pub struct Scanner<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    byte_pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            byte_pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source. Never fails: malformed tokens are kept
    /// and report themselves through [`Token::lex_error`].
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens();
        log::trace!(
            "tokenized {} bytes into {} tokens",
            source.len(),
            scanner.tokens.len()
        );
        scanner.tokens
    }

    /// Tokenize the source, failing on the first malformed token.
    pub fn tokenize_strict(source: &str) -> Result<Vec<Token>, LexerError> {
        let tokens = Self::tokenize(source);
        match tokens.iter().find_map(Token::lex_error) {
            Some(err) => Err(err),
            None => Ok(tokens),
        }
    }

    fn scan_tokens(&mut self) {
        while !self.is_at_end() {
            self.scan_token();
        }
    }

    /// Scan the next token. Comment markers are checked before anything
    /// else that could start at the same position, and float literals
    /// before integers.
    fn scan_token(&mut self) {
        let start = self.mark();

        let kind = match self.peek() {
            '/' if self.peek_next() == '/' => self.scan_line_comment(),
            '/' if self.peek_next() == '*' => self.scan_block_comment(),
            ' ' | '\t' | '\r' | '\n' => self.scan_whitespace(),
            '"' => self.scan_string(),
            '0'..='9' => self.scan_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ':' => self.single(TokenKind::Colon),
            _ => self.single(TokenKind::Unknown),
        };

        self.emit(kind, start);
    }

    // --- Scanners ---

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// `//` up to, but not including, the line break.
    fn scan_line_comment(&mut self) -> TokenKind {
        while !self.is_at_end() && self.peek() != '\n' && self.peek() != '\r' {
            self.advance();
        }
        TokenKind::LineComment
    }

    /// `/*` to the nearest `*/`. Unterminated comments run to end of input.
    fn scan_block_comment(&mut self) -> TokenKind {
        self.advance(); // consume `/`
        self.advance(); // consume `*`

        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                break;
            }
            self.advance();
        }
        TokenKind::BlockComment
    }

    fn scan_whitespace(&mut self) -> TokenKind {
        while matches!(self.peek(), ' ' | '\t' | '\r' | '\n') && !self.is_at_end() {
            self.advance();
        }
        TokenKind::Whitespace
    }

    /// `"` up to the next `"`. There are no escapes; line breaks are allowed
    /// inside the literal. Unterminated strings run to end of input.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // consume opening quote

        while !self.is_at_end() && self.peek() != '"' {
            self.advance();
        }

        if !self.is_at_end() {
            self.advance(); // consume closing quote
        }
        TokenKind::StringLiteral
    }

    /// `digits '.' digits` is a float; a dot not followed by a digit ends
    /// the integer in front of it.
    fn scan_number(&mut self) -> TokenKind {
        self.consume_digits();

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume `.`
            self.consume_digits();
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntegerLiteral
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '_') {
            self.advance();
        }
        TokenKind::Identifier
    }

    fn consume_digits(&mut self) {
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }
    }

    // --- Helpers ---

    fn mark(&self) -> (usize, usize, usize) {
        (self.byte_pos, self.line, self.column)
    }

    fn emit(&mut self, kind: TokenKind, (start, line, column): (usize, usize, usize)) {
        let span = Span::new(start, self.byte_pos, line, column);
        let text = &self.source[start..self.byte_pos];
        self.tokens.push(Token::new(kind, text, span));
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        let Some(&ch) = self.chars.get(self.pos) else {
            return;
        };
        self.pos += 1;
        self.byte_pos += ch.len_utf8();

        if is_line_break(ch, self.chars.get(self.pos).copied()) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

//! Document parser for SML.
//!
//! Recursive descent over the token stream from `sml-lexer`. Trivia is
//! collected into the tree wherever the grammar allows it instead of being
//! skipped, which is what keeps the tree lossless.
//!
//! Inside an element body an identifier is ambiguous until the parser has
//! looked past the trivia that follows it: `{` makes it a nested element,
//! `:` makes it a property. The trivia is kept either way, as the element
//! head or as the space before the colon.

use crate::ast::{Element, ParseTree, ParsedElement, Property, PropertyValue};
use crate::ParseError;
use sml_lexer::{Scanner, Span, Token, TokenKind};

/// Deepest element nesting accepted by [`Parser::parse`].
pub const MAX_DEPTH: usize = 256;

/// SML document parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Elements currently open.
    depth: usize,
    /// Position just past the last token, for errors at end of input.
    eof: Span,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = end_of_input(&tokens);
        Self {
            tokens,
            pos: 0,
            depth: 0,
            eof,
        }
    }

    /// Parse source code into a lossless tree.
    pub fn parse(source: &str) -> Result<ParseTree, ParseError> {
        let tokens = Scanner::tokenize_strict(source)?;
        let mut parser = Parser::new(tokens);
        let tree = parser.parse_document()?;
        log::trace!("parsed {} top-level nodes", tree.items.len());
        Ok(tree)
    }

    /// Build a flat tree straight from the tokens, for source that does not
    /// parse. Identifiers, comments and whitespace keep their roles;
    /// everything else becomes [`ParsedElement::Raw`]. Never fails, and the
    /// tree still prints back to the source.
    pub fn recover(source: &str) -> ParseTree {
        let items = Scanner::tokenize(source)
            .into_iter()
            .map(|token| match token.kind {
                kind if kind.is_trivia() => trivia_node(kind, token.text),
                TokenKind::Identifier => ParsedElement::Identifier(token.text),
                _ => ParsedElement::Raw(token.text),
            })
            .collect();
        ParseTree::new(items)
    }

    /// Parse a full document: one or more elements, with trivia around them.
    fn parse_document(&mut self) -> Result<ParseTree, ParseError> {
        let mut items = Vec::new();
        let mut has_element = false;

        loop {
            self.collect_trivia(&mut items);

            match self.peek_kind() {
                None => break,
                Some(TokenKind::Identifier) => {
                    let name = self.bump();
                    let head = self.take_trivia();
                    match self.peek_kind() {
                        Some(TokenKind::LBrace) => {
                            items.push(self.parse_element(name, head)?);
                            has_element = true;
                        }
                        Some(TokenKind::Colon) => {
                            return Err(self.error_at(
                                name.span,
                                format!("Property '{}' must be inside an element", name.text),
                            ));
                        }
                        _ => return Err(self.unexpected(&format!("'{{' after '{}'", name.text))),
                    }
                }
                Some(_) => return Err(self.unexpected("element name")),
            }
        }

        if !has_element {
            return Err(self.error_at(self.eof, "Expected at least one element".into()));
        }

        Ok(ParseTree::new(items))
    }

    // =========================================================================
    // Elements and properties
    // =========================================================================

    /// Parse an element body. The name and head trivia are already consumed
    /// and the current token is `{`.
    fn parse_element(&mut self, name: Token, head: Vec<ParsedElement>) -> Result<ParsedElement, ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(self.error_at(name.span, "Nesting too deep".into()));
        }
        self.depth += 1;
        let element = self.parse_element_body(name, head);
        self.depth -= 1;
        element
    }

    fn parse_element_body(&mut self, name: Token, head: Vec<ParsedElement>) -> Result<ParsedElement, ParseError> {
        self.advance(); // consume `{`

        let mut children = Vec::new();

        loop {
            self.collect_trivia(&mut children);

            match self.peek_kind() {
                Some(TokenKind::RBrace) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Identifier) => {
                    let child = self.bump();
                    let trivia = self.take_trivia();
                    match self.peek_kind() {
                        Some(TokenKind::LBrace) => children.push(self.parse_element(child, trivia)?),
                        Some(TokenKind::Colon) => children.push(self.parse_property(child, trivia)?),
                        _ => {
                            return Err(self.unexpected(&format!(
                                "'{{' or ':' after '{}'",
                                child.text
                            )));
                        }
                    }
                }
                None => {
                    return Err(self.error_at(
                        name.span,
                        format!("Missing '}}' to close element '{}'", name.text),
                    ));
                }
                Some(_) => {
                    return Err(self.unexpected(&format!(
                        "property, element or '}}' in '{}'",
                        name.text
                    )));
                }
            }
        }

        Ok(ParsedElement::Element(Element {
            name: name.text,
            head,
            children,
            span: name.span,
        }))
    }

    /// Parse a property value. The name and the trivia before the colon are
    /// already consumed and the current token is `:`.
    fn parse_property(
        &mut self,
        name: Token,
        before_colon: Vec<ParsedElement>,
    ) -> Result<ParsedElement, ParseError> {
        self.advance(); // consume `:`
        let after_colon = self.take_trivia();

        let expected = format!("value for '{}'", name.text);
        let Some(token) = self.peek().cloned() else {
            return Err(self.unexpected(&expected));
        };

        let value = match token.kind {
            TokenKind::StringLiteral => PropertyValue::String(token.string_content().to_string()),
            TokenKind::IntegerLiteral => token.text.parse().map(PropertyValue::Int).map_err(|_| {
                self.error_at(token.span, format!("Integer out of range: {}", token.text))
            })?,
            TokenKind::FloatLiteral => token.text.parse().map(PropertyValue::Float).map_err(|_| {
                self.error_at(token.span, format!("Invalid float: {}", token.text))
            })?,
            _ => return Err(self.unexpected(&expected)),
        };
        self.advance();

        Ok(ParsedElement::Property(Property {
            name: name.text,
            value,
            raw_value: token.text,
            before_colon,
            after_colon,
            span: name.span,
        }))
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn collect_trivia(&mut self, into: &mut Vec<ParsedElement>) {
        while let Some(token) = self.peek().filter(|t| t.kind.is_trivia()) {
            into.push(trivia_node(token.kind, token.text.clone()));
            self.advance();
        }
    }

    fn take_trivia(&mut self) -> Vec<ParsedElement> {
        let mut trivia = Vec::new();
        self.collect_trivia(&mut trivia);
        trivia
    }

    // =========================================================================
    // Token navigation helpers
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Consume the current token and return it. Only called after a
    /// successful `peek_kind`.
    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.advance();
        token
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => self.error_at(
                token.span,
                format!("Expected {expected}, got {}", token.kind.describe()),
            ),
            None => self.error_at(self.eof, format!("Expected {expected}, got end of input")),
        }
    }

    fn error_at(&self, span: Span, message: String) -> ParseError {
        ParseError {
            message,
            offset: span.start,
            line: span.line,
            column: span.column,
        }
    }
}

fn trivia_node(kind: TokenKind, text: String) -> ParsedElement {
    if kind.is_comment() {
        ParsedElement::Comment(text)
    } else {
        ParsedElement::Whitespace(text)
    }
}

/// The empty span just past the last token.
fn end_of_input(tokens: &[Token]) -> Span {
    match tokens.last() {
        Some(last) => last.span.after(&last.text),
        None => Span::new(0, 0, 1, 1),
    }
}

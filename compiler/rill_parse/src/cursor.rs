//! Token cursor for navigating the lexer's output.

use rill_ir::{Span, Token, TokenKind, TokenList};

use crate::{ParseError, ParseErrorKind};

/// Cursor over a token stream.
///
/// The stream always ends in `Eof` (a `TokenList` invariant), so the cursor
/// clamps to the last token instead of running off the end.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[idx]
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span (`DUMMY` at the stream start).
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Check if at the end of the token stream.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check the current token against a payload-free kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Advance past the current token, returning it.
    pub fn advance(&mut self) -> Token {
        let token = *self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches, returning whether it did.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a specific token, or fail with `Expected X but found Y`.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                ParseErrorKind::Expected {
                    expected: kind.as_str(),
                    found: self.current_kind().as_str(),
                },
                self.current_span(),
            ))
        }
    }

    /// Consume any run of `Newline` tokens (expression delimiters).
    pub fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline) {}
    }
}

#[cfg(test)]
mod tests {
    use rill_ir::StringInterner;

    use super::*;

    fn tokens(source: &str) -> TokenList {
        let interner = StringInterner::new();
        match rill_lexer::lex(source, &interner) {
            Ok(t) => t,
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn eat_and_expect() {
        let list = tokens("( )\n");
        let mut cursor = Cursor::new(&list);
        assert!(cursor.eat(TokenKind::LParen));
        assert!(!cursor.eat(TokenKind::LParen));
        assert!(cursor.expect(TokenKind::RParen).is_ok());
        let err = match cursor.expect(TokenKind::RParen) {
            Err(e) => e,
            Ok(t) => panic!("unexpected token {t:?}"),
        };
        assert_eq!(
            err.kind,
            ParseErrorKind::Expected {
                expected: ")",
                found: "newline"
            }
        );
    }

    #[test]
    fn cursor_clamps_at_eof() {
        let list = tokens("");
        let mut cursor = Cursor::new(&list);
        assert!(cursor.at_eof());
        cursor.advance();
        cursor.advance();
        assert!(cursor.at_eof());
    }

    #[test]
    fn skip_newlines_stops_at_other_tokens() {
        let list = tokens("\n\n\nx\n");
        let mut cursor = Cursor::new(&list);
        cursor.skip_newlines();
        assert!(matches!(cursor.current_kind(), TokenKind::Ident(_)));
    }
}

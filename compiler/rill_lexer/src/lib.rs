//! Hand-written lexer for rill.
//!
//! Tokenizes the whole source eagerly into a [`TokenList`]. Newlines delimit
//! statements and the leading whitespace of a logical line drives the
//! `Indent`/`Dedent` structure, tracked as a stack of indentation prefix
//! strings initialized to `[""]`. Inside an unbalanced `(`/`[` group,
//! physical newlines are ordinary whitespace.
//!
//! `#` starts a line comment. Comment-only and blank lines never affect
//! indentation: the indent-measuring loop skips them entirely.

mod cursor;
mod escape;
mod lex_error;

pub use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};

use rill_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use tracing::trace;

/// Tokenize `source`, interning identifier and string text into `interner`.
pub fn lex(source: &str, interner: &StringInterner) -> Result<TokenList, LexError> {
    let mut lexer = Lexer::new(source, interner);
    lexer.run()?;
    trace!(tokens = lexer.tokens.len(), "lexed source");
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    interner: &'a StringInterner,
    tokens: TokenList,
    /// Nesting depth of open `(` / `[` groups. Newlines are insignificant
    /// while this is non-zero.
    depth: u32,
    /// Stack of indentation prefixes, innermost last. Never empty; the
    /// bottom entry is always the empty prefix.
    indents: Vec<&'a str>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            interner,
            tokens: TokenList::new(),
            depth: 0,
            indents: vec![""],
        }
    }

    fn run(&mut self) -> Result<(), LexError> {
        loop {
            self.skip_trivia();
            if self.cursor.is_eof() {
                break;
            }
            let start = self.cursor.pos();
            match self.cursor.current() {
                b'\n' => {
                    self.cursor.advance();
                    self.push(TokenKind::Newline, Span::new(start, start + 1));
                    self.measure_indent()?;
                }
                b'0'..=b'9' => self.number(start)?,
                b'.' if self.cursor.peek().is_ascii_digit() => self.number(start)?,
                b'r' if is_quote(self.cursor.peek()) => self.string(start)?,
                b'\'' | b'"' => self.string(start)?,
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.word(start),
                _ => self.symbol(start)?,
            }
        }

        // Close any open indentation levels before the end-of-input token.
        let end = self.cursor.pos();
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, Span::point(end));
        }
        self.push(TokenKind::Eof, Span::point(end));
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }

    /// Skip horizontal whitespace and comments. Newlines are skipped too
    /// while inside an unbalanced bracket group.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                b'#' => self.cursor.eat_until_newline_or_eof(),
                b' ' | b'\t' | b'\r' => self.cursor.advance(),
                b'\n' if self.depth > 0 => self.cursor.advance(),
                _ => break,
            }
        }
    }

    /// Measure the leading whitespace of the next code line and emit
    /// `Indent`/`Dedent` tokens against the prefix stack. Blank and
    /// comment-only lines are consumed without affecting indentation.
    fn measure_indent(&mut self) -> Result<(), LexError> {
        let mut line_start;
        loop {
            line_start = self.cursor.pos();
            self.cursor.eat_horizontal_ws();
            if self.cursor.current() == b'#' {
                self.cursor.eat_until_newline_or_eof();
            }
            if self.cursor.is_eof() {
                // Trailing dedents are flushed by `run`.
                return Ok(());
            }
            if self.cursor.current() != b'\n' {
                break;
            }
            self.cursor.advance();
        }

        let indent = self.cursor.slice(line_start, self.cursor.pos());
        let span = Span::new(line_start, self.cursor.pos());
        if indent == self.top() {
            // Same level, nothing to do.
        } else if indent.starts_with(self.top()) {
            self.indents.push(indent);
            self.push(TokenKind::Indent, span);
        } else if self.indents.contains(&indent) {
            while self.top() != indent {
                self.indents.pop();
                self.push(TokenKind::Dedent, span);
            }
        } else {
            return Err(LexError::new(
                LexErrorKind::InvalidIndent {
                    indent: indent.to_string(),
                },
                span,
            ));
        }
        Ok(())
    }

    fn top(&self) -> &'a str {
        self.indents.last().copied().unwrap_or("")
    }

    /// A run of digits, optionally followed by `.` and more digits. No
    /// exponent notation and no sign; negation is a parser-level operator.
    fn number(&mut self, start: u32) -> Result<(), LexError> {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }
        let text = self.cursor.slice_from(start);
        let span = Span::new(start, self.cursor.pos());

        // `.5` and `12.` are legal literal forms; pad them for parsing.
        let mut normalized = String::with_capacity(text.len() + 1);
        if text.starts_with('.') {
            normalized.push('0');
        }
        normalized.push_str(text);
        if normalized.ends_with('.') {
            normalized.push('0');
        }
        match normalized.parse::<f64>() {
            Ok(value) => {
                self.push(TokenKind::Number(value), span);
                Ok(())
            }
            Err(_) => Err(LexError::new(
                LexErrorKind::InvalidNumber {
                    text: text.to_string(),
                },
                span,
            )),
        }
    }

    /// String literal: `'...'`, `"..."`, their triple forms, and an optional
    /// `r` raw prefix suppressing escape processing. Escape tracking is
    /// needed even while scanning, so an escaped quote does not terminate
    /// the literal early.
    fn string(&mut self, start: u32) -> Result<(), LexError> {
        let mut raw = false;
        if self.cursor.current() == b'r' {
            self.cursor.advance();
            raw = true;
        }
        let quote_byte = self.cursor.current();
        let quote_len: u32 =
            if self.cursor.peek() == quote_byte && self.cursor.peek2() == quote_byte {
                3
            } else {
                1
            };
        self.cursor.advance_n(quote_len);
        let content_start = self.cursor.pos();

        while !self.at_quote(quote_byte, quote_len) {
            if self.cursor.is_eof() {
                let quote = String::from_utf8(vec![quote_byte; quote_len as usize])
                    .unwrap_or_default();
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString { quote },
                    Span::new(start, self.cursor.pos()),
                ));
            }
            if !raw && self.cursor.current() == b'\\' {
                self.cursor.advance();
                if !self.cursor.is_eof() {
                    self.cursor.advance();
                }
            } else {
                self.cursor.advance_char();
            }
        }

        let content = self.cursor.slice(content_start, self.cursor.pos());
        self.cursor.advance_n(quote_len);
        let cooked = if raw {
            content.to_string()
        } else {
            escape::unescape(content)
        };
        let name = self.interner.intern(&cooked);
        self.push(TokenKind::Str(name), Span::new(start, self.cursor.pos()));
        Ok(())
    }

    fn at_quote(&self, quote_byte: u8, quote_len: u32) -> bool {
        if self.cursor.current() != quote_byte {
            return false;
        }
        quote_len == 1 || (self.cursor.peek() == quote_byte && self.cursor.peek2() == quote_byte)
    }

    /// A maximal alphanumeric/underscore run: keyword or identifier.
    fn word(&mut self, start: u32) {
        self.cursor
            .eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let text = self.cursor.slice_from(start);
        let span = Span::new(start, self.cursor.pos());
        match TokenKind::keyword(text) {
            Some(kind) => self.push(kind, span),
            None => {
                let name = self.interner.intern(text);
                self.push(TokenKind::Ident(name), span);
            }
        }
    }

    /// Operators and punctuation, longest match first.
    fn symbol(&mut self, start: u32) -> Result<(), LexError> {
        let kind = match self.cursor.current() {
            b'(' => {
                self.depth += 1;
                TokenKind::LParen
            }
            b')' => {
                self.depth = self.depth.saturating_sub(1);
                TokenKind::RParen
            }
            b'[' => {
                self.depth += 1;
                TokenKind::LBracket
            }
            b']' => {
                self.depth = self.depth.saturating_sub(1);
                TokenKind::RBracket
            }
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'\\' => TokenKind::Backslash,
            b'.' => {
                if self.cursor.peek() == b'.' && self.cursor.peek2() == b'.' {
                    self.cursor.advance_n(2);
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            b'=' => {
                if self.cursor.peek() == b'=' {
                    self.cursor.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            b'<' => {
                if self.cursor.peek() == b'=' {
                    self.cursor.advance();
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if self.cursor.peek() == b'=' {
                    self.cursor.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            b'!' if self.cursor.peek() == b'=' => {
                self.cursor.advance();
                TokenKind::NotEq
            }
            _ => return Err(self.unrecognized(start)),
        };
        self.cursor.advance();
        self.push(kind, Span::new(start, self.cursor.pos()));
        Ok(())
    }

    /// Consume the offending run up to the next whitespace and report it.
    fn unrecognized(&mut self, start: u32) -> LexError {
        while !self.cursor.is_eof() && !self.cursor.current().is_ascii_whitespace() {
            self.cursor.advance_char();
        }
        LexError::new(
            LexErrorKind::UnrecognizedToken {
                text: self.cursor.slice_from(start).to_string(),
            },
            Span::new(start, self.cursor.pos()),
        )
    }
}

fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

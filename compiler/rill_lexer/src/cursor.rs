//! Byte cursor over the source text.
//!
//! The cursor advances byte-by-byte; `current()` returns `0x00` at EOF, so
//! scanning loops terminate naturally without explicit bounds checks at every
//! call site. Slices are only taken at token boundaries, which the scanner
//! keeps on UTF-8 character boundaries.

/// Byte cursor with two bytes of lookahead.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    /// Returns the byte at the current position, or `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Returns the byte one position ahead, or `0x00` past EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// Returns the byte two positions ahead, or `0x00` past EOF.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        self.bytes.get(pos as usize).copied().unwrap_or(0)
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = match self.current() {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        self.advance_n(width);
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.bytes.len()
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Extract a source substring. `start..end` must lie on character
    /// boundaries, which holds for all token boundaries the scanner produces.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        &self.src[start as usize..end as usize]
    }

    /// Extract a source substring from `start` to the current position.
    #[inline]
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    /// `pred(0)` must return `false`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance past horizontal whitespace (space, tab, carriage return).
    #[inline]
    pub fn eat_horizontal_ws(&mut self) {
        self.eat_while(|b| b == b' ' || b == b'\t' || b == b'\r');
    }

    /// Advance to the next `\n` byte or EOF.
    ///
    /// Used to skip comment bodies.
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.bytes[self.pos as usize..];
        match memchr::memchr(b'\n', remaining) {
            Some(offset) => self.pos += u32::try_from(offset).unwrap_or(0),
            None => self.pos = u32::try_from(self.bytes.len()).unwrap_or(u32::MAX),
        }
    }
}

//! Byte cursor over the input buffer with line tracking.
//!
//! All structural characters of the dialect are ASCII, so the cursor walks
//! bytes and only ever stops on ASCII boundaries. Slices it hands out are
//! therefore always valid `&str` slices of the source.

/// Cursor position: byte offset plus the 1-based line it falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mark {
    pos: usize,
    line: usize,
}

pub(crate) struct Scanner<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    line: usize,
}

impl<'src> Scanner<'src> {
    pub(crate) fn new(src: &'src str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    #[inline]
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// The full character at the cursor, for error reporting.
    pub(crate) fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Advance past one byte, counting it if it is a newline.
    pub(crate) fn bump(&mut self) {
        if let Some(b) = self.peek() {
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    /// Advance past one whole character (used when skipping unknown input).
    pub(crate) fn bump_char(&mut self) {
        match self.peek_char() {
            Some('\n') => {
                self.line += 1;
                self.pos += 1;
            }
            Some(c) => self.pos += c.len_utf8(),
            None => {}
        }
    }

    /// Consume `byte` if it is next.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
        }
    }

    pub(crate) fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.line = mark.line;
    }

    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'src str {
        &self.src[start..end]
    }

    /// Skip ASCII whitespace only.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Skip whitespace and `--` line comments. A `--[[` opener is not special:
    /// it comments out the rest of its own line only.
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek() == Some(b'-') && self.peek_at(1) == Some(b'-') {
                while let Some(b) = self.peek() {
                    if b == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Consume an identifier (`[A-Za-z_][A-Za-z0-9_]*`) and return it.
    pub(crate) fn eat_identifier(&mut self) -> Option<&'src str> {
        let start = self.pos;
        match self.peek() {
            Some(b) if is_ident_start(b) => self.pos += 1,
            _ => return None,
        }
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        Some(&self.src[start..self.pos])
    }

    /// Consume one or more ASCII digits. Returns `false` if none were present.
    pub(crate) fn eat_digits(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Consume `word` if it is next and not followed by an identifier character.
    pub(crate) fn eat_keyword(&mut self, word: &str) -> bool {
        let end = self.pos + word.len();
        if self.bytes.get(self.pos..end) == Some(word.as_bytes())
            && !self.bytes.get(end).copied().is_some_and(is_ident_continue)
        {
            self.pos = end;
            true
        } else {
            false
        }
    }

    /// Try to consume `Identifier <whitespace> =` (but not `==`). On failure the
    /// cursor is left where it was.
    pub(crate) fn eat_assignment_head(&mut self) -> Option<&'src str> {
        self.eat_head(false)
    }

    /// Like [`Scanner::eat_assignment_head`], but comments may also sit between
    /// the identifier and the `=`, as they may after a bracket key.
    pub(crate) fn eat_field_head(&mut self) -> Option<&'src str> {
        self.eat_head(true)
    }

    fn eat_head(&mut self, allow_comments: bool) -> Option<&'src str> {
        let mark = self.mark();
        let result = self.eat_identifier().and_then(|name| {
            if allow_comments {
                self.skip_trivia();
            } else {
                self.skip_whitespace();
            }
            if self.peek() == Some(b'=') && self.peek_at(1) != Some(b'=') {
                self.bump();
                Some(name)
            } else {
                None
            }
        });
        if result.is_none() {
            self.reset(mark);
        }
        result
    }
}

#[inline]
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
pub(crate) fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

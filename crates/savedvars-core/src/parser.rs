//! Recursive-descent parser for the SavedVariables dialect.
//!
//! The parser walks one immutable input buffer with a single cursor and builds
//! a [`Root`] of top-level bindings. It understands data literals only:
//!
//! - Tables with bracket keys (`[expr] = v`), identifier keys (`name = v`) and
//!   positional entries, optionally separated by `,`
//! - Single- or double-quoted strings with backslash escapes
//! - Numbers (`-?digits(.digits)?([eE][+-]?digits)?`), `true`, `false`, `nil`
//! - Bare identifiers, read as strings
//! - `--` line comments anywhere whitespace is allowed
//!
//! # Key design decisions
//!
//! - **Lenient top level**: between assignments, any byte that does not start
//!   `Identifier =` is skipped, so stray statements such as `local x` or a
//!   `return` do not fail the file. Inside a value every error is fatal.
//! - **Auto-index**: positional entries are numbered from 1 by a per-table
//!   counter that explicit keys never touch. `{[1] = "a", "b"}` therefore
//!   stores `"b"` at key 1, replacing `"a"` in place.
//! - **Depth ceiling**: every nested table adds one level; past
//!   [`ParseOptions::max_depth`] the parse fails instead of overflowing the stack.

use crate::error::{Result, SavedVarsError};
use crate::scanner::Scanner;
use crate::types::{Key, Number, Root, Table, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Default ceiling on table nesting.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Tunables for a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested tables before the parse is rejected.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse SavedVariables text with default options.
///
/// # Example
///
/// ```
/// use savedvars_core::parse_str;
///
/// let root = parse_str("MyAddonDB = { enabled = true, [\"scale\"] = 1.5 }").unwrap();
/// assert_eq!(root.get("MyAddonDB.enabled").and_then(|v| v.as_bool()), Some(true));
/// assert_eq!(root.get("MyAddonDB.scale").and_then(|v| v.as_f64()), Some(1.5));
/// ```
pub fn parse_str(input: &str) -> Result<Root> {
    Parser::new(input).parse()
}

/// Parse SavedVariables text with explicit options.
pub fn parse_str_with(input: &str, options: ParseOptions) -> Result<Root> {
    Parser::new(input).with_options(options).parse()
}

/// Read and parse a SavedVariables file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Root> {
    parse_file_with(path, ParseOptions::default())
}

/// Read and parse a SavedVariables file with explicit options.
///
/// The whole file is read before parsing starts. A missing file is reported
/// as [`SavedVarsError::FileNotFound`], any other I/O failure as
/// [`SavedVarsError::Read`]. Bytes that are not valid UTF-8 are replaced with
/// U+FFFD rather than failing the read.
pub fn parse_file_with(path: impl AsRef<Path>, options: ParseOptions) -> Result<Root> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            SavedVarsError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SavedVarsError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), "input is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    debug!(path = %path.display(), bytes = text.len(), "read SavedVariables file");
    parse_str_with(&text, options)
}

/// A single-use parser over one input buffer.
///
/// [`Parser::parse`] consumes the parser, so cursor state never outlives the call.
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    options: ParseOptions,
}

impl<'src> Parser<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            scanner: Scanner::new(input),
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the top-level driver to the end of input.
    pub fn parse(mut self) -> Result<Root> {
        let mut root = Root::new();
        let mut skipped = 0usize;

        loop {
            self.scanner.skip_trivia();
            if self.scanner.is_eof() {
                break;
            }

            let Some(name) = self.scanner.eat_assignment_head() else {
                self.scanner.bump_char();
                skipped += 1;
                continue;
            };

            if skipped > 0 {
                trace!(line = self.scanner.line(), skipped, "skipped unrecognized input");
                skipped = 0;
            }

            let line = self.scanner.line();
            let value = self.parse_value(0)?;
            debug!(name, line, kind = value.type_name(), "bound top-level variable");
            root.bind(name, value);
        }

        if skipped > 0 {
            trace!(skipped, "skipped unrecognized trailing input");
        }
        debug!(variables = root.len(), "parsed SavedVariables");
        Ok(root)
    }

    /// Value dispatcher. `depth` is the number of enclosing tables.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        self.scanner.skip_trivia();
        match self.scanner.peek() {
            Some(b'{') => self.parse_table(depth + 1).map(Value::Table),
            Some(quote @ (b'"' | b'\'')) => self.parse_string(quote).map(Value::String),
            _ => self.parse_literal(),
        }
    }

    /// Table parser. The cursor is on the opening `{`.
    fn parse_table(&mut self, depth: usize) -> Result<Table> {
        let open_line = self.scanner.line();
        if depth > self.options.max_depth {
            return Err(SavedVarsError::NestingTooDeep {
                line: open_line,
                limit: self.options.max_depth,
            });
        }
        self.scanner.bump();

        let mut table = Table::new();
        let mut auto_index: i64 = 1;

        loop {
            self.scanner.skip_trivia();
            match self.scanner.peek() {
                None => return Err(SavedVarsError::UnterminatedTable { line: open_line }),
                Some(b'}') => {
                    self.scanner.bump();
                    return Ok(table);
                }
                _ => {}
            }

            let (key, value) = if self.scanner.peek() == Some(b'[') {
                self.parse_bracket_entry(depth)?
            } else if let Some(name) = self.scanner.eat_field_head() {
                (Key::String(name.to_string()), self.parse_value(depth)?)
            } else {
                let value = self.parse_value(depth)?;
                let key = Key::Integer(auto_index);
                auto_index += 1;
                (key, value)
            };

            if let Some(previous) = table.insert(key, value) {
                trace!(
                    line = self.scanner.line(),
                    replaced = previous.type_name(),
                    "duplicate table key"
                );
            }

            self.scanner.skip_trivia();
            self.scanner.eat(b',');
        }
    }

    /// `[key] = value`. The cursor is on the `[`.
    fn parse_bracket_entry(&mut self, depth: usize) -> Result<(Key, Value)> {
        self.scanner.bump();
        let key = Key::from_value(self.parse_value(depth)?);

        self.scanner.skip_trivia();
        if !self.scanner.eat(b']') {
            return Err(self.malformed_bracket_key("expected ']' after key"));
        }
        self.scanner.skip_trivia();
        if !self.scanner.eat(b'=') {
            return Err(self.malformed_bracket_key("expected '=' after ']'"));
        }

        let value = self.parse_value(depth)?;
        Ok((key, value))
    }

    fn malformed_bracket_key(&self, message: &str) -> SavedVarsError {
        SavedVarsError::MalformedBracketKey {
            line: self.scanner.line(),
            message: message.to_string(),
        }
    }

    /// String parser. The cursor is on the opening quote, and only the same
    /// quote character closes the string.
    fn parse_string(&mut self, quote: u8) -> Result<String> {
        let start_line = self.scanner.line();
        self.scanner.bump();

        let mut out = String::new();
        let mut run_start = self.scanner.offset();

        loop {
            match self.scanner.peek() {
                None => return Err(SavedVarsError::UnterminatedString { line: start_line }),
                Some(b) if b == quote => {
                    out.push_str(self.scanner.slice(run_start, self.scanner.offset()));
                    self.scanner.bump();
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(self.scanner.slice(run_start, self.scanner.offset()));
                    self.scanner.bump();
                    match self.scanner.peek_char() {
                        None => {
                            return Err(SavedVarsError::UnterminatedString { line: start_line })
                        }
                        Some('n') => out.push('\n'),
                        Some('t') => out.push('\t'),
                        Some('r') => out.push('\r'),
                        // `\\`, `\"`, `\'` and unknown escapes all keep the payload.
                        Some(c) => out.push(c),
                    }
                    self.scanner.bump_char();
                    run_start = self.scanner.offset();
                }
                Some(_) => self.scanner.bump(),
            }
        }
    }

    /// Literal parser: number, keyword, or bare identifier, in that order.
    fn parse_literal(&mut self) -> Result<Value> {
        if let Some(number) = self.eat_number() {
            return Ok(Value::Number(number));
        }
        if self.scanner.eat_keyword("true") {
            return Ok(Value::Boolean(true));
        }
        if self.scanner.eat_keyword("false") {
            return Ok(Value::Boolean(false));
        }
        if self.scanner.eat_keyword("nil") {
            return Ok(Value::Nil);
        }
        if let Some(ident) = self.scanner.eat_identifier() {
            return Ok(Value::String(ident.to_string()));
        }
        Err(SavedVarsError::UnexpectedCharacter {
            line: self.scanner.line(),
            found: self.scanner.peek_char(),
        })
    }

    /// Match `-?digits(.digits)?([eE][+-]?digits)?`. Optional parts that are
    /// only partially present are left unconsumed. On no match the cursor is
    /// left where it was.
    fn eat_number(&mut self) -> Option<Number> {
        let start = self.scanner.mark();
        let start_offset = self.scanner.offset();

        self.scanner.eat(b'-');
        if !self.scanner.eat_digits() {
            self.scanner.reset(start);
            return None;
        }

        if self.scanner.peek() == Some(b'.')
            && self.scanner.peek_at(1).is_some_and(|b| b.is_ascii_digit())
        {
            self.scanner.bump();
            self.scanner.eat_digits();
        }

        if matches!(self.scanner.peek(), Some(b'e' | b'E')) {
            let before_exponent = self.scanner.mark();
            self.scanner.bump();
            if matches!(self.scanner.peek(), Some(b'+' | b'-')) {
                self.scanner.bump();
            }
            if !self.scanner.eat_digits() {
                self.scanner.reset(before_exponent);
            }
        }

        let text = self.scanner.slice(start_offset, self.scanner.offset());
        Number::from_literal(text)
    }
}

//! Value tree produced by the parser.
//!
//! The tree mirrors the five data-literal forms of the SavedVariables dialect.
//! Tables keep their entries in source order as `Vec<(Key, Value)>` and carry a
//! side index for key lookup, so both ordered iteration and lookup stay cheap on
//! the multi-thousand-entry tables addons tend to persist.

use std::collections::HashMap;
use std::fmt;

/// A parsed SavedVariables value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(Number),
    String(String),
    Table(Table),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The numeric magnitude, for integral and fractional literals alike.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// The value as an integer, only when the source literal was integral.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Lua-style type name, used in diagnostics and summaries.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Table(_) => "table",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}

/// A numeric literal: the parsed magnitude plus the text it was written as.
///
/// Keeping the text lets consumers reproduce the literal exactly, and tells
/// integral literals (`42`) apart from fractional or exponential ones (`42.0`, `4.2e1`).
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    value: f64,
    text: String,
}

impl Number {
    /// Build a number from literal text already matched by the number grammar.
    pub(crate) fn from_literal(text: &str) -> Option<Self> {
        let value = text.parse::<f64>().ok()?;
        Some(Self {
            value,
            text: text.to_string(),
        })
    }

    /// Build a fractional number. Returns `None` for NaN and infinities, which
    /// have no literal form in the dialect.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self {
            value,
            text: format!("{value:?}"),
        })
    }

    pub fn as_f64(&self) -> f64 {
        self.value
    }

    /// Returns `true` if the literal had no fractional part and no exponent.
    pub fn is_integer(&self) -> bool {
        !self.text.contains(['.', 'e', 'E'])
    }

    /// The integer value of an integral literal that fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.text.parse().ok()
        } else {
            None
        }
    }

    /// The literal exactly as it appeared in the source.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self {
            value: n as f64,
            text: n.to_string(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A table key.
///
/// Real input only produces integer and string keys. A bracket key whose
/// expression is a boolean, nil, a non-integral number, or a table is still
/// accepted and kept as `Other`, holding the compact SavedVariables rendering
/// of that expression (e.g. `true`, `1.5`, `{[1] = 2}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Integer(i64),
    String(String),
    Other(String),
}

impl Key {
    /// Classify a parsed bracket-key expression.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Key::String(s),
            Value::Number(ref n) => match n.as_i64() {
                Some(i) => Key::Integer(i),
                None => Key::Other(n.as_str().to_string()),
            },
            other => Key::Other(crate::writer::render_inline(&other)),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Key::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Integer(i) => write!(f, "{i}"),
            Key::String(s) | Key::Other(s) => f.write_str(s),
        }
    }
}

/// An ordered table of `(Key, Value)` entries.
///
/// Inserting a key that already exists replaces the value in place: the entry
/// keeps the position of its first occurrence.
#[derive(Clone, Default)]
pub struct Table {
    entries: Vec<(Key, Value)>,
    index: HashMap<Key, usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the value it replaced if the key was present.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.get(&Key::String(key.to_string()))
    }

    pub fn get_index(&self, index: i64) -> Option<&Value> {
        self.get(&Key::Integer(index))
    }

    /// Look up one dot-path segment: a string key with the same text, or
    /// failing that an integer key when the segment parses as one.
    pub fn get_segment(&self, segment: &str) -> Option<&Value> {
        self.get_str(segment).or_else(|| {
            segment
                .parse::<i64>()
                .ok()
                .and_then(|i| self.get_index(i))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns `true` if the keys are exactly the integers `1..=len`, in any
    /// order. Such tables are treated as arrays by downstream consumers. An
    /// empty table is not a sequence.
    pub fn is_sequence(&self) -> bool {
        let len = self.entries.len() as i64;
        len > 0
            && self
                .entries
                .iter()
                .all(|(k, _)| matches!(k, Key::Integer(i) if (1..=len).contains(i)))
    }

    /// Values of a sequence in index order. Yields nothing useful for
    /// non-sequences; check `is_sequence` first.
    pub fn sequence_values(&self) -> impl Iterator<Item = &Value> {
        (1..=self.entries.len() as i64).filter_map(|i| self.get_index(i))
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(Key, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

/// The top-level bindings of one SavedVariables file, in first-declaration order.
///
/// Re-binding a name replaces its value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Root {
    vars: Table,
}

impl Root {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a top-level name, returning the value it replaced.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.vars.insert(Key::String(name.into()), value)
    }

    /// The raw binding for `name`. Unlike [`Root::get`], an explicit `nil`
    /// binding is returned as `Some(&Value::Nil)`.
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.vars.get_str(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars
            .iter()
            .filter_map(|(k, v)| k.as_str().map(|name| (name, v)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }
}

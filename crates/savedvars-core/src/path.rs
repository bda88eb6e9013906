//! Read-only dot-path lookup over a parsed tree.
//!
//! A path such as `"MyAddonDB.profiles.Default.1"` names a top-level binding
//! followed by one table key per segment. A segment matches a string key with
//! the same text, or an integer key when the segment parses as that integer.
//!
//! Lookups report an explicit `nil` exactly like a missing key, so
//! [`Root::has`] is `false` for a name bound to `nil`. Use [`Root::var`] or
//! [`Table::get`] when the distinction matters.

use crate::types::{Root, Table, Value};

impl Root {
    /// Resolve a dot path. Returns `None` if any segment is missing, if an
    /// intermediate value is not a table, or if the final value is `nil`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let start = self.var(first)?;
        descend(start, segments)
    }

    /// `true` iff [`Root::get`] finds a non-nil value.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}

impl Value {
    /// Resolve a dot path relative to this value, which must be a table.
    /// Same rules as [`Root::get`].
    pub fn get(&self, path: &str) -> Option<&Value> {
        descend(self, path.split('.'))
    }
}

impl Table {
    /// Resolve a dot path relative to this table. Same rules as [`Root::get`].
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        descend(self.get_segment(first)?, segments)
    }
}

fn descend<'a, 'p>(start: &'a Value, segments: impl Iterator<Item = &'p str>) -> Option<&'a Value> {
    let mut current = start;
    for segment in segments {
        current = current.as_table()?.get_segment(segment)?;
    }
    if current.is_nil() {
        None
    } else {
        Some(current)
    }
}

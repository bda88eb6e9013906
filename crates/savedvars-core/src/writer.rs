//! Render a value tree back into the SavedVariables dialect.
//!
//! Output follows the layout the game client writes: one `Name = value`
//! statement per binding, tables expanded one `[key] = value,` entry per line
//! with tab indentation, and every key in bracket form. Numbers are written
//! with their original literal text, so parsing the output yields an equal tree.
//!
//! # Example
//! ```
//! use savedvars_core::{parse_str, to_savedvars_string};
//! let root = parse_str("DB = {x = 1, \"a\"}").unwrap();
//! assert_eq!(to_savedvars_string(&root), "DB = {\n\t[\"x\"] = 1,\n\t[1] = \"a\",\n}\n");
//! ```

use crate::types::{Key, Root, Table, Value};

/// Render every binding of `root`, one statement per binding.
pub fn to_savedvars_string(root: &Root) -> String {
    let mut out = String::new();
    for (name, value) in root.iter() {
        out.push_str(name);
        out.push_str(" = ");
        write_value(value, 0, &mut out);
        out.push('\n');
    }
    out
}

/// Render a single value on one line, e.g. `{[1] = 2, ["a"] = true}`.
pub fn render_inline(value: &Value) -> String {
    let mut out = String::new();
    write_inline(value, &mut out);
    out
}

fn write_value(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Table(t) if !t.is_empty() => write_table(t, depth, out),
        other => write_inline(other, out),
    }
}

fn write_table(table: &Table, depth: usize, out: &mut String) {
    out.push_str("{\n");
    for (key, value) in table.iter() {
        push_indent(depth + 1, out);
        write_key(key, out);
        out.push_str(" = ");
        write_value(value, depth + 1, out);
        out.push_str(",\n");
    }
    push_indent(depth, out);
    out.push('}');
}

fn write_inline(value: &Value, out: &mut String) {
    match value {
        Value::Nil => out.push_str("nil"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(n.as_str()),
        Value::String(s) => write_string(s, out),
        Value::Table(t) => {
            out.push('{');
            for (i, (key, value)) in t.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_key(key, out);
                out.push_str(" = ");
                write_inline(value, out);
            }
            out.push('}');
        }
    }
}

fn write_key(key: &Key, out: &mut String) {
    out.push('[');
    match key {
        Key::Integer(i) => out.push_str(&i.to_string()),
        Key::String(s) => write_string(s, out),
        Key::Other(rendered) => out.push_str(rendered),
    }
    out.push(']');
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push('\t');
    }
}

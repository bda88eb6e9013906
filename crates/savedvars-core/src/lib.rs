//! # savedvars-core
//!
//! Pure-Rust parser for the **SavedVariables** dialect: the Lua-syntax files a
//! game client writes to persist addon state. A file is a sequence of top-level
//! assignments whose right-hand sides are data literals (tables, strings,
//! numbers, booleans, `nil`). The parser turns it into an ordered, typed value
//! tree without executing anything.
//!
//! ## Quick start
//!
//! ```rust
//! use savedvars_core::{parse_str, to_json_string};
//!
//! let source = r#"
//! -- written by the client
//! MyAddonDB = {
//!     ["profileKeys"] = { ["Thrall - Durotan"] = "Default" },
//!     scale = 1.25,
//!     "first", "second",
//! }
//! "#;
//!
//! let root = parse_str(source).unwrap();
//! assert_eq!(root.get("MyAddonDB.scale").and_then(|v| v.as_f64()), Some(1.25));
//! assert_eq!(root.get("MyAddonDB.2").and_then(|v| v.as_str()), Some("second"));
//!
//! let json = to_json_string(&root).unwrap();
//! assert!(json.starts_with(r#"{"MyAddonDB":{"profileKeys""#));
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — SavedVariables text → [`Root`]
//! - [`types`] — `Value`, `Key`, `Number`, `Table`, `Root`
//! - [`path`] — dot-path lookup (`Root::get`, `Root::has`)
//! - [`json`] — `serde` serialization and JSON helpers
//! - [`writer`] — [`Root`] → SavedVariables text
//! - [`error`] — error types for I/O and syntax failures

pub mod error;
pub mod json;
pub mod parser;
pub mod path;
mod scanner;
pub mod types;
pub mod writer;

pub use error::{Result, SavedVarsError};
pub use json::{to_json_string, to_json_string_pretty, to_json_value};
pub use parser::{
    parse_file, parse_file_with, parse_str, parse_str_with, ParseOptions, Parser,
    DEFAULT_MAX_DEPTH,
};
pub use types::{Key, Number, Root, Table, Value};
pub use writer::{render_inline, to_savedvars_string};

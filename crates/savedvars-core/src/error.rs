//! Error types for SavedVariables parsing and export.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, parsing, or exporting a SavedVariables file.
///
/// I/O failures (`FileNotFound`, `Read`) are kept apart from syntax failures so
/// callers can tell "missing input" from "malformed input". Every syntax error
/// carries the 1-based line number where it was detected.
#[derive(Error, Debug)]
pub enum SavedVarsError {
    /// The input file does not exist.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The input file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No value form starts at this position. `found` is `None` at end of input.
    #[error("unexpected {} at line {line}", describe_found(.found))]
    UnexpectedCharacter { line: usize, found: Option<char> },

    /// A `{` was never closed. `line` is where the table opened.
    #[error("unterminated table opened at line {line}")]
    UnterminatedTable { line: usize },

    /// A quoted string was never closed. `line` is where the string started.
    #[error("unterminated string starting at line {line}")]
    UnterminatedString { line: usize },

    /// A `[key]` entry was missing its `]` or the `=` after it.
    #[error("malformed bracket key at line {line}: {message}")]
    MalformedBracketKey { line: usize, message: String },

    /// Tables nested deeper than the configured ceiling.
    #[error("tables nested deeper than {limit} levels at line {line}")]
    NestingTooDeep { line: usize, limit: usize },

    /// Serializing the value tree to JSON failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SavedVarsError {
    /// The 1-based source line of a syntax error, if this is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            SavedVarsError::UnexpectedCharacter { line, .. }
            | SavedVarsError::UnterminatedTable { line }
            | SavedVarsError::UnterminatedString { line }
            | SavedVarsError::MalformedBracketKey { line, .. }
            | SavedVarsError::NestingTooDeep { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns `true` for errors caused by malformed input text.
    pub fn is_syntax(&self) -> bool {
        self.line().is_some()
    }
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("character {c:?}"),
        None => "end of input".to_string(),
    }
}

/// Convenience alias used throughout savedvars-core.
pub type Result<T> = std::result::Result<T, SavedVarsError>;

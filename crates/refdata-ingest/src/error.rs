//! Error types for record parsing
//!
//! Every failure that can be tied to a physical input line carries its 1-based
//! line number and, where the line decoded, its raw text. Errors are grouped
//! into the categories returned by [`ParseError::kind`].

use std::path::PathBuf;
use thiserror::Error;

use crate::format::ColumnCount;
use crate::line_source::{Encoding, RawLine};

/// Result type alias for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Broad classification of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Header mismatch, missing header or wrong column count
    Structural,
    /// Unparsable field value or unterminated quoted field
    Format,
    /// Failure opening, reading or decoding the input
    Resource,
    /// `next_record` called with no record available
    EndOfSequence,
}

/// Errors raised while turning a text stream into records
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected {expected} columns, found {actual}: {text:?}")]
    ColumnCount {
        line: usize,
        expected: ColumnCount,
        actual: usize,
        text: String,
    },

    #[error("line {line}: header mismatch, expected {expected}: {text:?}")]
    HeaderMismatch {
        line: usize,
        expected: &'static str,
        text: String,
    },

    #[error("missing header line, expected {expected}")]
    MissingHeader { expected: &'static str },

    #[error("line {line}: invalid {field} {value:?} ({reason}): {text:?}")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
        reason: String,
        text: String,
    },

    #[error("line {line}: unterminated quoted field {field}: {text:?}")]
    UnterminatedQuote {
        line: usize,
        field: usize,
        text: String,
    },

    #[error("line {line}: input is not valid {encoding}")]
    Decode {
        line: usize,
        encoding: Encoding,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read error after line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("no more records")]
    Exhausted,
}

impl ParseError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::ColumnCount { .. }
            | ParseError::HeaderMismatch { .. }
            | ParseError::MissingHeader { .. } => ErrorKind::Structural,
            ParseError::InvalidField { .. } | ParseError::UnterminatedQuote { .. } => {
                ErrorKind::Format
            },
            ParseError::Decode { .. } | ParseError::Open { .. } | ParseError::Io { .. } => {
                ErrorKind::Resource
            },
            ParseError::Exhausted => ErrorKind::EndOfSequence,
        }
    }

    /// Line number the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::ColumnCount { line, .. }
            | ParseError::HeaderMismatch { line, .. }
            | ParseError::InvalidField { line, .. }
            | ParseError::UnterminatedQuote { line, .. }
            | ParseError::Decode { line, .. }
            | ParseError::Io { line, .. } => Some(*line),
            ParseError::MissingHeader { .. } | ParseError::Open { .. } | ParseError::Exhausted => {
                None
            },
        }
    }

    /// Raw text of the offending line, if it was decoded
    pub fn text(&self) -> Option<&str> {
        match self {
            ParseError::ColumnCount { text, .. }
            | ParseError::HeaderMismatch { text, .. }
            | ParseError::InvalidField { text, .. }
            | ParseError::UnterminatedQuote { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A single field that could not be converted
///
/// Returned by format mapping functions, which have no line context. The
/// parser attaches the line number and raw text via [`FieldError::at`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} {value:?}: {reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Attach the originating line
    pub fn at(self, raw: &RawLine) -> ParseError {
        ParseError::InvalidField {
            line: raw.line_number,
            field: self.field,
            value: self.value,
            reason: self.reason,
            text: raw.text.clone(),
        }
    }
}

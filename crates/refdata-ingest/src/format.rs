//! Per-format parser configuration
//!
//! A [`RecordFormat`] is a plain value describing one file layout: how lines
//! are split, how many columns they carry, how the header is treated and which
//! function turns a field set into a record. Each module under
//! [`crate::formats`] exports one as a `const`.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use crate::error::{FieldError, ParseError, Result};
use crate::line_source::{Encoding, LineOptions, LineSource, RawLine};
use crate::parser::RecordParser;
use crate::tokenizer::Tokenizer;

/// Number of columns a data line must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnCount {
    Exact(usize),
    /// Lines may omit trailing columns down to `min`; missing columns are
    /// supplied as empty strings
    Range { min: usize, max: usize },
}

impl ColumnCount {
    pub fn accepts(&self, actual: usize) -> bool {
        match *self {
            ColumnCount::Exact(n) => actual == n,
            ColumnCount::Range { min, max } => (min..=max).contains(&actual),
        }
    }

    /// Number of fields handed to the mapping function
    pub fn max(&self) -> usize {
        match *self {
            ColumnCount::Exact(n) => n,
            ColumnCount::Range { max, .. } => max,
        }
    }
}

impl fmt::Display for ColumnCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnCount::Exact(n) => write!(f, "{n}"),
            ColumnCount::Range { min, max } => write!(f, "{min} to {max}"),
        }
    }
}

/// Treatment of the first non-comment line
#[derive(Debug, Clone, Copy)]
pub enum HeaderRule {
    /// Every line is data
    Absent,
    /// The first line is consumed without inspection
    Skip,
    /// The first line is consumed and must satisfy `check`
    Require {
        /// Human-readable description used in errors
        expected: &'static str,
        check: fn(&str) -> bool,
    },
}

/// Converts a validated field set into a record
pub type ToRecord<T> = fn(&[String]) -> std::result::Result<T, FieldError>;

/// Layout and mapping of one delimited file format
pub struct RecordFormat<T> {
    /// Short identifier, e.g. "gene-reference"
    pub name: &'static str,
    pub delimiter: char,
    pub enclosure: Option<char>,
    pub columns: ColumnCount,
    /// The final column runs to the end of the line and may contain the
    /// delimiter
    pub rest_of_line: bool,
    pub comment_prefix: Option<char>,
    pub skip_blank_lines: bool,
    pub header: HeaderRule,
    pub to_record: ToRecord<T>,
}

impl<T> Clone for RecordFormat<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RecordFormat<T> {}

impl<T> fmt::Debug for RecordFormat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFormat")
            .field("name", &self.name)
            .field("delimiter", &self.delimiter)
            .field("enclosure", &self.enclosure)
            .field("columns", &self.columns)
            .field("rest_of_line", &self.rest_of_line)
            .field("comment_prefix", &self.comment_prefix)
            .field("skip_blank_lines", &self.skip_blank_lines)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl<T> RecordFormat<T> {
    pub fn tokenizer(&self) -> Tokenizer {
        let mut tokenizer = Tokenizer::new(self.delimiter);
        if let Some(quote) = self.enclosure {
            tokenizer = tokenizer.with_enclosure(quote);
        }
        if self.rest_of_line {
            tokenizer = tokenizer.with_max_fields(self.columns.max());
        }
        tokenizer
    }

    pub fn line_options(&self, encoding: Encoding) -> LineOptions {
        LineOptions {
            encoding,
            comment_prefix: self.comment_prefix,
            skip_blank_lines: self.skip_blank_lines,
        }
    }

    /// Build a parser over an already open reader
    pub fn parser<R: BufRead>(&self, reader: R, encoding: Encoding) -> Result<RecordParser<R, T>> {
        RecordParser::new(LineSource::new(reader, self.line_options(encoding)), *self)
    }

    /// Open a local file (plain or gzip) and build a parser over it
    pub fn open(
        &self,
        path: impl AsRef<Path>,
        encoding: Encoding,
    ) -> Result<RecordParser<Box<dyn BufRead>, T>> {
        RecordParser::new(LineSource::open(path, self.line_options(encoding))?, *self)
    }

    /// Validate the field count and pad missing trailing columns
    pub fn check_columns(&self, mut fields: Vec<String>, raw: &RawLine) -> Result<Vec<String>> {
        if !self.columns.accepts(fields.len()) {
            return Err(ParseError::ColumnCount {
                line: raw.line_number,
                expected: self.columns,
                actual: fields.len(),
                text: raw.text.clone(),
            });
        }

        fields.resize(self.columns.max(), String::new());
        Ok(fields)
    }
}

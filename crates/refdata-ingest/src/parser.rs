//! Generic single-pass record parser
//!
//! [`RecordParser`] pulls lines from a [`LineSource`], splits them with the
//! format's tokenizer and maps them to records, holding at most one parsed
//! record as lookahead.
//!
//! Failures are detected in [`RecordParser::has_next`], before the caller asks
//! for the record. A failed parser is fused: it reports no further records, so
//! the offending line is never skipped over silently.
//!
//! ```
//! use refdata_ingest::formats::gene_reference;
//! use refdata_ingest::Encoding;
//!
//! let data = "#Tax ID\tGene ID\tPubMed ID (PMID) list\tlast update timestamp\tGeneRIF text\n\
//!             9606\t7040\t12858451\t2008-03-13 08:51\tSome text\n";
//! let mut parser = gene_reference::FORMAT.parser(data.as_bytes(), Encoding::Utf8)?;
//!
//! assert!(parser.has_next()?);
//! assert!(parser.has_next()?);
//! let record = parser.next_record()?;
//! assert_eq!(record.gene_id, 7040);
//! assert!(!parser.has_next()?);
//! # Ok::<(), refdata_ingest::ParseError>(())
//! ```

use std::fmt;
use std::io::BufRead;
use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::error::{ParseError, Result};
use crate::format::{HeaderRule, RecordFormat};
use crate::line_source::{LineSource, RawLine};
use crate::tokenizer::Tokenizer;

/// Lazy, forward-only parser over one input stream
pub struct RecordParser<R, T> {
    lines: LineSource<R>,
    format: RecordFormat<T>,
    tokenizer: Tokenizer,
    lookahead: Option<T>,
    exhausted: bool,
    records_returned: usize,
}

impl<R: BufRead, T> RecordParser<R, T> {
    /// Create a parser, consuming and checking the header line if the format
    /// has one
    pub fn new(mut lines: LineSource<R>, format: RecordFormat<T>) -> Result<Self> {
        match format.header {
            HeaderRule::Absent => {},
            HeaderRule::Skip => match lines.next().transpose()? {
                Some(header) => {
                    debug!(format = format.name, line = header.line_number, "Skipped header line");
                },
                None => debug!(format = format.name, "Input is empty, no header to skip"),
            },
            HeaderRule::Require { expected, check } => {
                let header = lines
                    .next()
                    .transpose()?
                    .ok_or(ParseError::MissingHeader { expected })?;

                if !check(&header.text) {
                    warn!(format = format.name, line = header.line_number, "Header mismatch");
                    return Err(ParseError::HeaderMismatch {
                        line: header.line_number,
                        expected,
                        text: header.text,
                    });
                }
                debug!(format = format.name, line = header.line_number, "Header validated");
            },
        }

        Ok(Self {
            tokenizer: format.tokenizer(),
            lines,
            format,
            lookahead: None,
            exhausted: false,
            records_returned: 0,
        })
    }

    /// Whether another record is available
    ///
    /// Idempotent while a lookahead is cached. Parse failures of the next line
    /// are returned here.
    pub fn has_next(&mut self) -> Result<bool> {
        if self.lookahead.is_some() {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }

        match self.lines.next() {
            None => {
                self.exhausted = true;
                debug!(
                    format = self.format.name,
                    lines = self.lines.line_number(),
                    records = self.records_returned,
                    "Input exhausted"
                );
                Ok(false)
            },
            Some(Err(e)) => Err(self.fail(e)),
            Some(Ok(raw)) => match self.parse_line(&raw) {
                Ok(record) => {
                    self.lookahead = Some(record);
                    Ok(true)
                },
                Err(e) => Err(self.fail(e)),
            },
        }
    }

    /// Take the next record
    ///
    /// Returns [`ParseError::Exhausted`] when no record is available.
    pub fn next_record(&mut self) -> Result<T> {
        if !self.has_next()? {
            return Err(ParseError::Exhausted);
        }

        let record = self.lookahead.take().ok_or(ParseError::Exhausted)?;
        self.records_returned += 1;
        Ok(record)
    }

    /// True once the input is used up or a failure was reported
    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.lookahead.is_none()
    }

    /// Physical lines consumed so far, including comments and the header
    pub fn lines_read(&self) -> usize {
        self.lines.line_number()
    }

    pub fn records_returned(&self) -> usize {
        self.records_returned
    }

    pub fn format(&self) -> &RecordFormat<T> {
        &self.format
    }

    /// Release the underlying stream
    pub fn close(self) {
        debug!(
            format = self.format.name,
            lines = self.lines.line_number(),
            records = self.records_returned,
            "Closing parser"
        );
    }

    fn parse_line(&self, raw: &RawLine) -> Result<T> {
        let fields = self.tokenizer.split(&raw.text).map_err(|e| e.at(raw))?;
        let fields = self.format.check_columns(fields, raw)?;
        (self.format.to_record)(&fields).map_err(|e| e.at(raw))
    }

    fn fail(&mut self, err: ParseError) -> ParseError {
        self.exhausted = true;
        warn!(format = self.format.name, line = ?err.line(), error = %err, "Parsing stopped");
        err
    }
}

impl<R: BufRead, T> Iterator for RecordParser<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.next_record()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<R: BufRead, T> FusedIterator for RecordParser<R, T> {}

impl<R, T> fmt::Debug for RecordParser<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordParser")
            .field("format", &self.format.name)
            .field("lines", &self.lines)
            .field("has_lookahead", &self.lookahead.is_some())
            .field("exhausted", &self.exhausted)
            .field("records_returned", &self.records_returned)
            .finish()
    }
}

//! Field tokenizer for delimited lines
//!
//! Splits one line into fields on a single delimiter character. When an
//! enclosure (quote) character is configured, a field that starts with it is
//! read as a quoted span: delimiters inside the span are literal and a doubled
//! enclosure stands for one literal enclosure character.
//!
//! ```
//! use refdata_ingest::tokenizer::Tokenizer;
//!
//! let csv = Tokenizer::new(',').with_enclosure('"');
//! assert_eq!(csv.split(r#"a,"b,c",d"#).unwrap(), vec!["a", "b,c", "d"]);
//!
//! // Rest-of-line final column
//! let tsv = Tokenizer::new('\t').with_max_fields(2);
//! assert_eq!(tsv.split("7040\tfree\ttext").unwrap(), vec!["7040", "free\ttext"]);
//! ```

use thiserror::Error;

use crate::error::ParseError;
use crate::line_source::RawLine;

/// A quoted field reached the end of the line without its closing enclosure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated quoted field {field} in {text:?}")]
pub struct UnterminatedQuote {
    /// 1-based position of the field that was left open
    pub field: usize,
    /// The offending line
    pub text: String,
}

impl UnterminatedQuote {
    /// Attach the originating line number
    pub fn at(self, raw: &RawLine) -> ParseError {
        ParseError::UnterminatedQuote {
            line: raw.line_number,
            field: self.field,
            text: self.text,
        }
    }
}

/// Splits lines into fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    delimiter: char,
    enclosure: Option<char>,
    max_fields: Option<usize>,
}

impl Tokenizer {
    /// Plain delimiter split
    pub const fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            enclosure: None,
            max_fields: None,
        }
    }

    /// Enable quoted fields
    pub const fn with_enclosure(mut self, enclosure: char) -> Self {
        self.enclosure = Some(enclosure);
        self
    }

    /// Stop splitting after `max` fields; the last field keeps the rest of the
    /// line verbatim, delimiters included. A limit of zero is treated as one.
    pub const fn with_max_fields(mut self, max: usize) -> Self {
        self.max_fields = Some(if max == 0 { 1 } else { max });
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn enclosure(&self) -> Option<char> {
        self.enclosure
    }

    pub fn max_fields(&self) -> Option<usize> {
        self.max_fields
    }

    /// Split one line (without its terminator) into fields
    pub fn split(&self, line: &str) -> Result<Vec<String>, UnterminatedQuote> {
        match self.enclosure {
            None => Ok(self.split_plain(line)),
            Some(quote) => self.split_quoted(line, quote),
        }
    }

    fn split_plain(&self, line: &str) -> Vec<String> {
        match self.max_fields {
            Some(max) => line.splitn(max, self.delimiter).map(str::to_string).collect(),
            None => line.split(self.delimiter).map(str::to_string).collect(),
        }
    }

    fn is_last_field(&self, completed: usize) -> bool {
        self.max_fields.is_some_and(|max| completed + 1 >= max)
    }

    fn split_quoted(&self, line: &str, quote: char) -> Result<Vec<String>, UnterminatedQuote> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut field_start = true;
        let mut chars = line.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            if field_start && self.is_last_field(fields.len()) {
                fields.push(line[idx..].to_string());
                return Ok(fields);
            }

            if in_quotes {
                if ch == quote {
                    if chars.peek().map(|&(_, next)| next) == Some(quote) {
                        current.push(quote);
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    current.push(ch);
                }
            } else if ch == self.delimiter {
                fields.push(std::mem::take(&mut current));
                field_start = true;
                continue;
            } else if field_start && ch == quote {
                in_quotes = true;
            } else {
                // Enclosure characters after the start of a field are literal
                current.push(ch);
            }

            field_start = false;
        }

        if in_quotes {
            return Err(UnterminatedQuote {
                field: fields.len() + 1,
                text: line.to_string(),
            });
        }

        fields.push(current);
        Ok(fields)
    }
}

/// Split `line` on `delimiter`, honouring an optional enclosure character
pub fn split_fields(
    line: &str,
    delimiter: char,
    enclosure: Option<char>,
) -> Result<Vec<String>, UnterminatedQuote> {
    let tokenizer = Tokenizer::new(delimiter);
    match enclosure {
        Some(quote) => tokenizer.with_enclosure(quote).split(line),
        None => tokenizer.split(line),
    }
}

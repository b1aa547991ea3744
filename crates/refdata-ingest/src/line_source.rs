//! Line-numbered, comment-filtering line reader
//!
//! [`LineSource`] reads a byte stream one physical line at a time, decodes it
//! and hands out [`RawLine`]s. Line numbers count every physical line, comments
//! included, so that error positions match the file on disk.

use std::fmt;
use std::io::BufRead;
use std::iter::FusedIterator;
use std::path::Path;
use std::str::FromStr;

use refdata_common::RefdataError;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ParseError, Result};

/// Character encoding of an input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Strict UTF-8; invalid sequences are an error
    #[default]
    Utf8,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl Encoding {
    fn decode(self, bytes: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_string),
            Encoding::Latin1 => Ok(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = RefdataError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(RefdataError::invalid_setting("encoding", s, "expected utf-8 or latin-1")),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "UTF-8"),
            Encoding::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

/// One physical input line, without its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based physical line number
    pub line_number: usize,
    pub text: String,
}

/// How a [`LineSource`] decodes and filters lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineOptions {
    pub encoding: Encoding,
    /// Lines whose text, ignoring leading whitespace, starts with this
    /// character are dropped
    pub comment_prefix: Option<char>,
    /// Drop lines that are empty or whitespace only
    pub skip_blank_lines: bool,
}

impl LineOptions {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    pub fn with_comment_prefix(mut self, prefix: char) -> Self {
        self.comment_prefix = Some(prefix);
        self
    }

    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }
}

/// Forward-only sequence of non-comment lines
///
/// Not restartable. Once the underlying reader reports end of input or an
/// error, the source yields nothing further.
pub struct LineSource<R> {
    reader: R,
    options: LineOptions,
    line_number: usize,
    buf: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, options: LineOptions) -> Self {
        Self {
            reader,
            options,
            line_number: 0,
            buf: Vec::with_capacity(1024),
            finished: false,
        }
    }

    /// Number of physical lines read so far, comments included
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn options(&self) -> &LineOptions {
        &self.options
    }

    /// Release the source, returning the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn is_filtered(&self, text: &str) -> bool {
        if self.options.skip_blank_lines && text.trim().is_empty() {
            return true;
        }

        self.options
            .comment_prefix
            .is_some_and(|prefix| text.trim_start().starts_with(prefix))
    }

    fn read_physical(&mut self) -> Result<Option<RawLine>> {
        self.buf.clear();

        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| ParseError::Io {
                line: self.line_number,
                source,
            })?;

        if read == 0 {
            return Ok(None);
        }

        self.line_number += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        // CRLF, including a final line cut off before its LF
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        let text = self
            .options
            .encoding
            .decode(&self.buf)
            .map_err(|source| ParseError::Decode {
                line: self.line_number,
                encoding: self.options.encoding,
                source,
            })?;

        Ok(Some(RawLine {
            line_number: self.line_number,
            text,
        }))
    }
}

impl LineSource<Box<dyn BufRead>> {
    /// Open a local file (gzip is detected and decompressed)
    pub fn open(path: impl AsRef<Path>, options: LineOptions) -> Result<Self> {
        let reader = crate::source::open_path(path)?;
        Ok(Self::new(reader, options))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.read_physical() {
                Ok(None) => self.finished = true,
                Ok(Some(line)) => {
                    if self.is_filtered(&line.text) {
                        trace!(line = line.line_number, "Skipping comment or blank line");
                        continue;
                    }
                    return Some(Ok(line));
                },
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                },
            }
        }

        None
    }
}

impl<R: BufRead> FusedIterator for LineSource<R> {}

impl<R> fmt::Debug for LineSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource")
            .field("options", &self.options)
            .field("line_number", &self.line_number)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::{BufReader, Cursor, Read};

    fn lines(input: &str, options: LineOptions) -> Vec<RawLine> {
        LineSource::new(input.as_bytes(), options)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_line_numbers_count_comments() {
        let input = "# header comment\nfirst\n  # indented comment\nsecond\n";
        let out = lines(input, LineOptions::default().with_comment_prefix('#'));

        assert_eq!(
            out,
            vec![
                RawLine {
                    line_number: 2,
                    text: "first".to_string()
                },
                RawLine {
                    line_number: 4,
                    text: "second".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_prefix_filters_nothing() {
        let out = lines("# not a comment\n\nx", LineOptions::default());
        let texts: Vec<_> = out.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["# not a comment", "", "x"]);
    }

    #[test]
    fn test_blank_lines_kept_unless_configured() {
        let input = "a\n\n   \nb\n";
        assert_eq!(lines(input, LineOptions::default()).len(), 4);

        let out = lines(input, LineOptions::default().skip_blank_lines(true));
        let numbers: Vec<_> = out.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 4]);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let out = lines("one\r\ntwo\r\nthree", LineOptions::default());
        let texts: Vec<_> = out.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_final_carriage_return_without_newline() {
        let out = lines("one\r\ntwo\r", LineOptions::default());
        let texts: Vec<_> = out.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_invalid_utf8_is_resource_error() {
        let input: &[u8] = b"ok\nbad \xff byte\nnever read\n";
        let mut source = LineSource::new(input, LineOptions::default());

        assert_eq!(source.next().unwrap().unwrap().text, "ok");
        let err = source.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert_eq!(err.line(), Some(2));
        assert!(source.next().is_none());
    }

    #[test]
    fn test_latin1_decoding() {
        let input: &[u8] = b"Z\xfcrich\n";
        let out: Vec<_> = LineSource::new(input, LineOptions::new(Encoding::Latin1))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(out[0].text, "Zürich");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_read_failure_is_resource_error() {
        let mut source = LineSource::new(BufReader::new(FailingReader), LineOptions::default());
        let err = source.next().unwrap().unwrap_err();
        assert!(matches!(err, ParseError::Io { line: 0, .. }));
        assert!(source.next().is_none());
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("iso-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_into_inner_returns_reader() {
        let mut source = LineSource::new(Cursor::new("a\nb\n"), LineOptions::default());
        source.next();
        assert_eq!(source.line_number(), 1);
        let cursor = source.into_inner();
        assert_eq!(cursor.position(), 2);
    }
}

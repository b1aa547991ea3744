//! Draining a parser into a consumer
//!
//! [`drain`] is the loop behind `refdata-ingest parse`. The record limit is
//! checked before the parser looks ahead, so lines past the limit are never
//! read or parsed.

use std::io::BufRead;

use tracing::debug;

use crate::error::ParseError;
use crate::parser::RecordParser;

/// Counters for one drained input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    /// Physical lines consumed, comments and header included
    pub lines: usize,
    /// Stopped because the record limit was reached
    pub truncated: bool,
}

/// Hand every record to `consume`, stopping after `limit` records
///
/// Stops at the first parse failure or the first error from `consume`.
pub fn drain<R, T, E, F>(
    parser: &mut RecordParser<R, T>,
    limit: Option<usize>,
    mut consume: F,
) -> Result<RunSummary, E>
where
    R: BufRead,
    E: From<ParseError>,
    F: FnMut(T) -> Result<(), E>,
{
    let mut summary = RunSummary::default();

    loop {
        if limit.is_some_and(|limit| summary.records >= limit) {
            summary.truncated = true;
            debug!(format = parser.format().name, ?limit, "Record limit reached");
            break;
        }

        if !parser.has_next()? {
            break;
        }

        consume(parser.next_record()?)?;
        summary.records += 1;
    }

    summary.lines = parser.lines_read();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::gene_reference;
    use crate::line_source::Encoding;

    const INPUT: &str = "9606\t7040\t1\t2008-03-13 08:51\tA\n\
                         9606\tBAD\t2\t2008-03-13 08:51\tB\n";

    #[test]
    fn test_limit_stops_before_reading_further() {
        let mut parser = gene_reference::FORMAT.parser(INPUT.as_bytes(), Encoding::Utf8).unwrap();
        let mut genes = Vec::new();

        let summary = drain(&mut parser, Some(1), |record| {
            genes.push(record.gene_id);
            Ok::<_, ParseError>(())
        })
        .unwrap();

        assert_eq!(genes, vec![7040]);
        assert_eq!(
            summary,
            RunSummary {
                records: 1,
                lines: 1,
                truncated: true
            }
        );
    }

    #[test]
    fn test_without_limit_bad_line_fails() {
        let mut parser = gene_reference::FORMAT.parser(INPUT.as_bytes(), Encoding::Utf8).unwrap();
        let err = drain(&mut parser, None, |_| Ok::<_, ParseError>(())).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "gene_id", line: 2, .. }));
    }

    #[test]
    fn test_limit_above_record_count() {
        let input = "# only\n9606\t7040\t1\t2008-03-13 08:51\tA\n";
        let mut parser = gene_reference::FORMAT.parser(input.as_bytes(), Encoding::Utf8).unwrap();

        let summary = drain(&mut parser, Some(5), |_| Ok::<_, ParseError>(())).unwrap();
        assert_eq!(summary.records, 1);
        assert_eq!(summary.lines, 2);
        assert!(!summary.truncated);
    }

    #[test]
    fn test_consumer_error_stops_run() {
        let input = "9606\t1\t1\t2008-03-13 08:51\tA\n9606\t2\t1\t2008-03-13 08:51\tB\n";
        let mut parser = gene_reference::FORMAT.parser(input.as_bytes(), Encoding::Utf8).unwrap();
        let mut seen = 0;

        let result: Result<RunSummary, ParseError> = drain(&mut parser, None, |_| {
            seen += 1;
            Err(ParseError::Exhausted)
        });

        assert!(result.is_err());
        assert_eq!(seen, 1);
    }
}

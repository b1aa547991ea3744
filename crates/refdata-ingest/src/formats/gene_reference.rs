//! Gene reference-into-function lines (NCBI `generifs_basic` layout)
//!
//! Tab-delimited, 5 columns:
//! 1. Taxonomy ID
//! 2. Gene ID
//! 3. Comma-separated PubMed IDs
//! 4. Last update timestamp (`yyyy-MM-dd HH:mm`)
//! 5. Free text, running to the end of the line
//!
//! The column header line starts with `#` and is dropped as a comment.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::fields::{parse_int, parse_int_list, parse_timestamp};
use crate::format::{ColumnCount, HeaderRule, RecordFormat};

/// Pattern of the timestamp column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One gene-to-publication annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneReference {
    /// NCBI taxonomy ID (e.g., 9606)
    pub taxonomy_id: i32,

    /// NCBI Gene ID
    pub gene_id: i64,

    /// Referenced PubMed IDs, in file order
    pub reference_ids: Vec<i64>,

    pub timestamp: NaiveDateTime,

    pub text: String,
}

pub const FORMAT: RecordFormat<GeneReference> = RecordFormat {
    name: "gene-reference",
    delimiter: '\t',
    enclosure: None,
    columns: ColumnCount::Exact(5),
    rest_of_line: true,
    comment_prefix: Some('#'),
    skip_blank_lines: false,
    header: HeaderRule::Absent,
    to_record: from_fields,
};

fn from_fields(fields: &[String]) -> Result<GeneReference, FieldError> {
    Ok(GeneReference {
        taxonomy_id: parse_int("taxonomy_id", &fields[0])?,
        gene_id: parse_int("gene_id", &fields[1])?,
        reference_ids: parse_int_list("reference_ids", &fields[2], ',')?,
        timestamp: parse_timestamp("timestamp", &fields[3], TIMESTAMP_FORMAT)?,
        text: fields[4].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ParseError};
    use crate::line_source::Encoding;
    use chrono::NaiveDate;

    fn parse_all(input: &str) -> Vec<Result<GeneReference, ParseError>> {
        FORMAT
            .parser(input.as_bytes(), Encoding::Utf8)
            .unwrap()
            .collect()
    }

    #[test]
    fn test_parse_line() {
        let records = parse_all("9606\t7040\t12858451,1234567\t2008-03-13 08:51\tSome text\n");
        let record = records[0].as_ref().unwrap();

        assert_eq!(record.taxonomy_id, 9606);
        assert_eq!(record.gene_id, 7040);
        assert_eq!(record.reference_ids, vec![12858451, 1234567]);
        assert_eq!(
            record.timestamp,
            NaiveDate::from_ymd_opt(2008, 3, 13)
                .unwrap()
                .and_hms_opt(8, 51, 0)
                .unwrap()
        );
        assert_eq!(record.text, "Some text");
    }

    #[test]
    fn test_text_keeps_tabs() {
        let records = parse_all("9606\t1\t2\t2010-01-01 00:00\tpart one\tpart two\n");
        assert_eq!(records[0].as_ref().unwrap().text, "part one\tpart two");
    }

    #[test]
    fn test_header_comment_is_skipped() {
        let input = "#Tax ID\tGene ID\tPubMed ID (PMID) list\tlast update timestamp\tGeneRIF text\n\
                     9606\t7040\t1\t2008-03-13 08:51\tA\n\
                     10090\t21926\t2\t2009-04-01 10:00\tB\n";
        let genes: Vec<_> = parse_all(input).into_iter().map(|r| r.unwrap().gene_id).collect();
        assert_eq!(genes, vec![7040, 21926]);
    }

    #[test]
    fn test_too_few_columns() {
        let records = parse_all("9606\t7040\t1\t2008-03-13 08:51\n");
        let err = records[0].as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(matches!(
            err,
            ParseError::ColumnCount {
                expected: ColumnCount::Exact(5),
                actual: 4,
                line: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_timestamp() {
        let records = parse_all("9606\t7040\t1\t2008-03-13T08:51\tText\n");
        let err = records[0].as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, ParseError::InvalidField { field: "timestamp", .. }));
    }

    #[test]
    fn test_bad_reference_id() {
        let records = parse_all("9606\t7040\t1,PMC2\t2008-03-13 08:51\tText\n");
        let err = records[0].as_ref().unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "reference_ids", line: 1, .. }));
    }
}

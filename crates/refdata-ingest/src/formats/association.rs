//! Ontology association files (GAF 2.x layout)
//!
//! Tab-delimited, no header. Comment lines start with `!` and blank lines are
//! ignored. Lines carry 6 to 12 columns; missing trailing columns read as
//! empty:
//!
//! | # | Column |
//! |---|--------|
//! | 1 | db |
//! | 2 | object_id |
//! | 3 | qualifier |
//! | 4 | ontology_id |
//! | 5 | references (`\|`-separated) |
//! | 6 | evidence_code |
//! | 7 | with |
//! | 8 | extra_taxon_id |
//! | 9 | date |
//! | 10 | assigned_by |
//! | 11 | extension |
//! | 12 | spliceform_id |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::fields::{optional, parse_date, split_list};
use crate::format::{ColumnCount, HeaderRule, RecordFormat};

/// One object-to-term association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub db: String,
    pub object_id: String,
    pub qualifier: Option<String>,
    /// Ontology term (e.g., GO:0005515)
    pub ontology_id: String,
    pub references: Vec<String>,
    pub evidence_code: String,
    pub with: Option<String>,
    pub extra_taxon_id: Option<String>,
    /// Annotation date as written, usually `YYYYMMDD`
    pub date: Option<String>,
    pub assigned_by: Option<String>,
    pub extension: Option<String>,
    pub spliceform_id: Option<String>,
}

impl Association {
    /// Annotation date, if present and well formed
    pub fn annotation_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }
}

pub const FORMAT: RecordFormat<Association> = RecordFormat {
    name: "association",
    delimiter: '\t',
    enclosure: None,
    columns: ColumnCount::Range { min: 6, max: 12 },
    rest_of_line: false,
    comment_prefix: Some('!'),
    skip_blank_lines: true,
    header: HeaderRule::Absent,
    to_record: from_fields,
};

fn required(field: &'static str, value: &str) -> Result<String, FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, value, "required column is empty"));
    }
    Ok(value.to_string())
}

fn from_fields(fields: &[String]) -> Result<Association, FieldError> {
    Ok(Association {
        db: required("db", &fields[0])?,
        object_id: required("object_id", &fields[1])?,
        qualifier: optional(&fields[2]),
        ontology_id: required("ontology_id", &fields[3])?,
        references: split_list(&fields[4], '|'),
        evidence_code: required("evidence_code", &fields[5])?,
        with: optional(&fields[6]),
        extra_taxon_id: optional(&fields[7]),
        date: optional(&fields[8]),
        assigned_by: optional(&fields[9]),
        extension: optional(&fields[10]),
        spliceform_id: optional(&fields[11]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ParseError};
    use crate::line_source::Encoding;

    fn parse_all(input: &str) -> Vec<Result<Association, ParseError>> {
        FORMAT
            .parser(input.as_bytes(), Encoding::Utf8)
            .unwrap()
            .collect()
    }

    #[test]
    fn test_full_line() {
        let line = "UniProtKB\tP12345\tenables\tGO:0005515\tPMID:1234|GO_REF:0000024\tIPI\tUniProtKB:Q9Y6K9\ttaxon:9606\t20260115\tUniProt\t\tUniProtKB:P12345-2\n";
        let records = parse_all(line);
        let record = records[0].as_ref().unwrap();

        assert_eq!(record.db, "UniProtKB");
        assert_eq!(record.qualifier.as_deref(), Some("enables"));
        assert_eq!(record.references, vec!["PMID:1234", "GO_REF:0000024"]);
        assert_eq!(record.with.as_deref(), Some("UniProtKB:Q9Y6K9"));
        assert_eq!(record.extension, None);
        assert_eq!(record.spliceform_id.as_deref(), Some("UniProtKB:P12345-2"));
        assert_eq!(record.annotation_date(), NaiveDate::from_ymd_opt(2026, 1, 15));
    }

    #[test]
    fn test_short_line_is_padded() {
        let records = parse_all("UniProtKB\tP12345\t\tGO:0005515\tPMID:1\tIEA\n");
        let record = records[0].as_ref().unwrap();

        assert_eq!(record.evidence_code, "IEA");
        assert_eq!(record.qualifier, None);
        assert_eq!(record.date, None);
        assert_eq!(record.annotation_date(), None);
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let input = "!gaf-version: 2.2\n\
                     !generated-by: UniProt\n\
                     \n\
                     UniProtKB\tP1\t\tGO:0000001\tPMID:1\tIEA\n\
                     !mid-file comment\n\
                     \n\
                     UniProtKB\tP2\t\tGO:0000002\tPMID:2\tIEA\n";

        let ids: Vec<_> = parse_all(input)
            .into_iter()
            .map(|r| r.unwrap().object_id)
            .collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }

    #[test]
    fn test_too_few_columns() {
        let records = parse_all("!c\nUniProtKB\tP1\t\tGO:0000001\tPMID:1\n");
        let err = records[0].as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(matches!(
            err,
            ParseError::ColumnCount {
                line: 2,
                expected: ColumnCount::Range { min: 6, max: 12 },
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_required_column() {
        let records = parse_all("UniProtKB\tP1\t\t\tPMID:1\tIEA\n");
        let err = records[0].as_ref().unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { field: "ontology_id", .. }));
    }
}

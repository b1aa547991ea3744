//! Bibliographic ID mapping CSV (PMC-style `PMC-ids.csv`)
//!
//! Comma-separated with `"` quoting, 12 columns. The first line is a header
//! that must start with `Journal Title`.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::fields::{optional, parse_int};
use crate::format::{ColumnCount, HeaderRule, RecordFormat};

const HEADER_PREFIX: &str = "Journal Title";

/// Identifier mapping for one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographicId {
    pub journal_title: String,
    pub issn: Option<String>,
    pub eissn: Option<String>,
    pub year: i32,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub page: Option<String>,
    pub doi: Option<String>,
    /// Archive accession (e.g., PMC3531190)
    pub accession_id: String,
    /// PubMed ID, absent for articles not indexed in PubMed
    pub external_id: Option<String>,
    pub manuscript_id: Option<String>,
    pub release_date: Option<String>,
}

fn is_header(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX)
}

pub const FORMAT: RecordFormat<BibliographicId> = RecordFormat {
    name: "bibliographic",
    delimiter: ',',
    enclosure: Some('"'),
    columns: ColumnCount::Exact(12),
    rest_of_line: false,
    comment_prefix: None,
    skip_blank_lines: false,
    header: HeaderRule::Require {
        expected: "a line starting with \"Journal Title\"",
        check: is_header,
    },
    to_record: from_fields,
};

fn from_fields(fields: &[String]) -> Result<BibliographicId, FieldError> {
    Ok(BibliographicId {
        journal_title: fields[0].clone(),
        issn: optional(&fields[1]),
        eissn: optional(&fields[2]),
        year: parse_int("year", &fields[3])?,
        volume: optional(&fields[4]),
        issue: optional(&fields[5]),
        page: optional(&fields[6]),
        doi: optional(&fields[7]),
        accession_id: fields[8].clone(),
        external_id: optional(&fields[9]),
        manuscript_id: optional(&fields[10]),
        release_date: optional(&fields[11]),
    })
}

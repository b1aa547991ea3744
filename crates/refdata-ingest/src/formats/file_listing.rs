//! Archive file listings (PMC-style `oa_file_list.txt`)
//!
//! Tab-delimited, 3 columns. The first line holds the listing's generation
//! timestamp and is skipped unchecked.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::format::{ColumnCount, HeaderRule, RecordFormat};

/// One downloadable archive package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListing {
    /// Path relative to the archive root
    pub path: String,
    pub citation: String,
    pub accession_id: String,
}

pub const FORMAT: RecordFormat<FileListing> = RecordFormat {
    name: "file-listing",
    delimiter: '\t',
    enclosure: None,
    columns: ColumnCount::Exact(3),
    rest_of_line: false,
    comment_prefix: None,
    skip_blank_lines: false,
    header: HeaderRule::Skip,
    to_record: from_fields,
};

fn from_fields(fields: &[String]) -> Result<FileListing, FieldError> {
    Ok(FileListing {
        path: fields[0].clone(),
        citation: fields[1].clone(),
        accession_id: fields[2].clone(),
    })
}

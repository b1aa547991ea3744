//! Supported file formats
//!
//! Each submodule exports its record type and a `FORMAT` constant.

pub mod association;
pub mod bibliographic;
pub mod file_listing;
pub mod gene_reference;

use std::fmt;
use std::str::FromStr;

use refdata_common::RefdataError;
use serde::{Deserialize, Serialize};

pub use association::Association;
pub use bibliographic::BibliographicId;
pub use file_listing::FileListing;
pub use gene_reference::GeneReference;

/// Format selector for callers that pick a layout at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    GeneReference,
    Bibliographic,
    FileListing,
    Association,
}

impl FormatKind {
    pub fn all() -> &'static [FormatKind] {
        &[
            FormatKind::GeneReference,
            FormatKind::Bibliographic,
            FormatKind::FileListing,
            FormatKind::Association,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::GeneReference => gene_reference::FORMAT.name,
            FormatKind::Bibliographic => bibliographic::FORMAT.name,
            FormatKind::FileListing => file_listing::FORMAT.name,
            FormatKind::Association => association::FORMAT.name,
        }
    }

    /// One-line layout summary
    pub fn description(&self) -> &'static str {
        match self {
            FormatKind::GeneReference => {
                "tab, 5 columns: taxonomy_id, gene_id, reference_ids, timestamp, text; '#' comments"
            },
            FormatKind::Bibliographic => {
                "comma, quoted, 12 columns; header must start with \"Journal Title\""
            },
            FormatKind::FileListing => {
                "tab, 3 columns: path, citation, accession_id; first line skipped"
            },
            FormatKind::Association => {
                "tab, 6 to 12 columns; '!' comments, blank lines ignored"
            },
        }
    }
}

impl FromStr for FormatKind {
    type Err = RefdataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = FormatKind::all().iter().map(|k| k.as_str()).collect();
                RefdataError::invalid_setting(
                    "format",
                    s,
                    format!("expected one of: {}", names.join(", ")),
                )
            })
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in FormatKind::all() {
            assert_eq!(kind.to_string().parse::<FormatKind>().unwrap(), *kind);
        }
        assert_eq!("GENE-REFERENCE".parse::<FormatKind>().unwrap(), FormatKind::GeneReference);
    }

    #[test]
    fn test_unknown_format() {
        let err = "fasta".parse::<FormatKind>().unwrap_err();
        assert!(err.to_string().contains("association"));
    }
}

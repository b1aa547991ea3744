//! Integration tests for draining parsers with a record limit

use std::fs;

use refdata_ingest::formats::{association, gene_reference};
use refdata_ingest::{drain, Encoding, ParseError, RunSummary};
use tempfile::TempDir;

#[test]
fn test_limit_ignores_malformed_line_past_window() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("generifs.tsv");
    fs::write(
        &path,
        "9606\t7040\t1\t2008-03-13 08:51\tA\n9606\tBAD\t2\t2008-03-13 08:51\tB\n",
    )
    .unwrap();

    let mut parser = gene_reference::FORMAT.open(&path, Encoding::Utf8).unwrap();
    let mut lines_out = Vec::new();

    let summary = drain(&mut parser, Some(1), |record| {
        lines_out.push(serde_json::to_string(&record).unwrap());
        Ok::<_, ParseError>(())
    })
    .expect("limit should stop before the malformed line");

    assert_eq!(lines_out.len(), 1);
    assert!(lines_out[0].contains("\"gene_id\":7040"));
    assert_eq!(
        summary,
        RunSummary {
            records: 1,
            lines: 1,
            truncated: true
        }
    );
    parser.close();
}

#[test]
fn test_crlf_file_without_final_newline() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("crlf.tsv");
    fs::write(&path, "9606\t7040\t1\t2008-03-13 08:51\tA\r\n9606\t7041\t2\t2008-03-13 08:51\tB\r").unwrap();

    let mut texts = Vec::new();
    let mut parser = gene_reference::FORMAT.open(&path, Encoding::Utf8).unwrap();
    drain(&mut parser, None, |record| {
        texts.push(record.text);
        Ok::<_, ParseError>(())
    })
    .unwrap();

    assert_eq!(texts, vec!["A", "B"]);
}

#[test]
fn test_drain_whole_fixture() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("association.gaf");

    let mut parser = association::FORMAT.open(&path, Encoding::Utf8).unwrap();
    let summary = drain(&mut parser, None, |_| Ok::<_, ParseError>(())).unwrap();

    assert_eq!(summary.records, 3);
    assert_eq!(summary.lines, 8);
    assert!(!summary.truncated);
}

//! Opening local input files
//!
//! Gzip input is recognised by its magic bytes rather than the file
//! extension and decompressed on the fly with `flate2`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::error::{ParseError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open `path` for line reading, decompressing gzip transparently
pub fn open_path(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let open_error = |source: std::io::Error| ParseError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;
    let mut reader = BufReader::new(file);

    let is_gzip = reader.fill_buf().map_err(open_error)?.starts_with(&GZIP_MAGIC);

    if is_gzip {
        debug!(path = %path.display(), "Opened gzip input");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        debug!(path = %path.display(), "Opened plain input");
        Ok(Box::new(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_plain_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a\tb\n").unwrap();

        let mut out = String::new();
        open_path(file.path()).unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "a\tb\n");
    }

    #[test]
    fn test_gzip_detected_by_content() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"line one\nline two\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut file = tempfile::Builder::new().suffix(".dat").tempfile().unwrap();
        file.write_all(&compressed).unwrap();

        let lines: Vec<_> = open_path(file.path())
            .unwrap()
            .lines()
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let mut out = String::new();
        open_path(file.path()).unwrap().read_to_string(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.tsv");

        let err = match open_path(&missing) {
            Ok(_) => panic!("opening a missing file succeeded"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), ErrorKind::Resource);
        assert!(err.to_string().contains("absent.tsv"));
    }
}

//! Refdata Ingest Library
//!
//! Streaming parsers for flat delimited reference-data extracts: gene
//! reference annotations, bibliographic ID mappings, archive file listings and
//! ontology association files.
//!
//! Every format is a [`RecordFormat`] constant. A format builds a
//! [`RecordParser`], which reads one line at a time, holds at most one parsed
//! record as lookahead and stops at the first malformed line.
//!
//! # Example
//!
//! ```no_run
//! use refdata_ingest::formats::association;
//! use refdata_ingest::Encoding;
//!
//! fn main() -> anyhow::Result<()> {
//!     let parser = association::FORMAT.open("./data/goa_human.gaf.gz", Encoding::Utf8)?;
//!     for record in parser {
//!         let record = record?;
//!         println!("{} -> {}", record.object_id, record.ontology_id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod format;
pub mod formats;
pub mod line_source;
pub mod parser;
pub mod run;
pub mod source;
pub mod tokenizer;

pub use config::IngestConfig;
pub use error::{ErrorKind, FieldError, ParseError, Result};
pub use format::{ColumnCount, HeaderRule, RecordFormat};
pub use formats::FormatKind;
pub use line_source::{Encoding, LineOptions, LineSource, RawLine};
pub use parser::RecordParser;
pub use run::{drain, RunSummary};
pub use tokenizer::{split_fields, Tokenizer};

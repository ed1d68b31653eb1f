//! # pdfchunk
//!
//! Split the text of a PDF into a sequence of Markdown files, a fixed
//! number of pages per file.
//!
//! Each file starts with a `# Pages a-b` heading and holds one `## Page n`
//! block per page. A page whose text cannot be extracted still gets its
//! heading, followed by an inline `[Error extracting text: ...]` marker.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfchunk::{split_file, SplitOptions};
//!
//! fn main() -> pdfchunk::Result<()> {
//!     let options = SplitOptions::new("docs").with_prefix("part").with_chunk_size(50);
//!     let report = split_file("book.pdf", &options)?;
//!     println!("Created {} files", report.files_created);
//!     Ok(())
//! }
//! ```

pub mod chunk;
pub mod detect;
pub mod error;
pub mod extractor;
pub mod options;
pub mod render;
pub mod source;

pub use chunk::{Chunk, ChunkPlan};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use extractor::{ChunkRecord, ChunkedExtractor, SplitEvent, SplitReport};
pub use options::{SplitOptions, DEFAULT_CHUNK_SIZE, DEFAULT_PREFIX};
pub use source::{LopdfSource, PageSource};

use std::path::Path;

/// Split a PDF file into chunk files.
///
/// Fails before writing anything if the document cannot be opened.
pub fn split_file<P: AsRef<Path>>(pdf_path: P, options: &SplitOptions) -> Result<SplitReport> {
    options.validate()?;
    let source = LopdfSource::open(pdf_path)?;
    ChunkedExtractor::new(options.clone()).run(&source)
}

/// Split an in-memory PDF into chunk files.
pub fn split_bytes(data: &[u8], options: &SplitOptions) -> Result<SplitReport> {
    options.validate()?;
    let source = LopdfSource::from_bytes(data)?;
    ChunkedExtractor::new(options.clone()).run(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bytes_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = SplitOptions::new(dir.path());

        let result = split_bytes(b"not a pdf at all", &options);
        assert!(matches!(result, Err(Error::UnknownFormat)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_split_file_missing_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let options = SplitOptions::new(dir.path());

        let result = split_file(dir.path().join("missing.pdf"), &options);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_split_validates_before_opening() {
        let options = SplitOptions::new(".").with_chunk_size(0);
        let result = split_file("/nonexistent.pdf", &options);
        assert!(matches!(result, Err(Error::InvalidChunkSize(0))));
    }
}

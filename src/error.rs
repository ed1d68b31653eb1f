//! Error types for pdfchunk.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfchunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while splitting a PDF into chunk files.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Text extraction failed for a single page.
    ///
    /// This is the only recoverable error: the extractor records it inline
    /// in the chunk file and moves on to the next page.
    #[error("Text extraction error on page {page}: {reason}")]
    TextExtract {
        /// 1-based page number
        page: u32,
        /// Description reported by the PDF backend
        reason: String,
    },

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Chunk size must be at least one page.
    #[error("Invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    /// The output directory does not exist or is not a directory.
    #[error("Output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output chunk file could not be created or written.
    #[error("Cannot write {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Whether this error is confined to a single page.
    pub fn is_page_level(&self) -> bool {
        matches!(self, Error::TextExtract { .. })
    }

    /// Description embedded in the chunk file when a page fails.
    ///
    /// For page-level failures this is the backend's own message, without
    /// the page prefix (the page heading already carries the number).
    pub fn page_description(&self) -> String {
        match self {
            Error::TextExtract { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

//! Page source abstraction.
//!
//! Provides a trait-based interface over the document being split,
//! isolating the concrete PDF library (lopdf) from the chunking loop.
//! Text extraction is a per-page `Result`, so one bad page never
//! unwinds past its own block in the output.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};

/// Read-only, indexed access to the pages of a document.
pub trait PageSource {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Extract the text of the page at zero-based `index`.
    fn extract_page(&self, index: u32) -> Result<String>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn extract_page(&self, index: u32) -> Result<String> {
        (**self).extract_page(index)
    }
}

/// Concrete [`PageSource`] backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
    page_count: u32,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(Error::from)?;
        log::info!("Opened {}", path.display());
        Ok(Self::from_document(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(Error::from)?;
        Ok(Self::from_document(doc))
    }

    /// Load from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Wrap an already loaded `lopdf::Document`.
    pub fn from_document(doc: LopdfDocument) -> Self {
        let page_count = doc.get_pages().len() as u32;
        Self { doc, page_count }
    }

    /// PDF version string from the document header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn extract_page(&self, index: u32) -> Result<String> {
        if index >= self.page_count {
            return Err(Error::PageOutOfRange(index + 1, self.page_count));
        }

        // lopdf numbers pages from 1
        let page = index + 1;
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract {
                page,
                reason: e.to_string(),
            })
    }
}

//! Chunk file rendering.
//!
//! Layout of one chunk file:
//!
//! ```text
//! # Pages 1-50
//!
//! ## Page 1
//!
//! {extracted text}
//!
//! ## Page 2
//!
//! [Error extracting text: {description}]
//!
//! ```

use std::io::{self, Write};

use crate::chunk::Chunk;
use crate::source::PageSource;

/// A page whose text could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// 1-based page number
    pub page: u32,
    /// Description written into the chunk file
    pub reason: String,
}

/// What happened while rendering one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkOutcome {
    /// Number of page blocks written (successful or not)
    pub pages_written: u32,
    /// Pages rendered with an error marker instead of text
    pub failures: Vec<PageFailure>,
}

/// Inline marker written in place of text for a failed page.
pub fn error_marker(description: &str) -> String {
    format!("[Error extracting text: {}]", description)
}

/// Write the heading and every page block of `chunk` to `out`.
///
/// Extraction failures are recorded inline and never abort the chunk;
/// only write errors are returned.
pub fn write_chunk<W, S>(out: &mut W, chunk: &Chunk, source: &S) -> io::Result<ChunkOutcome>
where
    W: Write + ?Sized,
    S: PageSource + ?Sized,
{
    let mut outcome = ChunkOutcome::default();

    write!(out, "{}\n\n", chunk.heading())?;

    for index in chunk.pages() {
        let page = index + 1;
        write!(out, "## Page {}\n\n", page)?;

        match source.extract_page(index) {
            Ok(text) => {
                log::debug!("Page {}: {} bytes of text", page, text.len());
                write!(out, "{}\n\n", text)?;
            }
            Err(e) => {
                let reason = e.page_description();
                log::warn!("Failed to extract text from page {}: {}", page, reason);
                write!(out, "{}\n\n", error_marker(&reason))?;
                outcome.failures.push(PageFailure { page, reason });
            }
        }

        outcome.pages_written += 1;
    }

    Ok(outcome)
}

/// Render a chunk into a string.
pub fn render_chunk<S: PageSource + ?Sized>(
    chunk: &Chunk,
    source: &S,
) -> io::Result<(String, ChunkOutcome)> {
    let mut buf = Vec::new();
    let outcome = write_chunk(&mut buf, chunk, source)?;
    Ok((String::from_utf8_lossy(&buf).into_owned(), outcome))
}

/// Check that `text` is a complete rendering of `chunk`.
///
/// Returns the 1-based pages that carry an error marker, or `None` if the
/// range heading differs, any page heading is missing or out of order, or
/// the last block was cut off.
pub fn scan_chunk(text: &str, chunk: &Chunk) -> Option<Vec<u32>> {
    let body = text.strip_prefix(&format!("{}\n\n", chunk.heading()))?;
    if !body.ends_with("\n\n") {
        return None;
    }

    let marker = error_marker("");
    let marker_prefix = marker.trim_end_matches(']');
    let lines: Vec<&str> = body.lines().collect();

    let mut pages = Vec::with_capacity(chunk.len() as usize);
    let mut failed = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        // Page headings only start a block after a blank line.
        if i > 0 && !lines[i - 1].is_empty() {
            continue;
        }
        let Some(page) = line
            .strip_prefix("## Page ")
            .and_then(|n| n.parse::<u32>().ok())
        else {
            continue;
        };

        pages.push(page);
        if lines.get(i + 2).is_some_and(|l| l.starts_with(marker_prefix)) {
            failed.push(page);
        }
    }

    pages
        .iter()
        .copied()
        .eq(chunk.pages().map(|index| index + 1))
        .then_some(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};

    struct Pages {
        count: u32,
        broken: Option<u32>,
    }

    impl PageSource for Pages {
        fn page_count(&self) -> u32 {
            self.count
        }

        fn extract_page(&self, index: u32) -> Result<String> {
            if Some(index) == self.broken {
                return Err(Error::TextExtract {
                    page: index + 1,
                    reason: "unsupported encoding".to_string(),
                });
            }
            Ok(format!("text of page {}", index + 1))
        }
    }

    #[test]
    fn test_render_exact_layout() {
        let source = Pages {
            count: 2,
            broken: None,
        };
        let chunk = Chunk {
            number: 1,
            start: 0,
            end: 2,
        };

        let (text, outcome) = render_chunk(&chunk, &source).unwrap();
        assert_eq!(
            text,
            "# Pages 1-2\n\n## Page 1\n\ntext of page 1\n\n## Page 2\n\ntext of page 2\n\n"
        );
        assert_eq!(outcome.pages_written, 2);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_render_failed_page_keeps_heading() {
        let source = Pages {
            count: 3,
            broken: Some(1),
        };
        let chunk = Chunk {
            number: 1,
            start: 0,
            end: 3,
        };

        let (text, outcome) = render_chunk(&chunk, &source).unwrap();
        assert!(text.contains("## Page 2\n\n[Error extracting text: unsupported encoding]\n\n"));
        assert!(text.contains("## Page 3\n\ntext of page 3\n\n"));
        assert_eq!(outcome.pages_written, 3);
        assert_eq!(
            outcome.failures,
            vec![PageFailure {
                page: 2,
                reason: "unsupported encoding".to_string()
            }]
        );
    }

    #[test]
    fn test_render_offset_chunk() {
        let source = Pages {
            count: 120,
            broken: None,
        };
        let chunk = Chunk {
            number: 3,
            start: 100,
            end: 120,
        };

        let (text, _) = render_chunk(&chunk, &source).unwrap();
        assert!(text.starts_with("# Pages 101-120\n\n## Page 101\n\n"));
        assert_eq!(text.matches("## Page ").count(), 20);
    }

    #[test]
    fn test_write_error_propagates() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let source = Pages {
            count: 1,
            broken: None,
        };
        let chunk = Chunk {
            number: 1,
            start: 0,
            end: 1,
        };
        assert!(write_chunk(&mut Full, &chunk, &source).is_err());
    }

    #[test]
    fn test_scan_complete_chunk() {
        let source = Pages {
            count: 4,
            broken: Some(2),
        };
        let chunk = Chunk {
            number: 1,
            start: 0,
            end: 4,
        };

        let (text, _) = render_chunk(&chunk, &source).unwrap();
        assert_eq!(scan_chunk(&text, &chunk), Some(vec![3]));
    }

    #[test]
    fn test_scan_rejects_partial_chunk() {
        let chunk = Chunk {
            number: 1,
            start: 0,
            end: 5,
        };

        assert_eq!(scan_chunk("# Pages 1-5\n\n", &chunk), None);
        assert_eq!(scan_chunk("# Pages 1-5\n\n## Page 1\n\nBo", &chunk), None);
        assert_eq!(
            scan_chunk("# Pages 1-5\n\n## Page 1\n\none\n\n## Page 2\n\ntwo\n\n", &chunk),
            None
        );
    }

    #[test]
    fn test_scan_rejects_wrong_range() {
        let source = Pages {
            count: 3,
            broken: None,
        };
        let written = Chunk {
            number: 1,
            start: 0,
            end: 3,
        };
        let expected = Chunk {
            number: 1,
            start: 0,
            end: 2,
        };

        let (text, _) = render_chunk(&written, &source).unwrap();
        assert_eq!(scan_chunk(&text, &expected), None);
    }

    #[test]
    fn test_scan_ignores_heading_like_text() {
        let chunk = Chunk {
            number: 1,
            start: 0,
            end: 1,
        };
        let text = "# Pages 1-1\n\n## Page 1\n\nsee\n## Page 9\n\n";
        assert_eq!(scan_chunk(text, &chunk), Some(vec![]));
    }

    #[test]
    fn test_error_marker() {
        assert_eq!(error_marker("boom"), "[Error extracting text: boom]");
    }
}

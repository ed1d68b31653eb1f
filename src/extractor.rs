//! The chunked extractor.
//!
//! Walks a [`ChunkPlan`] over a [`PageSource`] and writes one Markdown file
//! per chunk. The document is held for the whole run; each output file is
//! opened, written, flushed and closed before the next one is created.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::chunk::{Chunk, ChunkPlan};
use crate::error::{Error, Result};
use crate::options::SplitOptions;
use crate::render::{scan_chunk, write_chunk, ChunkOutcome};
use crate::source::PageSource;

/// Progress notification emitted while splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitEvent<'a> {
    /// The document was opened and the chunks planned.
    Started { total_pages: u32, chunk_count: usize },

    /// A page's text could not be extracted; an error marker was written.
    PageFailed { page: u32, reason: &'a str },

    /// A chunk file was written and closed.
    ChunkWritten { path: &'a Path, chunk: Chunk },

    /// A complete chunk file for this range already existed and was left alone.
    ChunkSkipped { path: &'a Path, chunk: Chunk },

    /// All chunks are done.
    Finished {
        files_created: usize,
        files_skipped: usize,
    },
}

/// Per-file entry of a [`SplitReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkRecord {
    /// Path of the chunk file
    pub path: PathBuf,
    /// First page in the file (1-based)
    pub first_page: u32,
    /// Last page in the file (1-based, inclusive)
    pub last_page: u32,
    /// Whether the file was left untouched by a resumed run
    pub skipped: bool,
    /// Pages written with an error marker
    pub failed_pages: Vec<u32>,
}

/// Summary of a finished split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub total_pages: u32,
    pub chunk_size: usize,
    /// Files written by this run
    pub files_created: usize,
    /// Files kept from a previous run (resume only)
    pub files_skipped: usize,
    /// Every page written with an error marker, in page order
    pub failed_pages: Vec<u32>,
    pub chunks: Vec<ChunkRecord>,
}

impl SplitReport {
    /// Paths of all chunk files, in chunk order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.chunks.iter().map(|c| c.path.as_path())
    }

    /// True when every page produced text.
    pub fn is_clean(&self) -> bool {
        self.failed_pages.is_empty()
    }
}

/// Splits a document into fixed-size chunk files.
///
/// # Example
///
/// ```no_run
/// use pdfchunk::{ChunkedExtractor, LopdfSource, SplitOptions};
///
/// let source = LopdfSource::open("book.pdf")?;
/// let extractor = ChunkedExtractor::new(SplitOptions::new("docs").with_chunk_size(25));
/// let report = extractor.run(&source)?;
/// println!("Created {} files", report.files_created);
/// # Ok::<(), pdfchunk::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedExtractor {
    options: SplitOptions,
}

impl ChunkedExtractor {
    pub fn new(options: SplitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Plan the chunks for a document without writing anything.
    pub fn plan<S: PageSource + ?Sized>(&self, source: &S) -> Result<ChunkPlan> {
        ChunkPlan::new(source.page_count(), self.options.chunk_size)
    }

    /// Split `source` into chunk files.
    pub fn run<S: PageSource + ?Sized>(&self, source: &S) -> Result<SplitReport> {
        self.run_with_progress(source, |_| {})
    }

    /// Split `source` into chunk files, reporting progress to `on_event`.
    ///
    /// Page-level extraction failures are written inline and reported as
    /// [`SplitEvent::PageFailed`]. Failing to create or write a chunk file
    /// aborts the run; files from earlier chunks stay on disk.
    pub fn run_with_progress<S, F>(&self, source: &S, mut on_event: F) -> Result<SplitReport>
    where
        S: PageSource + ?Sized,
        F: FnMut(&SplitEvent<'_>),
    {
        self.options.validate()?;
        check_output_dir(self.options.output_dir())?;

        let plan = self.plan(source)?;
        log::info!(
            "Splitting {} pages into {} chunk(s) of up to {} pages",
            plan.total_pages(),
            plan.len(),
            plan.chunk_size()
        );
        on_event(&SplitEvent::Started {
            total_pages: plan.total_pages(),
            chunk_count: plan.len(),
        });

        let mut report = SplitReport {
            total_pages: plan.total_pages(),
            chunk_size: self.options.chunk_size,
            ..SplitReport::default()
        };

        for chunk in &plan {
            let path = self.options.output_path(chunk.number);

            if self.options.resume {
                if let Some(failed_pages) = kept_chunk_failures(&path, &chunk) {
                    log::info!("Skipping {} (pages {}), already written", path.display(), chunk);
                    on_event(&SplitEvent::ChunkSkipped {
                        path: &path,
                        chunk,
                    });
                    report.files_skipped += 1;
                    report.failed_pages.extend_from_slice(&failed_pages);
                    report.chunks.push(ChunkRecord {
                        path,
                        first_page: chunk.first_page(),
                        last_page: chunk.last_page(),
                        skipped: true,
                        failed_pages,
                    });
                    continue;
                }
            }

            let failed_pages = write_chunk_file(&path, &chunk, source, &mut on_event)?;

            log::info!("Created {} (pages {})", path.display(), chunk);
            on_event(&SplitEvent::ChunkWritten {
                path: &path,
                chunk,
            });

            report.files_created += 1;
            report.failed_pages.extend_from_slice(&failed_pages);
            report.chunks.push(ChunkRecord {
                path,
                first_page: chunk.first_page(),
                last_page: chunk.last_page(),
                skipped: false,
                failed_pages,
            });
        }

        on_event(&SplitEvent::Finished {
            files_created: report.files_created,
            files_skipped: report.files_skipped,
        });

        Ok(report)
    }
}

/// Write one chunk file and return the 1-based pages that failed.
///
/// The chunk is written to a `.tmp` sibling and renamed into place, so a
/// file under the final name is always complete.
fn write_chunk_file<S, F>(
    path: &Path,
    chunk: &Chunk,
    source: &S,
    on_event: &mut F,
) -> Result<Vec<u32>>
where
    S: PageSource + ?Sized,
    F: FnMut(&SplitEvent<'_>),
{
    let to_error = |source: io::Error| Error::CreateOutput {
        path: path.to_path_buf(),
        source,
    };

    let tmp_path = partial_path(path);
    let written = write_partial(&tmp_path, chunk, source)
        .and_then(|outcome| fs::rename(&tmp_path, path).map(|()| outcome));
    let outcome = match written {
        Ok(outcome) => outcome,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(to_error(e));
        }
    };

    for failure in &outcome.failures {
        on_event(&SplitEvent::PageFailed {
            page: failure.page,
            reason: &failure.reason,
        });
    }

    Ok(outcome.failures.into_iter().map(|f| f.page).collect())
}

fn write_partial<S: PageSource + ?Sized>(
    tmp_path: &Path,
    chunk: &Chunk,
    source: &S,
) -> io::Result<ChunkOutcome> {
    let mut writer = BufWriter::new(File::create(tmp_path)?);
    let outcome = write_chunk(&mut writer, chunk, source)?;
    writer.flush()?;
    Ok(outcome)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn check_output_dir(dir: &Path) -> Result<()> {
    let metadata = fs::metadata(dir).map_err(|source| Error::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(Error::OutputDir {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "not a directory"),
        });
    }
    Ok(())
}

/// Failed pages of an existing chunk file, or `None` if the file is
/// missing or is not a complete rendering of `chunk`.
fn kept_chunk_failures(path: &Path, chunk: &Chunk) -> Option<Vec<u32>> {
    let text = fs::read_to_string(path).ok()?;
    scan_chunk(&text, chunk)
}

//! Chunk planning.
//!
//! A [`ChunkPlan`] partitions the zero-based page indices `[0, total)` into
//! contiguous half-open windows of at most `chunk_size` pages. Only the
//! last window may be shorter.

use serde::Serialize;
use std::ops::Range;

use crate::error::{Error, Result};

/// A contiguous run of pages written to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// 1-based sequence number, used in the output file name
    pub number: usize,
    /// First page index (zero-based, inclusive)
    pub start: u32,
    /// One past the last page index (zero-based, exclusive)
    pub end: u32,
}

impl Chunk {
    /// Number of pages in the chunk.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Always false for chunks produced by a plan.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// First page as a 1-based page number.
    pub fn first_page(&self) -> u32 {
        self.start + 1
    }

    /// Last page as a 1-based page number (inclusive).
    pub fn last_page(&self) -> u32 {
        self.end
    }

    /// Zero-based page indices covered by the chunk.
    pub fn pages(&self) -> Range<u32> {
        self.start..self.end
    }

    /// Top-level heading written at the start of the chunk file.
    pub fn heading(&self) -> String {
        format!("# Pages {}-{}", self.first_page(), self.last_page())
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first_page(), self.last_page())
    }
}

/// Ordered partition of a document's pages into chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    total_pages: u32,
    chunk_size: u32,
}

impl ChunkPlan {
    /// Plan chunks for `total_pages` pages, `chunk_size` pages per chunk.
    pub fn new(total_pages: u32, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize(chunk_size));
        }
        // A chunk larger than the page index space is the same as one chunk.
        let chunk_size = u32::try_from(chunk_size).unwrap_or(u32::MAX);
        Ok(Self {
            total_pages,
            chunk_size,
        })
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Number of chunks, `ceil(total_pages / chunk_size)`.
    pub fn len(&self) -> usize {
        self.total_pages.div_ceil(self.chunk_size) as usize
    }

    /// True when the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Iterate the chunks in page order.
    pub fn iter(&self) -> ChunkIter {
        ChunkIter {
            plan: *self,
            next_number: 1,
            start: 0,
        }
    }
}

impl IntoIterator for ChunkPlan {
    type Item = Chunk;
    type IntoIter = ChunkIter;

    fn into_iter(self) -> ChunkIter {
        self.iter()
    }
}

impl IntoIterator for &ChunkPlan {
    type Item = Chunk;
    type IntoIter = ChunkIter;

    fn into_iter(self) -> ChunkIter {
        self.iter()
    }
}

/// Iterator over the chunks of a [`ChunkPlan`].
#[derive(Debug, Clone)]
pub struct ChunkIter {
    plan: ChunkPlan,
    next_number: usize,
    start: u32,
}

impl Iterator for ChunkIter {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.start >= self.plan.total_pages {
            return None;
        }

        let end = self
            .start
            .saturating_add(self.plan.chunk_size)
            .min(self.plan.total_pages);
        let chunk = Chunk {
            number: self.next_number,
            start: self.start,
            end,
        };

        self.next_number += 1;
        self.start = end;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.total_pages.saturating_sub(self.start);
        let n = remaining.div_ceil(self.plan.chunk_size) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ChunkIter {}

//! Split options and configuration.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default number of pages per chunk file.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Default output file name prefix.
pub const DEFAULT_PREFIX: &str = "part";

/// Options for splitting a PDF into chunk files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Directory the chunk files are written to (must exist)
    pub output_dir: PathBuf,

    /// Prefix of every chunk file name
    pub output_prefix: String,

    /// Maximum number of pages per chunk file
    pub chunk_size: usize,

    /// Skip chunks whose file already exists with the expected heading
    pub resume: bool,
}

impl SplitOptions {
    /// Create options writing into `output_dir` with default prefix and size.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            output_prefix: DEFAULT_PREFIX.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            resume: false,
        }
    }

    /// Set the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Set the number of pages per chunk.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Enable or disable resuming over existing chunk files.
    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// Check the options before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }

    /// Path of the chunk file with 1-based sequence number `chunk_number`.
    ///
    /// Numbers are not zero-padded: `part10.md` sorts before `part2.md`.
    pub fn output_path(&self, chunk_number: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.md", self.output_prefix, chunk_number))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SplitOptions::new("docs");
        assert_eq!(options.output_prefix, "part");
        assert_eq!(options.chunk_size, 50);
        assert!(!options.resume);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = SplitOptions::new("out")
            .with_prefix("chapter")
            .with_chunk_size(10)
            .with_resume(true);

        assert_eq!(options.output_prefix, "chapter");
        assert_eq!(options.chunk_size, 10);
        assert!(options.resume);
    }

    #[test]
    fn test_zero_chunk_size_invalid() {
        let options = SplitOptions::new("out").with_chunk_size(0);
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidChunkSize(0))
        ));
    }

    #[test]
    fn test_output_path_not_padded() {
        let options = SplitOptions::new("/tmp/docs");
        assert_eq!(options.output_path(1), PathBuf::from("/tmp/docs/part1.md"));
        assert_eq!(
            options.output_path(12),
            PathBuf::from("/tmp/docs/part12.md")
        );
    }

    #[test]
    fn test_empty_prefix() {
        let options = SplitOptions::new("out").with_prefix("");
        assert_eq!(options.output_path(3), PathBuf::from("out/3.md"));
    }
}

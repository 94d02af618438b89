use crate::error::{LogSiftError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The result record conveyed back to the caller: `changed` is true iff the
/// output file exists after the run, and `output` is populated only in that
/// case. The default value doubles as the dry-run and failure record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub changed: bool,
    pub output: Option<PathBuf>,
}

impl MatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn from_output_path(path: &Path) -> Self {
        if path.exists() {
            Self {
                changed: true,
                output: Some(path.to_path_buf()),
            }
        } else {
            Self::unchanged()
        }
    }
}

/// Write half of the extraction. Owns the output stream for the whole run;
/// dropped on every exit path, success or failure.
pub struct OutputSink {
    writer: BufWriter<File>,
    path: PathBuf,
    bytes_written: u64,
}

impl OutputSink {
    /// Truncate-on-open: pre-existing content is discarded before any input
    /// file has been read.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| LogSiftError::OutputCreate {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            bytes_written: 0,
        })
    }

    pub fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.writer
            .write_all(record)
            .map_err(|source| LogSiftError::OutputCreate {
                path: self.path.clone(),
                source,
            })?;
        self.bytes_written += record.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes and closes the stream, then derives the result record from
    /// the state of the output path.
    pub fn finish(mut self) -> Result<MatchResult> {
        self.writer
            .flush()
            .map_err(|source| LogSiftError::OutputCreate {
                path: self.path.clone(),
                source,
            })?;

        let path = self.path.clone();
        drop(self);

        Ok(MatchResult::from_output_path(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_truncates_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.log");
        fs::write(&output, "stale content that must disappear").unwrap();

        let sink = OutputSink::create(&output).unwrap();
        let result = sink.finish().unwrap();

        assert!(result.changed);
        assert_eq!(fs::read(&output).unwrap(), b"");
    }

    #[test]
    fn test_records_are_written_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.log");

        let mut sink = OutputSink::create(&output).unwrap();
        sink.write_record(b"first\n").unwrap();
        sink.write_record(b"second\r\n").unwrap();
        sink.write_record(b"no terminator").unwrap();
        assert_eq!(sink.bytes_written(), 27);

        let result = sink.finish().unwrap();
        assert_eq!(result.output.as_deref(), Some(output.as_path()));
        assert_eq!(fs::read(&output).unwrap(), b"first\nsecond\r\nno terminator");
    }

    #[test]
    fn test_create_fails_with_fixed_message() {
        let result = OutputSink::create("/nonexistent/parent/out.log");

        match result {
            Err(error) => assert_eq!(error.to_string(), "File could not be created"),
            Ok(_) => panic!("creating a sink under a missing parent must fail"),
        }
    }

    #[test]
    fn test_default_result_is_unchanged() {
        let result = MatchResult::unchanged();
        assert!(!result.changed);
        assert!(result.output.is_none());
    }

    #[test]
    fn test_result_for_missing_path_is_unchanged() {
        let result = MatchResult::from_output_path(Path::new("/nonexistent/out.log"));
        assert_eq!(result, MatchResult::unchanged());
    }
}

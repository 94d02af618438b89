use crate::error::{LogSiftError, Result};
use crate::extractor::output_sink::{MatchResult, OutputSink};
use crate::scanner::LogFile;
use regex::bytes::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// The immutable inputs of one extraction run, assembled once at the
/// boundary from CLI arguments merged over the configuration.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub root: PathBuf,
    pub output: PathBuf,
    pub keyword: String,
    pub file_extension: String,
}

impl SearchRequest {
    pub fn new<R, O, K, E>(root: R, output: O, keyword: K, file_extension: E) -> Self
    where
        R: Into<PathBuf>,
        O: Into<PathBuf>,
        K: Into<String>,
        E: Into<String>,
    {
        Self {
            root: root.into(),
            output: output.into(),
            keyword: keyword.into(),
            file_extension: file_extension.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub lines_matched: u64,
    pub bytes_written: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            lines_matched: 0,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn start_file(&mut self, filename: String) {
        self.current_file = Some(filename);
    }

    pub fn finish_file(&mut self, lines_matched: u64) {
        self.files_processed += 1;
        self.lines_matched += lines_matched;
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_processed as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Scans candidate files line by line and streams every matching line to
/// the output sink. Matching is byte-oriented, so files that are not valid
/// UTF-8 are still searched.
pub struct LineExtractor {
    request: SearchRequest,
    pattern: Regex,
}

impl LineExtractor {
    pub fn new(request: SearchRequest) -> Result<Self> {
        let pattern =
            Regex::new(&request.keyword).map_err(|source| LogSiftError::InvalidPattern {
                pattern: request.keyword.clone(),
                source,
            })?;

        Ok(Self { request, pattern })
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Runs the extraction over the already-ordered candidate list. The
    /// output is opened (and truncated) before the first file is read; a
    /// read failure aborts the run and leaves a partial output file behind.
    pub fn run(
        &self,
        files: &[LogFile],
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<(MatchResult, ExtractionProgress)> {
        let mut sink = OutputSink::create(&self.request.output)?;
        let mut progress = ExtractionProgress::new(files.len());

        for file in files {
            progress.start_file(file.display_path());
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let lines_matched = self.scan_file(&file.source_path, &mut sink)?;
            progress.finish_file(lines_matched);
        }

        progress.bytes_written = sink.bytes_written();
        progress.current_file = None;
        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        let result = sink.finish()?;
        Ok((result, progress))
    }

    fn scan_file(&self, path: &Path, sink: &mut OutputSink) -> Result<u64> {
        let file = File::open(path).map_err(|source| LogSiftError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let mut record = Vec::new();
        let mut lines_matched = 0u64;

        loop {
            record.clear();
            let bytes_read =
                reader
                    .read_until(b'\n', &mut record)
                    .map_err(|source| LogSiftError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;

            if bytes_read == 0 {
                break;
            }

            if self.pattern.is_match(match_target(&record)) {
                sink.write_record(&record)?;
                lines_matched += 1;
            }
        }

        Ok(lines_matched)
    }
}

// The terminator is excluded from the match target but preserved in the
// written record.
fn match_target(record: &[u8]) -> &[u8] {
    let record = record.strip_suffix(b"\n").unwrap_or(record);
    record.strip_suffix(b"\r").unwrap_or(record)
}

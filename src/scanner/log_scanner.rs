use crate::config::FilterConfig;
use crate::error::{LogSiftError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct LogFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub size: u64,
}

impl LogFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        Self {
            source_path,
            relative_path,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

pub struct LogScanner {
    filter: FileFilter,
    follow_symlinks: bool,
}

impl LogScanner {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            follow_symlinks: config.follow_symlinks,
        }
    }

    /// Collects every candidate file under `root`, recursing without a depth
    /// limit. Any entry the walk cannot read aborts the scan. The result is
    /// sorted by relative path so the extraction order is deterministic
    /// across runs.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<LogFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(LogSiftError::InvalidPath {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(LogSiftError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut files = Vec::new();

        let walker = WalkDir::new(root_path).follow_links(self.follow_symlinks);

        for entry in walker {
            let entry = entry.map_err(|err| walk_error(err, root_path))?;

            if !entry.file_type().is_file() {
                continue;
            }

            if !self.filter.matches_file_name(entry.file_name()) {
                continue;
            }

            let metadata = entry.metadata().map_err(|err| walk_error(err, root_path))?;

            let relative_path = entry
                .path()
                .strip_prefix(root_path)
                .map_err(|_| LogSiftError::InvalidPath {
                    path: format!(
                        "Cannot calculate relative path for {} from root {}",
                        entry.path().display(),
                        root_path.display()
                    ),
                })?
                .to_path_buf();

            files.push(LogFile::new(
                entry.path().to_path_buf(),
                relative_path,
                metadata.len(),
            ));
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        Ok(files)
    }

    pub fn get_statistics(&self, files: &[LogFile]) -> ScanStatistics {
        ScanStatistics {
            total_files: files.len(),
            total_bytes: files.iter().map(|f| f.size).sum(),
        }
    }
}

fn walk_error(err: walkdir::Error, root_path: &Path) -> LogSiftError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root_path.to_path_buf());

    match err.into_io_error() {
        Some(source) => LogSiftError::Read { path, source },
        // Symlink loops have no io::Error behind them.
        None => LogSiftError::InvalidPath {
            path: path.display().to_string(),
        },
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_bytes: u64,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        format!(
            "Scan results: {} candidate files, {} bytes",
            self.total_files, self.total_bytes
        )
    }
}

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FilterConfig};
pub use error::{LogSiftError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{ExtractionProgress, LineExtractor, MatchResult, OutputSink, SearchRequest};
pub use scanner::{FileFilter, LogFile, LogScanner, ScanStatistics};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for LogSift functionality
pub struct LogSift {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl LogSift {
    /// Create a new LogSift instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create LogSift instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Run one extraction: walk the tree, match lines, stream them to the
    /// output file, and return the result record.
    pub fn extract(&self, request: SearchRequest) -> Result<MatchResult> {
        self.output_formatter.start_operation("Scanning directory tree");

        // The request carries the (possibly CLI-overridden) suffix; the
        // walk behavior still comes from the configuration.
        let filter = FilterConfig {
            file_extension: request.file_extension.clone(),
            follow_symlinks: self.config.filter.follow_symlinks,
        };
        let scanner = LogScanner::new(&filter);

        let spinner = self.progress_manager.create_scan_spinner("Collecting candidate files");
        let scan_outcome = scanner.scan_directory(&request.root);
        spinner.finish_and_clear();
        let files = scan_outcome?;

        let stats = scanner.get_statistics(&files);
        self.output_formatter.debug(&stats.display_summary());
        self.output_formatter
            .info(&format!("Found {} candidate files", files.len()));

        self.output_formatter.start_operation("Extracting matching lines");

        let extractor = LineExtractor::new(request)?;
        let file_progress = self.progress_manager.create_file_progress(files.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ExtractionProgress| {
                pb.set_position(progress.files_processed as u64);
                if let Some(ref current) = progress.current_file {
                    pb.set_message(current.clone());
                }
            }
        };

        let run_outcome = extractor.run(&files, Some(&progress_callback));
        file_progress.finish_and_clear();
        let (result, progress) = run_outcome?;

        self.output_formatter.print_match_summary(&progress);

        Ok(result)
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Get progress manager reference
    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &LogSiftError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to extract matching lines with minimal setup
pub fn extract_lines_simple<R, O>(root: R, output: O, keyword: &str) -> Result<MatchResult>
where
    R: AsRef<Path>,
    O: AsRef<Path>,
{
    let config = Config::default();
    let request = SearchRequest::new(
        root.as_ref(),
        output.as_ref(),
        keyword,
        config.filter.file_extension.clone(),
    );

    let logsift = LogSift::new(config, OutputMode::Plain, 0, true);
    logsift.extract(request)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogSift {} ({}) built on {} for {}",
            self.version, self.git_hash, self.build_date, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_logsift_creation() {
        let config = Config::default();
        let logsift = LogSift::new(config, OutputMode::Plain, 0, true);

        assert_eq!(logsift.config().filter.file_extension, ".log");
    }

    #[test]
    fn test_extract_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("logs");
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("app.log"), "ERROR first\nINFO skip\n").unwrap();
        fs::write(root.join("nested").join("svc.log"), "ERROR second\n").unwrap();
        fs::write(root.join("ignored.txt"), "ERROR not scanned\n").unwrap();

        let output = temp_dir.path().join("out.log");
        let logsift = LogSift::new(Config::default(), OutputMode::Plain, 0, true);
        let request = SearchRequest::new(&root, &output, "ERROR", ".log");

        let result = logsift.extract(request).unwrap();

        assert!(result.changed);
        assert_eq!(result.output.as_deref(), Some(output.as_path()));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "ERROR first\nERROR second\n"
        );
    }

    #[test]
    fn test_extract_lines_simple() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("logs");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.log"), "needle in here\nhay\n").unwrap();

        let output = temp_dir.path().join("out.log");
        let result = extract_lines_simple(&root, &output, "needle").unwrap();

        assert!(result.changed);
        assert_eq!(fs::read_to_string(&output).unwrap(), "needle in here\n");
    }

    #[test]
    fn test_extract_surfaces_scan_failure() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out.log");

        let logsift = LogSift::new(Config::default(), OutputMode::Plain, 0, true);
        let request = SearchRequest::new("/nonexistent/logsift-root", &output, "x", ".log");

        let result = logsift.extract(request);
        assert!(matches!(result, Err(LogSiftError::InvalidPath { .. })));
        // The scan failed before the sink was opened.
        assert!(!output.exists());
    }

    #[test]
    fn test_version_info() {
        let version = version_info();
        assert!(!version.is_empty());

        let build_info = build_info();
        assert!(!build_info.version.is_empty());
        assert!(!build_info.target.is_empty());
    }

    #[test]
    fn test_build_info_display() {
        let build_info = build_info();
        let display_string = build_info.to_string();
        assert!(display_string.contains("LogSift"));
        assert!(display_string.contains(build_info.version));
    }
}

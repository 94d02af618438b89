use crate::config::{CliOverrides, Config};
use crate::error::{LogSiftError, Result};
use crate::extractor::SearchRequest;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract matching lines from log trees")]
#[command(
    long_about = "LogSift walks a directory tree, scans every file whose name ends with the \
                  configured suffix, and writes each line matching the keyword pattern to a \
                  single output file."
)]
#[command(after_help = "EXAMPLES:\n  \
    logsift /var/log/app1 --keyword Error --output /tmp/errors.log\n  \
    logsift /var/log --keyword 'timeout|refused' --output /tmp/net.log --file-extension .txt\n  \
    logsift /srv/logs --keyword '^WARN' --output warns.log --output-format json --quiet\n")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Root directory to search
    #[arg(required_unless_present = "generate_config")]
    pub path: Option<PathBuf>,

    /// Destination file for matched lines (truncated and rewritten)
    #[arg(short, long, required_unless_present = "generate_config")]
    pub output: Option<PathBuf>,

    /// Regular-expression pattern to search each line for
    #[arg(
        short,
        long,
        value_parser = validate_keyword_pattern,
        required_unless_present = "generate_config"
    )]
    pub keyword: Option<String>,

    /// Suffix filter for file names to include (default: .log)
    #[arg(short = 'e', long, help = "File-name suffix to include (e.g. .log, .txt)")]
    pub file_extension: Option<String>,

    /// Follow symlinked directories during the walk
    #[arg(long, help = "Follow symlinked directories (off by default)")]
    pub follow_symlinks: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without writing anything)
    #[arg(long, help = "Show what would be extracted without writing the output file")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        // The flag only overrides the config when actually given.
        let follow = if self.follow_symlinks { Some(true) } else { None };

        CliOverrides::new()
            .with_file_extension(self.file_extension.clone())
            .with_follow_symlinks(follow)
    }

    /// Assembles the immutable run input from the parsed arguments and the
    /// merged configuration.
    pub fn build_search_request(&self, config: &Config) -> Result<SearchRequest> {
        let path = self.path.as_ref().ok_or_else(|| missing_argument("path"))?;
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| missing_argument("output"))?;
        let keyword = self
            .keyword
            .as_ref()
            .ok_or_else(|| missing_argument("keyword"))?;

        Ok(SearchRequest::new(
            path,
            output,
            keyword.clone(),
            config.filter.file_extension.clone(),
        ))
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

fn missing_argument(name: &str) -> LogSiftError {
    LogSiftError::Config {
        message: format!("Missing required argument: {}", name),
    }
}

pub fn validate_keyword_pattern(s: &str) -> std::result::Result<String, String> {
    regex::bytes::Regex::new(s).map_err(|e| format!("not a valid regular expression: {}", e))?;
    Ok(s.to_string())
}

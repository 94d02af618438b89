use clap::Parser;
use logsift::{
    Cli, LogSift, LogSiftError, MatchResult, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let logsift = match LogSift::from_cli(&cli) {
        Ok(logsift) => logsift,
        Err(e) => {
            print_startup_error(&e);
            return 6;
        }
    };

    let request = match cli.build_search_request(logsift.config()) {
        Ok(request) => request,
        Err(e) => {
            logsift.handle_error(&e);
            return 6;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&request, &logsift);
    }

    match logsift.extract(request) {
        Ok(result) => {
            logsift.output_formatter().print_match_result(&result);
            0
        }
        Err(e) => {
            logsift.handle_error(&e);

            // Failure still conveys the (default) result record.
            logsift
                .output_formatter()
                .print_match_result(&MatchResult::unchanged());

            match e {
                LogSiftError::InvalidPattern { .. } => 2,
                LogSiftError::InvalidPath { .. } => 3,
                LogSiftError::OutputCreate { .. } => 4,
                LogSiftError::Read { .. } => 5,
                LogSiftError::Config { .. } => 6,
                _ => 1,
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "logsift.toml".to_string());

    match logsift::Config::default().save_to_file(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  logsift <path> -k <keyword> -o <output> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(request: &logsift::SearchRequest, logsift: &LogSift) -> i32 {
    let formatter = logsift.output_formatter();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    formatter.info("Search plan:");
    println!("  Root directory: {}", request.root.display());
    println!("  Output file:    {}", request.output.display());
    println!("  Keyword:        {}", request.keyword);
    println!("  Suffix filter:  {}", request.file_extension);
    println!(
        "  Follow symlinks: {}",
        logsift.config().filter.follow_symlinks
    );

    formatter.print_separator();

    // Simulation only: nothing was written, so the default record goes back.
    formatter.print_match_result(&MatchResult::unchanged());

    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform the extraction");

    0
}

fn print_startup_error(error: &LogSiftError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

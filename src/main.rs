use clap::Parser;
use mailsift::source::remote::validate_remote_url;
use mailsift::{
    Cli, Config, MailSift, MailSiftError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(&cli);

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let mailsift = match MailSift::from_cli(&cli) {
        Ok(mailsift) => mailsift,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &mailsift);
    }

    let result = mailsift
        .request_from_cli(&cli)
        .and_then(|request| mailsift.run(&request));

    match result {
        Ok(report) => {
            mailsift.output_formatter().print_extraction_report(&report);
            0
        }
        Err(e) => {
            tracing::debug!(error = ?e, "extraction aborted");
            mailsift.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &MailSiftError) -> i32 {
    match error {
        MailSiftError::InvalidUrl { .. } => 2,
        MailSiftError::MissingInput { .. } => 3,
        MailSiftError::Permission { .. } => 4,
        MailSiftError::Network { .. } | MailSiftError::HttpStatus { .. } => 5,
        MailSiftError::Timeout { .. } => 6,
        MailSiftError::Config { .. } => 7,
        MailSiftError::Io(_) => 8,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "mailsift.toml".to_string());

    match MailSift::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  mailsift <input> <output> --config {}", config_path);
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

fn handle_dry_run(cli: &Cli, mailsift: &MailSift) -> i32 {
    let formatter = mailsift.output_formatter();

    formatter.notice("DRY RUN MODE - nothing will be fetched or written");
    formatter.print_separator();

    let (input, output) = match (&cli.input, &cli.output) {
        (Some(input), Some(output)) => (input, output),
        _ => {
            formatter.error("Both INPUT and OUTPUT paths are required");
            return 1;
        }
    };

    if !input.is_file() {
        let error = MailSiftError::MissingInput {
            path: input.display().to_string(),
        };
        formatter.print_user_friendly_error(&error);
        return exit_code_for(&error);
    }
    formatter.success(&format!("Input file found: {}", input.display()));

    if let Some(ref url) = cli.url {
        if let Err(e) = validate_remote_url(url) {
            formatter.print_user_friendly_error(&e);
            return exit_code_for(&e);
        }
        formatter.success(&format!("Remote URL is valid: {}", url));
    }

    print_plan(formatter, mailsift.config(), cli);
    formatter.print_separator();
    formatter.notice(&format!(
        "Run without --dry-run to write results to {}",
        output.display()
    ));

    0
}

fn print_plan(formatter: &OutputFormatter, config: &Config, cli: &Cli) {
    if formatter.mode() == OutputMode::Json {
        let plan = serde_json::json!({
            "type": "plan",
            "input": cli.input,
            "output": cli.output,
            "remote_url": cli.url,
            "timeout_secs": config.fetch.timeout,
            "create_parent_dirs": config.output.create_parent_dirs,
        });
        println!("{}", serde_json::to_string_pretty(&plan).unwrap_or_else(|_| "{}".to_string()));
        return;
    }

    formatter.print_header("Extraction plan");
    if let (Some(input), Some(output)) = (&cli.input, &cli.output) {
        println!("  Input:  {}", input.display());
        println!("  Output: {}", output.display());
    }
    match cli.url {
        Some(ref url) => {
            println!("  Remote: {}", url);
            println!("  Timeout: {} seconds", config.fetch.timeout);
            println!("  User agent: {}", config.fetch.user_agent);
        }
        None => println!("  Remote: none"),
    }
    println!("  Create parent dirs: {}", config.output.create_parent_dirs);
}

fn print_startup_error(error: &MailSiftError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match cli.verbosity_level() {
        0 => "mailsift=warn",
        1 => "mailsift=info",
        _ => "mailsift=debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsift::OutputFormat;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cli_with(input: Option<PathBuf>, output: Option<PathBuf>, url: Option<&str>) -> Cli {
        Cli {
            input,
            output,
            url: url.map(str::to_string),
            timeout: None,
            config: None,
            output_format: OutputFormat::Plain,
            create_dirs: false,
            verbose: 0,
            quiet: true,
            dry_run: true,
            generate_config: false,
        }
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut cli = cli_with(None, None, None);
        cli.config = Some(config_path.clone());
        cli.generate_config = true;
        cli.dry_run = false;

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[fetch]"));
    }

    #[test]
    fn test_dry_run_mode() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.txt");
        let output = temp_dir.path().join("out.txt");
        fs::write(&input, "a@b.c").unwrap();

        let mailsift = MailSift::new(Config::default(), OutputMode::Plain, 0, true);
        let cli = cli_with(Some(input), Some(output.clone()), Some("https://example.com/x"));

        assert_eq!(handle_dry_run(&cli, &mailsift), 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_dry_run_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let mailsift = MailSift::new(Config::default(), OutputMode::Plain, 0, true);
        let cli = cli_with(
            Some(temp_dir.path().join("missing.txt")),
            Some(temp_dir.path().join("out.txt")),
            None,
        );

        assert_eq!(handle_dry_run(&cli, &mailsift), 3);
    }

    #[test]
    fn test_exit_codes() {
        let url = "https://example.com".to_string();
        assert_eq!(
            exit_code_for(&MailSiftError::MissingInput { path: "x".to_string() }),
            3
        );
        assert_eq!(
            exit_code_for(&MailSiftError::HttpStatus { url: url.clone(), status: 500 }),
            5
        );
        assert_eq!(
            exit_code_for(&MailSiftError::Timeout { url, seconds: 1.0 }),
            6
        );
    }
}

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use log::LevelFilter;
use proofreader::cli::output::{self, OutputFormat};
use proofreader::source::{read_file_list, SourceLoader};
use proofreader::{dict, Config, Proofreader};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "proofreader")]
#[command(version, about = "Proofread HTML and Markdown documents for spelling and style", long_about = None)]
struct Cli {
    /// URL of a page that should be proofread
    #[arg(short, long, value_name = "URL")]
    url: Vec<String>,

    /// Path to an HTML or Markdown file (or a directory of them)
    #[arg(short, long, value_name = "PATH")]
    file: Vec<String>,

    /// Path to a list of files or URLs, one per line
    #[arg(short = 'l', long, value_name = "PATH")]
    file_list: Option<PathBuf>,

    /// Path to a custom configuration file (TOML or JSON)
    #[arg(short, long, value_name = "PATH", env = "PROOFREADER_CONFIG")]
    config_file: Option<PathBuf>,

    /// Whether to print the results or save them as JSON (print, json)
    #[arg(short, long, default_value = "print")]
    output: OutputFormat,

    /// Where JSON results are written
    #[arg(long, value_name = "PATH", default_value = "results.json")]
    results_file: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if suggestions are found
    #[arg(long)]
    no_fail: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List dictionaries found in the search directories
    List,
    /// Show dictionary info
    Info {
        /// Dictionary name (e.g., en_US)
        name: String,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "proofreader", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config_file.as_deref())?;

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    let mut loader = SourceLoader::new();
    for target in cli.url.iter().chain(&cli.file) {
        loader.add(target.clone());
    }
    if let Some(list) = &cli.file_list {
        for target in read_file_list(list)? {
            loader.add(target);
        }
    }
    if loader.is_empty() {
        anyhow::bail!("No files or URLs specified. Use --help for usage information.");
    }

    let proofreader = Proofreader::from_config(&config).context("Failed to set up proofreader")?;

    let sources = loader.load();
    if cli.output == OutputFormat::Print {
        for source in sources.iter().filter(|s| s.error.is_some()) {
            output::print_failed_source(source);
        }
    }

    let reports = proofreader.proofread_sources(&sources)?;
    let findings: Vec<_> = reports.iter().map(|r| r.only_findings()).collect();

    match cli.output {
        OutputFormat::Json => {
            output::save_results_json(&findings, &cli.results_file)?;
            log::info!("results written to {}", cli.results_file.display());
        }
        OutputFormat::Print => {
            output::print_results(&findings, !cli.no_color);

            // Exit with appropriate code
            if findings.iter().any(|r| r.has_suggestions()) && !cli.no_fail {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                dict::manager::list_dictionaries(config)?;
            }
            DictCommands::Info { name } => {
                dict::manager::show_info(config, &name)?;
            }
        },
    }
    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use fanin_core::Compilation;
use fanin_graph::{ExportGraphPlugin, Options, Verbosity};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fanin")]
#[command(about = "Reports which exported symbols are imported where", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the export usage graph from a compilation dump
    Graph(GraphArgs),
}

#[derive(Debug, Clone, Parser)]
#[command(name = "graph")]
#[command(about = "Report export usage across a finished build")]
struct GraphArgs {
    /// Compilation dump produced by the host build
    #[arg(long)]
    compilation: PathBuf,

    /// Glob patterns selecting the files to analyze
    #[arg(long, default_value = "**/*.*")]
    patterns: Vec<String>,

    /// Glob patterns removed from the selection
    #[arg(long)]
    exclude: Vec<String>,

    /// Base directory for selection (defaults to the dump's context)
    #[arg(long)]
    context: Option<PathBuf>,

    /// Where to write the JSON graph
    #[arg(long, default_value = "graph.json")]
    output: PathBuf,

    /// How much detail the graph carries per symbol
    #[arg(long, value_enum, default_value = "info")]
    log: LogLevel,

    /// Minimum number of dependent files for a symbol to be reported
    #[arg(long, default_value = "2")]
    min_deps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    /// Record how many files import each symbol
    Info,
    /// Record which files import each symbol
    Verbose,
}

impl From<LogLevel> for Verbosity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => Verbosity::Info,
            LogLevel::Verbose => Verbosity::Verbose,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Graph(args) => {
            info!(
                "Building export usage graph with min_deps: {} (dump: {})",
                args.min_deps,
                args.compilation.display()
            );
            debug!("Args: context={:?}, output={:?}", args.context, args.output);

            let compilation = Compilation::from_json_file(&args.compilation)?;
            let plugin = ExportGraphPlugin::new(Options {
                patterns: args.patterns,
                exclude: args.exclude,
                context: args.context,
                output: args.output,
                verbosity: args.log.into(),
                min_deps: args.min_deps,
                filter: None,
            });

            let summary = plugin.report(&compilation)?;
            let elapsed_ms = start.elapsed().as_millis();

            writeln!(
                stdout,
                "{} Reported {} symbols from {} dependency files to {}.",
                "●".bright_blue(),
                summary.symbols_reported.to_string().cyan(),
                summary.dependency_files.to_string().cyan(),
                summary.output.display().to_string().cyan()
            )?;
            writeln!(
                stdout,
                "{} Finished in {}ms on {} files.",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                summary.files_selected.to_string().cyan()
            )?;
            stdout.flush()?;

            Ok(())
        }
    }
}

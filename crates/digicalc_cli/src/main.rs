//! digicalc: Evaluate single-digit arithmetic expressions, one per line.
//!
//! Usage:
//!   digicalc [options] [FILE...]
//!
//! With no FILE, reads `equations.txt` from the current directory.
//! A FILE of `-` reads standard input.

use clap::{ArgAction, Parser as ClapParser, ValueEnum};
use digicalc_batch::{Batch, BatchReport, OutcomeRecord};
use digicalc_diagnostics::DiagnosticCollection;
use notify::{RecursiveMode, Watcher};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Input read when no FILE is given.
const DEFAULT_INPUT: &str = "equations.txt";

/// Every expression evaluated.
const EXIT_SUCCESS: i32 = 0;
/// An input could not be read, or output could not be written.
const EXIT_INPUT_ERROR: i32 = 1;
/// At least one expression failed to parse or evaluate.
const EXIT_EXPRESSION_ERRORS: i32 = 2;

#[derive(ClapParser, Debug)]
#[command(
    name = "digicalc",
    version,
    about = "Evaluate single-digit arithmetic expressions, one per line"
)]
struct Cli {
    /// Files of expressions, one per line. `-` reads standard input.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Number of worker threads.
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    jobs: Option<u16>,

    /// Evaluate on the main thread, one expression at a time.
    #[arg(long, conflicts_with = "jobs")]
    sequential: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also print each parsed tree, fully parenthesized.
    #[arg(long)]
    tree: bool,

    /// Print a labeled report for every failed expression to stderr.
    #[arg(long)]
    explain: bool,

    /// Use colors on stderr when it is a terminal.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pretty: bool,

    /// Re-evaluate inputs whenever they change.
    #[arg(short = 'w', long)]
    watch: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `<expression> = <value>` lines.
    Text,
    /// One JSON record per line.
    Json,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let pool = match cli.jobs.map(build_pool).transpose() {
        Ok(pool) => pool,
        Err(e) => {
            print_error(&format!("failed to start worker threads: {}", e), cli.pretty);
            process::exit(EXIT_INPUT_ERROR);
        }
    };

    let exit_code = if cli.watch {
        run_watch(&cli, pool.as_ref())
    } else {
        run_evaluate(&cli, pool.as_ref())
    };
    process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_pool(jobs: u16) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(usize::from(jobs))
        .thread_name(|i| format!("digicalc-worker-{}", i))
        .build()
}

fn input_paths(cli: &Cli) -> Vec<PathBuf> {
    if cli.files.is_empty() {
        vec![PathBuf::from(DEFAULT_INPUT)]
    } else {
        cli.files.clone()
    }
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn load_batch(path: &Path) -> io::Result<Batch> {
    if is_stdin(path) {
        Batch::from_reader("<stdin>", io::stdin().lock())
    } else {
        Batch::load_file(path)
    }
}

fn evaluate_batch(batch: &Batch, cli: &Cli, pool: Option<&rayon::ThreadPool>) -> BatchReport {
    if cli.sequential {
        batch.evaluate_sequential()
    } else if let Some(pool) = pool {
        batch.evaluate_in(pool)
    } else {
        batch.evaluate()
    }
}

fn run_evaluate(cli: &Cli, pool: Option<&rayon::ThreadPool>) -> i32 {
    let start = Instant::now();
    let use_color = cli.pretty && stderr_is_terminal();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut diagnostics = DiagnosticCollection::new();

    for path in input_paths(cli) {
        tracing::debug!(path = %path.display(), "reading input");
        let batch = match load_batch(&path) {
            Ok(batch) => batch,
            Err(e) => {
                let _ = out.flush();
                print_error(&format!("failed to read '{}': {}", path.display(), e), use_color);
                return EXIT_INPUT_ERROR;
            }
        };

        tracing::debug!(expressions = batch.len(), "input loaded");

        let report = evaluate_batch(&batch, cli, pool);
        if let Err(e) = write_report(&mut out, &report, cli) {
            print_error(&format!("failed to write output: {}", e), use_color);
            return EXIT_INPUT_ERROR;
        }
        if cli.explain {
            // keep stdout and stderr interleaved per input
            let _ = out.flush();
            explain_failures(&report);
        }
        diagnostics.extend(report.diagnostics());
    }

    if let Err(e) = out.flush() {
        print_error(&format!("failed to write output: {}", e), use_color);
        return EXIT_INPUT_ERROR;
    }

    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "evaluation finished");

    if diagnostics.has_errors() {
        print_summary(&diagnostics, !cli.explain, use_color);
        return EXIT_EXPRESSION_ERRORS;
    }
    EXIT_SUCCESS
}

fn write_report(out: &mut impl Write, report: &BatchReport, cli: &Cli) -> io::Result<()> {
    for outcome in report.outcomes() {
        match cli.format {
            OutputFormat::Text => {
                writeln!(out, "{}", outcome)?;
                if cli.tree {
                    if let Ok(evaluated) = &outcome.result {
                        writeln!(out, "    {}", evaluated.tree)?;
                    }
                }
            }
            OutputFormat::Json => {
                let record = OutcomeRecord::new(report.source_name(), outcome, cli.tree);
                writeln!(out, "{}", record.to_json()?)?;
            }
        }
    }
    Ok(())
}

fn explain_failures(report: &BatchReport) {
    for outcome in report.outcomes() {
        if let Some(e) = outcome.error() {
            let name = format!("{}:{}", report.source_name(), outcome.line);
            let rendered = digicalc_diagnostics::to_report(e, &name, &outcome.expression);
            eprintln!("{:?}", rendered);
        }
    }
}

fn run_watch(cli: &Cli, pool: Option<&rayon::ThreadPool>) -> i32 {
    let use_color = cli.pretty && stderr_is_terminal();
    let paths: Vec<PathBuf> = input_paths(cli).into_iter().filter(|p| !is_stdin(p)).collect();
    if paths.is_empty() {
        print_error("watch mode needs at least one input file", use_color);
        return EXIT_INPUT_ERROR;
    }

    eprintln!("Starting evaluation in watch mode...");
    run_evaluate(cli, pool);

    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = match notify::recommended_watcher(tx) {
        Ok(watcher) => watcher,
        Err(e) => {
            print_error(&format!("failed to start file watcher: {}", e), use_color);
            return EXIT_INPUT_ERROR;
        }
    };
    for path in &paths {
        if let Err(e) = watcher.watch(path, RecursiveMode::NonRecursive) {
            print_error(&format!("failed to watch '{}': {}", path.display(), e), use_color);
            return EXIT_INPUT_ERROR;
        }
    }
    eprintln!("Watching for file changes...");

    while let Ok(event) = rx.recv() {
        match event {
            Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                // editors often write in several steps; settle before re-reading
                std::thread::sleep(Duration::from_millis(50));
                while rx.try_recv().is_ok() {}
                eprintln!();
                eprintln!("File change detected. Re-evaluating...");
                run_evaluate(cli, pool);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "file watcher error"),
        }
    }
    EXIT_SUCCESS
}

/// List each failure by location, then the totals. The list is left out
/// when `--explain` has already reported every failure.
fn print_summary(diagnostics: &DiagnosticCollection, list: bool, use_color: bool) {
    if list {
        eprintln!();
        for diagnostic in diagnostics.diagnostics() {
            eprintln!("{}", diagnostic);
        }
    }

    let total = diagnostics.error_count();
    let syntax = diagnostics.syntax_error_count();
    let counts = format!(
        "Found {} error{} ({} syntax, {} runtime).",
        total,
        if total == 1 { "" } else { "s" },
        syntax,
        total - syntax
    );
    if use_color {
        eprintln!("\n{}{}{}", RED, counts, RESET);
        if list {
            eprintln!("{}Run with --explain for details.{}", GRAY, RESET);
        }
    } else {
        eprintln!("\n{}", counts);
    }
}

fn print_error(msg: &str, use_color: bool) {
    if use_color && stderr_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn stderr_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

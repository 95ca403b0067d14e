#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use sat_backtrack::sat::cnf::Cnf;
use sat_backtrack::sat::dimacs::{parse_file, parse_str, ParseOptions};
use sat_backtrack::sat::error::LoadError;
use sat_backtrack::sat::search::Backtracking;
use sat_backtrack::sat::solver::{SearchLimits, SolutionStats, Verdict};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{info, warn};

/// Defines the command-line interface.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sat_backtrack",
    version,
    about = "An exhaustive backtracking SAT checker"
)]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it is solved as a
    /// DIMACS .cnf file, or, for a directory, every .cnf file below it.
    pub path: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Specifies the subcommand to execute (e.g. `file`, `text`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// CNF input as a string, header included (e.g. "p cnf 3 2\n1 -2 0\n2 3 0").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Do not print the `c <depth>` progress lines.
    #[arg(short, long, default_value_t = false)]
    pub(crate) quiet: bool,

    /// Skip checking a found model against the formula.
    #[arg(long, default_value_t = false)]
    pub(crate) no_verify: bool,

    /// Print problem and search statistics after the verdict.
    #[arg(short, long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Reject inputs whose header clause count differs from the clause lines read.
    #[arg(long, default_value_t = false)]
    pub(crate) strict: bool,

    /// Give up with UNKNOWN after this many search steps.
    #[arg(long)]
    pub(crate) max_steps: Option<u64>,
}

impl CommonOptions {
    pub(crate) const fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_clause_count: self.strict,
        }
    }

    pub(crate) const fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_steps: self.max_steps,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),

    #[error("model failed verification against {0} clauses")]
    Verification(usize),
}

pub(crate) type CliResult<T> = Result<T, CliError>;

/// Solves a single file, or every `.cnf` file below a directory.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> CliResult<()> {
    if path.is_dir() {
        solve_dir(path, common)
    } else {
        solve_file(path, common, false)
    }
}

/// Solves a directory of CNF files.
///
/// Walks the directory recursively; every file with a `.cnf` extension is parsed,
/// solved and reported, preceded by a `c <path>` line. Other entries are skipped.
///
/// # Errors
///
/// Stops at the first file that cannot be read or parsed.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> CliResult<()> {
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            info!(path = %file_path.display(), "skipping non-CNF file");
            continue;
        }

        solve_file(file_path, common, true)?;
    }

    Ok(())
}

pub(crate) fn solve_file(path: &Path, common: &CommonOptions, labelled: bool) -> CliResult<()> {
    let time = Instant::now();
    let cnf = parse_file(path, common.parse_options())?;
    let parse_time = time.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if labelled {
        writeln!(out, "c {}", path.display())?;
    }
    solve_and_report(&mut out, &cnf, common, parse_time)?;
    Ok(())
}

pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> CliResult<()> {
    let time = Instant::now();
    let cnf = parse_str(input, common.parse_options())?;
    let parse_time = time.elapsed();

    let stdout = io::stdout();
    solve_and_report(&mut stdout.lock(), &cnf, common, parse_time)?;
    Ok(())
}

pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
}

/// Solves a formula and writes the progress lines, the verdict and, optionally, the
/// statistics table to `out`.
///
/// # Errors
///
/// If writing fails, or if a model does not satisfy the formula.
pub(crate) fn solve_and_report<W: Write>(
    out: &mut W,
    cnf: &Cnf,
    common: &CommonOptions,
    parse_time: Duration,
) -> CliResult<Verdict> {
    if let Err(e) = epoch::advance() {
        warn!(error = %e, "cannot refresh jemalloc statistics");
    }

    let time = Instant::now();
    let mut solver = Backtracking::with_limits(cnf.clone(), common.limits());

    let mut write_error = None;
    let verdict = solver.solve_with_progress(|depth| {
        if !common.quiet && write_error.is_none() {
            if let Err(e) = writeln!(out, "c {depth}") {
                write_error = Some(e);
            }
        }
    });
    let elapsed = time.elapsed();

    if let Some(e) = write_error {
        return Err(e.into());
    }

    write_verdict(out, cnf, &verdict, common)?;

    if common.stats {
        print_stats(out, parse_time, elapsed, cnf, &solver.stats)?;
    }

    Ok(verdict)
}

/// Writes the verdict, checking a model first unless verification is disabled, so a
/// model that fails the check is never printed.
///
/// # Errors
///
/// `CliError::Verification` before anything is written, or a write error.
pub(crate) fn write_verdict<W: Write>(
    out: &mut W,
    cnf: &Cnf,
    verdict: &Verdict,
    common: &CommonOptions,
) -> CliResult<()> {
    if !common.no_verify {
        verify_solution(cnf, verdict)?;
    }
    writeln!(out, "{verdict}")?;
    Ok(())
}

/// Checks a model against the formula it was found for.
///
/// # Errors
///
/// `CliError::Verification` when some clause is not satisfied.
pub(crate) fn verify_solution(cnf: &Cnf, verdict: &Verdict) -> CliResult<()> {
    if let Some(solutions) = verdict.solutions() {
        let ok = cnf.verify(solutions);
        info!(ok, "verified model");
        if !ok {
            return Err(CliError::Verification(cnf.num_clauses()));
        }
    }
    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line<W: Write>(
    out: &mut W,
    label: &str,
    value: impl std::fmt::Display,
) -> io::Result<()> {
    writeln!(out, "c |  {label:<28} {value:>18}  |")
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate<W: Write>(
    out: &mut W,
    label: &str,
    value: u64,
    elapsed: f64,
) -> io::Result<()> {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    writeln!(out, "c |  {label:<20} {value:>12} ({rate:>9.0}/sec)  |")
}

/// Prints a summary of problem and search statistics as DIMACS comment lines.
pub(crate) fn print_stats<W: Write>(
    out: &mut W,
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    s: &SolutionStats,
) -> io::Result<()> {
    let elapsed_secs = elapsed.as_secs_f64();

    writeln!(out, "c =======================[ Problem Statistics ]=========================")?;
    stat_line(out, "Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()))?;
    stat_line(out, "Variables", cnf.num_vars)?;
    stat_line(out, "Variables (used)", cnf.num_used_vars())?;
    stat_line(out, "Clauses (distinct)", cnf.num_clauses())?;
    match cnf.declared_clauses {
        Some(declared) => stat_line(out, "Clauses (declared)", declared)?,
        None => stat_line(out, "Clauses (declared)", "-")?,
    }
    stat_line(out, "Literals", cnf.num_literals())?;

    writeln!(out, "c ========================[ Search Statistics ]========================")?;
    stat_line_with_rate(out, "Steps", s.steps, elapsed_secs)?;
    stat_line_with_rate(out, "Decisions", s.decisions, elapsed_secs)?;
    stat_line_with_rate(out, "Conflicts", s.conflicts, elapsed_secs)?;
    stat_line_with_rate(out, "Flips", s.flips, elapsed_secs)?;
    stat_line_with_rate(out, "Retractions", s.retractions, elapsed_secs)?;
    stat_line(out, "Max depth", s.max_depth)?;
    match memory_usage() {
        Some((allocated, resident)) => {
            stat_line(out, "Memory usage (MiB)", format!("{allocated:.2}"))?;
            stat_line(out, "Resident memory (MiB)", format!("{resident:.2}"))?;
        }
        None => warn!("memory statistics unavailable"),
    }
    stat_line(out, "CPU time (s)", format!("{elapsed_secs:.3}"))?;
    writeln!(out, "c =====================================================================")
}

//! # sat_backtrack
//!
//! `sat_backtrack` decides the satisfiability of CNF formulas by exhaustive depth-first
//! search with chronological backtracking. Variables are decided lowest index first,
//! `false` before `true`, so every run on the same formula gives the same model.
//!
//! ## Usage
//!
//! ```sh
//! sat_backtrack [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! -   `PATH` alone solves a DIMACS .cnf file, or every `.cnf` file below a directory.
//! -   `file --path <FILE>` solves one file.
//! -   `text --input <CNF>` solves CNF text given on the command line.
//! -   `completions <SHELL>` prints a shell completion script.
//!
//! ## Output
//!
//! While searching, a `c <depth>` line is printed every time more variables are assigned
//! than ever before (`--quiet` turns these off). The verdict follows: `SAT` and the model
//! as a `0`-terminated literal line, `UNSAT`, or `UNKNOWN` when `--max-steps` ran out.
//! `--stats` appends a table of comment lines.
//!
//! Logs go to stderr. `-v`, `-vv` and `-vvv` raise the level to info, debug and trace;
//! `RUST_LOG` overrides the flag.
//!
//! ## Exit status
//!
//! `0` whenever a verdict was printed, `1` if the input could not be read or parsed.

use crate::command_line::cli::{print_completions, solve_file, solve_path, solve_text, Cli, Commands};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod command_line;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common, false),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Completions { shell }) => {
            print_completions(shell);
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_path(&path, &cli.common),
            None => {
                eprintln!("error: no input given; pass a PATH or a subcommand (see --help)");
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

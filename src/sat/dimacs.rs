#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A loader for DIMACS-style CNF text.
//!
//! The input is processed line by line and each line is split on whitespace:
//! - A `c` token ends the line; everything after it is a comment.
//! - A `cnf` token reads the next two tokens as the variable count `n` and the clause
//!   count `m`, and ends the line. The `p` before it is discarded like any other `p`.
//! - The tokens `0`, `p` and `%` are discarded.
//! - Any other token must be a signed integer and is added to the line's clause.
//!
//! All literals on one line form one clause, and a line that yields no literals adds
//! nothing, so an empty clause can never be written in this format. Duplicate literals
//! and duplicate clauses collapse.
//!
//! `m` is informational and counts clause lines, duplicates included. By default a
//! mismatch with the number of clause lines read is only logged;
//! [`ParseOptions::strict_clause_count`] turns it into an error.
//!
//! `n` may not exceed `i32::MAX`, the largest variable a literal can name.

use crate::sat::cnf::Cnf;
use crate::sat::error::{LoadError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Reject inputs whose header clause count disagrees with the clauses read.
    pub strict_clause_count: bool,
}

impl ParseOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            strict_clause_count: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Header {
    num_vars: usize,
    num_clauses: usize,
}

/// Parses CNF text from any `BufRead` source.
///
/// # Errors
///
/// - `LoadError::Malformed` for a token that is not an integer, a header whose counts
///   are missing or not integers, or a clause that appears before the header.
/// - `LoadError::Formula` for a literal whose variable exceeds the header's `n`.
/// - `LoadError::ClauseCountMismatch` in strict mode when `m` is wrong.
/// - `LoadError::Io` if reading fails.
pub fn parse_dimacs<R: BufRead>(reader: R, options: ParseOptions) -> Result<Cnf> {
    let mut header: Option<Header> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut lines_read = 0;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        lines_read = line_no;
        let mut tokens = line.split_whitespace();
        let mut clause = Vec::new();

        while let Some(token) = tokens.next() {
            match token {
                "c" => break,
                "cnf" => {
                    let num_vars = parse_count(tokens.next(), line_no, "variable count")?;
                    if i32::try_from(num_vars).is_err() {
                        return Err(LoadError::malformed(
                            line_no,
                            format!("variable count {num_vars} exceeds {}", i32::MAX),
                        ));
                    }
                    let num_clauses = parse_count(tokens.next(), line_no, "clause count")?;
                    header = Some(Header {
                        num_vars,
                        num_clauses,
                    });
                    break;
                }
                "0" | "p" | "%" => {}
                literal => {
                    let value = literal.parse::<i32>().map_err(|e| {
                        LoadError::malformed(line_no, format!("invalid literal '{literal}': {e}"))
                    })?;
                    clause.push(value);
                }
            }
        }

        if clause.is_empty() {
            continue;
        }
        if header.is_none() {
            return Err(LoadError::malformed(
                line_no,
                "clause before the 'p cnf' header",
            ));
        }
        clauses.push(clause);
    }

    let Some(header) = header else {
        return Err(LoadError::malformed(lines_read, "missing 'p cnf' header"));
    };

    let clause_lines = clauses.len();
    let mut cnf = Cnf::with_num_vars(header.num_vars, clauses)?;
    cnf.declared_clauses = Some(header.num_clauses);

    if clause_lines != header.num_clauses {
        if options.strict_clause_count {
            return Err(LoadError::ClauseCountMismatch {
                declared: header.num_clauses,
                parsed: clause_lines,
            });
        }
        warn!(
            declared = header.num_clauses,
            parsed = clause_lines,
            "header clause count does not match the clause lines read"
        );
    }

    info!(
        vars = cnf.num_vars,
        clauses = cnf.num_clauses(),
        literals = cnf.num_literals(),
        "parsed formula"
    );
    Ok(cnf)
}

/// Parses CNF text held in memory.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_str(input: &str, options: ParseOptions) -> Result<Cnf> {
    parse_dimacs(Cursor::new(input), options)
}

/// Opens and parses a CNF file.
///
/// # Errors
///
/// `LoadError::ResourceUnavailable` if the file cannot be opened, otherwise see
/// [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Cnf> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dimacs(BufReader::new(file), options)
}

fn parse_count(token: Option<&str>, line: usize, what: &str) -> Result<usize> {
    let token = token.ok_or_else(|| LoadError::malformed(line, format!("missing {what}")))?;
    token
        .parse::<usize>()
        .map_err(|e| LoadError::malformed(line, format!("invalid {what} '{token}': {e}")))
}

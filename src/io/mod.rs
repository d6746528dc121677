pub mod compression;
pub mod td;

use std::io::{self, BufRead};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    interrupt::StopFlag,
    types::{Formula, Lit},
};

/// How clause lines are turned into clauses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClauseLines {
    /// A line whose last token is `0` is one clause; any other line is dropped.
    #[default]
    Terminated,
    /// Every `0` closes a clause and literals carry over line breaks, as in
    /// standard DIMACS.
    Continued,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("interrupted")]
    Interrupted,
}

fn malformed(line: usize, reason: impl Into<String>) -> ParseError {
    ParseError::Malformed {
        line,
        reason: reason.into(),
    }
}

fn read_header(line: &str, line_no: usize) -> Result<Formula, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["p", "cnf", vars, clauses, ..] => {
            Ok(Formula::new(vars.parse().ok(), clauses.parse().ok()))
        }
        _ => Err(malformed(
            line_no,
            format!("expected \"p cnf <vars> <clauses>\", found \"{}\"", line.trim()),
        )),
    }
}

/// Reads a DIMACS CNF formula.
///
/// Comment lines (`c`) and blank lines are skipped and a `%` line ends the
/// clause section. How clause lines are split into clauses depends on
/// [`ClauseLines`].
pub fn read_formula(
    reader: impl BufRead,
    lines: ClauseLines,
    stop: &StopFlag,
) -> Result<Formula, ParseError> {
    let mut formula: Option<Formula> = None;
    let mut clause = vec![];
    let mut line_no = 0;

    for line in reader.lines() {
        let line = line?;
        line_no += 1;

        if stop.is_raised() {
            return Err(ParseError::Interrupted);
        }

        let mut words = line.split_whitespace().peekable();
        match words.peek() {
            None | Some(&"c") => continue,
            Some(&"%") => break,
            Some(&"p") => {
                if formula.is_some() {
                    return Err(malformed(line_no, "duplicate problem line"));
                }
                formula = Some(read_header(&line, line_no)?);
                continue;
            }
            Some(_) => {}
        }

        let Some(formula) = formula.as_mut() else {
            return Err(malformed(line_no, "clause before problem line"));
        };

        let mut lits = Vec::new();
        for word in words {
            let lit = word
                .parse::<Lit>()
                .map_err(|_| malformed(line_no, format!("invalid literal \"{word}\"")))?;
            lits.push(lit);
        }

        match lines {
            ClauseLines::Terminated => {
                if lits.last() == Some(&0) {
                    // one clause per line; inner zeros are not literals
                    lits.retain(|&lit| lit != 0);
                    trace!(clause = ?lits, "clause");
                    formula.clauses.push(lits);
                } else {
                    debug!(
                        line = line_no,
                        literals = lits.len(),
                        "dropping clause line without terminating 0"
                    );
                }
            }
            ClauseLines::Continued => {
                for lit in lits {
                    match lit {
                        0 => {
                            trace!(clause = ?clause, "clause");
                            formula.clauses.push(std::mem::take(&mut clause));
                        }
                        _ => clause.push(lit),
                    }
                }
            }
        }
    }

    if !clause.is_empty() {
        debug!(literals = clause.len(), "dropping unterminated clause at end of input");
    }

    formula.ok_or_else(|| malformed(line_no, "missing problem line"))
}

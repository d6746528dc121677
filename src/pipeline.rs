use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    graph::PrimalGraph,
    interrupt::StopFlag,
    io::{self, compression, td, ClauseLines, ParseError},
};

#[derive(Clone, Debug)]
pub struct Config {
    pub clause_lines: ClauseLines,
    /// Bzip2 block size, `1..=9`.
    pub level: u32,
    /// Defaults to `<input>.gr.bz2`.
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clause_lines: ClauseLines::Terminated,
            level: 9,
            output: None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Summary {
    pub output: PathBuf,
    pub clause_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
}

fn parse_error(path: &Path, err: ParseError) -> Error {
    match err {
        ParseError::Io(source) => Error::StreamRead {
            path: path.to_path_buf(),
            source,
        },
        ParseError::Malformed { line, reason } => Error::MalformedInput {
            path: path.to_path_buf(),
            line,
            reason,
        },
        ParseError::Interrupted => Error::Interrupted,
    }
}

/// Converts the CNF file at `input` into a compressed primal graph.
///
/// Everything is computed in memory first; the output file is only created
/// once the compressed bytes are ready, so a failed or interrupted run leaves
/// nothing behind.
pub fn convert(input: &Path, config: &Config, stop: &StopFlag) -> Result<Summary> {
    let output = config
        .output
        .clone()
        .unwrap_or_else(|| compression::output_path(input));

    let reader = compression::open(input)?;
    info!(path = %input.display(), "parsing starts");
    let formula = io::read_formula(reader, config.clause_lines, stop)
        .map_err(|err| parse_error(input, err))?;
    if !formula.is_consistent() {
        warn!(
            declared = ?formula.clause_count,
            parsed = formula.clauses.len(),
            "clause count differs from problem line"
        );
    }
    stop.check()?;

    let graph = PrimalGraph::from_formula(&formula);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    stop.check()?;

    let mut text = vec![];
    let mapping = td::write_graph(&mut text, &graph).map_err(|source| Error::Write {
        path: output.clone(),
        source,
    })?;
    debug_assert_eq!(mapping.len(), graph.node_count());
    debug!(renumbered = mapping.len(), bytes = text.len(), "graph serialized");
    stop.check()?;

    let bytes = compression::compress(&text, config.level).map_err(|source| Error::Write {
        path: output.clone(),
        source,
    })?;
    stop.check()?;

    info!(path = %output.display(), bytes = bytes.len(), "writing output");
    fs::write(&output, bytes).map_err(|source| Error::Write {
        path: output.clone(),
        source,
    })?;

    Ok(Summary {
        output,
        clause_count: formula.clauses.len(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
    })
}

//! Writer for the `p td` graph format used by tree decomposition solvers.

use std::{
    collections::HashMap,
    io::{self, BufWriter, Write},
};

use crate::{graph::PrimalGraph, types::Var};

/// Dense renumbering of node ids, handing out `1, 2, ...` in first-seen order.
#[derive(Debug, Default)]
pub struct Renumbering {
    map: HashMap<Var, u32>,
}

impl Renumbering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, original: Var) -> u32 {
        let next = self.map.len() as u32 + 1;
        *self.map.entry(original).or_insert(next)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, original: Var) -> Option<u32> {
        self.map.get(&original).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Writes the header line followed by one edge per line, renumbering the
/// endpoints as they are written.
pub fn write_graph(writer: &mut impl Write, graph: &PrimalGraph) -> io::Result<Renumbering> {
    let mut writer = BufWriter::new(writer);
    let mut mapping = Renumbering::new();

    writeln!(writer, "p td {} {}", graph.node_count(), graph.edge_count())?;
    for (u, v) in graph.edges() {
        debug_assert_ne!(u, v);
        let u = mapping.assign(u);
        let v = mapping.assign(v);
        writeln!(writer, "{u} {v}")?;
    }

    writer.flush()?;
    Ok(mapping)
}

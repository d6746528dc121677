use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::types::{to_var, Clause, Formula, Var};

/// Undirected simple graph over variables, where two variables are adjacent
/// iff they occur together as positive literals in some clause.
///
/// Nodes are kept in the order they first appear in an edge and every
/// adjacency list in insertion order, so [`PrimalGraph::edges`] is the same
/// sequence for the same sequence of insertions.
#[derive(Clone, Debug, Default)]
pub struct PrimalGraph {
    nodes: Vec<Var>,
    index: HashMap<Var, usize>,
    neighbours: Vec<Vec<usize>>,
    edges: HashSet<(usize, usize)>,
}

impl PrimalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_formula(formula: &Formula) -> Self {
        info!(clauses = formula.clauses.len(), "generating edges");
        let mut graph = Self::new();
        for clause in &formula.clauses {
            graph.add_clause(clause);
        }
        graph
    }

    /// Turns the positive part of `clause` into a clique.
    pub fn add_clause(&mut self, clause: &Clause) {
        let mut positive: Vec<Var> = Vec::with_capacity(clause.len());
        for &lit in clause {
            // repeated variables would otherwise pair with themselves
            if lit > 0 && !positive.contains(&to_var(lit)) {
                positive.push(to_var(lit));
            }
        }

        for (i, &u) in positive.iter().enumerate() {
            for &v in &positive[i + 1..] {
                self.add_edge(u, v);
            }
        }
    }

    /// Adds the edge `{u, v}`; returns `false` if it was already present or
    /// would be a self-loop.
    pub fn add_edge(&mut self, u: Var, v: Var) -> bool {
        if u == v {
            return false;
        }

        let i = self.node(u);
        let j = self.node(v);
        if !self.edges.insert((i.min(j), i.max(j))) {
            return false;
        }
        self.neighbours[i].push(j);
        self.neighbours[j].push(i);
        true
    }

    fn node(&mut self, var: Var) -> usize {
        if let Some(&i) = self.index.get(&var) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(var);
        self.neighbours.push(vec![]);
        self.index.insert(var, i);
        i
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[cfg(test)]
    pub(crate) fn nodes(&self) -> &[Var] {
        &self.nodes
    }

    #[cfg(test)]
    pub(crate) fn degree(&self, var: Var) -> usize {
        self.index
            .get(&var)
            .map_or(0, |&i| self.neighbours[i].len())
    }

    #[cfg(test)]
    pub(crate) fn contains_edge(&self, u: Var, v: Var) -> bool {
        match (self.index.get(&u), self.index.get(&v)) {
            (Some(&i), Some(&j)) => self.edges.contains(&(i.min(j), i.max(j))),
            _ => false,
        }
    }

    /// Every edge once, as `(u, v)` with `u` inserted before `v`: nodes are
    /// walked in insertion order, each node's neighbours likewise.
    pub fn edges(&self) -> impl Iterator<Item = (Var, Var)> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .flat_map(move |(i, adjacent)| {
                adjacent
                    .iter()
                    .filter(move |&&j| j > i)
                    .map(move |&j| (self.nodes[i], self.nodes[j]))
            })
    }
}

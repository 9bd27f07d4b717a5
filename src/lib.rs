// Two-way graph partitioning using the Kernighan-Lin heuristic:
// https://ieeexplore.ieee.org/document/6771089
// A single-swap greedy optimizer is included as a baseline.

mod bisection;
mod error;
mod experiment;
mod gain;
mod greedy;
mod kernighan_lin;
mod netlist;
mod partition_util;

pub use bisection::{
    AnnotatedGraph, BisectionPartitioningConfig, Engine, HistoryEntry, LogObserver, NoopObserver,
    RunObserver, RunResult, StopReason,
};
pub use error::PartitionError;
pub use experiment::{ExperimentConfig, ExperimentSummary, TrialOutcome};
pub use kernighan_lin::{Exchange, ExchangePass};
pub use partition_util::InitialPartitioningMethod;

use std::collections::HashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub dst: u32,
    pub weight: u32,
}

#[derive(Clone, Debug)]
pub struct GraphVertex {
    pub name: String,
    pub edges: Vec<GraphEdge>,
}

/// A weighted, undirected graph. Vertices are named and get dense ids in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub vertices: Vec<GraphVertex>,
    index: HashMap<String, u32>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum::<usize>() / 2
    }

    /// Returns the id of the named vertex, inserting it if it does not exist yet.
    pub fn add_vertex(&mut self, name: &str) -> u32 {
        if let Some(&vx) = self.index.get(name) {
            return vx;
        }
        let vx = self.vertices.len() as u32;
        self.vertices.push(GraphVertex {
            name: name.to_string(),
            edges: vec![],
        });
        self.index.insert(name.to_string(), vx);
        vx
    }

    /// Adds an undirected edge. Adding an edge that already exists overwrites its weight.
    pub fn add_edge(&mut self, a: &str, b: &str, weight: u32) -> Result<(), PartitionError> {
        if a == b {
            return Err(PartitionError::SelfLoop(a.to_string()));
        }
        let va = self.add_vertex(a);
        let vb = self.add_vertex(b);
        self.set_half_edge(va, vb, weight);
        self.set_half_edge(vb, va, weight);
        Ok(())
    }

    fn set_half_edge(&mut self, src: u32, dst: u32, weight: u32) {
        let edges = &mut self.vertices[src as usize].edges;
        match edges.iter_mut().find(|e| e.dst == dst) {
            Some(e) => e.weight = weight,
            None => edges.push(GraphEdge { dst, weight }),
        }
    }

    pub fn vertex_id(&self, name: &str) -> Option<u32> {
        self.index.get(name).copied()
    }

    pub fn name(&self, vx: u32) -> &str {
        &self.vertices[vx as usize].name
    }

    /// Neighbours of a vertex in edge insertion order.
    pub fn neighbours(&self, vx: u32) -> &[GraphEdge] {
        &self.vertices[vx as usize].edges
    }

    /// Weight of the edge between two vertices, 0 if they are not adjacent.
    pub fn edge_weight(&self, va: u32, vb: u32) -> u32 {
        self.vertices[va as usize]
            .edges
            .iter()
            .find(|e| e.dst == vb)
            .map_or(0, |e| e.weight)
    }

    pub fn total_edge_weight(&self) -> u64 {
        let twice: u64 = self
            .vertices
            .iter()
            .flat_map(|v| v.edges.iter())
            .map(|e| e.weight as u64)
            .sum();
        twice / 2
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Assignment of every vertex of a graph to side A or side B.
///
/// Sizes of both sides are fixed once created: the only mutation is [`Bipartition::swap`],
/// which exchanges one vertex of A with one vertex of B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bipartition {
    sides: Vec<Side>,
}

impl Bipartition {
    pub fn from_sides(sides: Vec<Side>) -> Self {
        Self { sides }
    }

    /// Puts the first `split` vertices of `order` on side A and the rest on side B.
    /// `order` must be a permutation of all vertex ids.
    pub fn from_order(order: &[u32], split: usize) -> Self {
        let mut sides = vec![Side::B; order.len()];
        for &vx in order.iter().take(split) {
            sides[vx as usize] = Side::A;
        }
        Self { sides }
    }

    /// Builds a bipartition from two sets of vertex names. The sets must be disjoint
    /// and together name every vertex of the graph exactly once.
    pub fn from_halves<S: AsRef<str>>(graph: &Graph, a: &[S], b: &[S]) -> Result<Self, PartitionError> {
        let mut sides: Vec<Option<Side>> = vec![None; graph.vertex_count()];
        for (names, side) in [(a, Side::A), (b, Side::B)] {
            for name in names {
                let name: &str = name.as_ref();
                let vx = graph
                    .vertex_id(name)
                    .ok_or_else(|| PartitionError::UnknownVertex(name.to_string()))?;
                if sides[vx as usize].replace(side).is_some() {
                    return Err(PartitionError::InvalidPartition {
                        reason: format!("vertex {name} is listed more than once"),
                    });
                }
            }
        }
        let missing = sides.iter().filter(|s| s.is_none()).count();
        if missing > 0 {
            return Err(PartitionError::InvalidPartition {
                reason: format!("{missing} vertices are not assigned to either side"),
            });
        }
        Ok(Self {
            sides: sides.into_iter().flatten().collect(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.sides.len()
    }

    pub fn side(&self, vx: u32) -> Side {
        self.sides[vx as usize]
    }

    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// Vertices on the given side in ascending id order.
    pub fn members(&self, side: Side) -> Vec<u32> {
        (0..self.sides.len() as u32)
            .filter(|&vx| self.sides[vx as usize] == side)
            .collect()
    }

    pub fn len(&self, side: Side) -> usize {
        self.sides.iter().filter(|&&s| s == side).count()
    }

    pub fn names(&self, graph: &Graph, side: Side) -> Vec<String> {
        self.members(side)
            .into_iter()
            .map(|vx| graph.name(vx).to_string())
            .collect()
    }

    /// The same split with sides A and B exchanged.
    pub fn mirrored(&self) -> Self {
        Self {
            sides: self.sides.iter().map(|s| s.opposite()).collect(),
        }
    }

    pub(crate) fn swap(&mut self, va: u32, vb: u32) {
        self.sides.swap(va as usize, vb as usize);
    }
}

#[cfg(test)]
pub(crate) mod test_graphs {
    use crate::Graph;

    pub fn from_edges(edges: &[(&str, &str, u32)]) -> Graph {
        let mut graph = Graph::new();
        for &(a, b, w) in edges {
            graph.add_edge(a, b, w).unwrap();
        }
        graph
    }

    pub fn cycle4() -> Graph {
        from_edges(&[("N0", "N1", 1), ("N1", "N2", 1), ("N2", "N3", 1), ("N3", "N0", 1)])
    }

    pub fn two_triangles() -> Graph {
        from_edges(&[
            ("N0", "N1", 1),
            ("N1", "N2", 1),
            ("N2", "N0", 1),
            ("N3", "N4", 1),
            ("N4", "N5", 1),
            ("N5", "N3", 1),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_graphs::from_edges;

    #[test]
    fn duplicate_edge_overwrites_weight() {
        let graph = from_edges(&[("N0", "N1", 1), ("N1", "N0", 5)]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(0, 1), 5);
        assert_eq!(graph.edge_weight(1, 0), 5);
        assert_eq!(graph.total_edge_weight(), 5);
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut graph = Graph::new();
        assert_eq!(
            graph.add_edge("N0", "N0", 1),
            Err(PartitionError::SelfLoop("N0".to_string()))
        );
    }

    #[test]
    fn missing_edge_has_zero_weight() {
        let graph = from_edges(&[("N0", "N1", 2), ("N1", "N2", 3)]);
        assert_eq!(graph.edge_weight(0, 2), 0);
    }

    #[test]
    fn from_halves_validates_universe() {
        let graph = from_edges(&[("N0", "N1", 1), ("N1", "N2", 1)]);

        let ok = Bipartition::from_halves(&graph, &["N0"], &["N1", "N2"]).unwrap();
        assert_eq!(ok.members(Side::A), vec![0]);
        assert_eq!(ok.members(Side::B), vec![1, 2]);

        assert!(matches!(
            Bipartition::from_halves(&graph, &["N0"], &["N1"]),
            Err(PartitionError::InvalidPartition { .. })
        ));
        assert!(matches!(
            Bipartition::from_halves(&graph, &["N0", "N1"], &["N1", "N2"]),
            Err(PartitionError::InvalidPartition { .. })
        ));
        assert_eq!(
            Bipartition::from_halves(&graph, &["N0", "N9"], &["N1", "N2"]),
            Err(PartitionError::UnknownVertex("N9".to_string()))
        );
    }

    #[test]
    fn swap_keeps_side_sizes() {
        let mut p = Bipartition::from_order(&[0, 1, 2, 3, 4], 2);
        assert_eq!(p.len(Side::A), 2);
        p.swap(0, 4);
        assert_eq!(p.side(0), Side::B);
        assert_eq!(p.side(4), Side::A);
        assert_eq!(p.len(Side::A), 2);
        assert_eq!(p.len(Side::B), 3);
        assert_eq!(p.mirrored().len(Side::A), 3);
    }
}

use crate::{Bipartition, Exchange, Graph, Side};

impl Graph {
    /// Returns the sum of edge weights from the vertex to neighbours on the given side.
    pub fn get_degree(&self, partition: &Bipartition, vx: u32, side: Side) -> i64 {
        let mut degree = 0;
        for e in self.vertices[vx as usize].edges.iter() {
            if partition.side(e.dst) == side {
                degree += e.weight as i64;
            }
        }
        degree
    }

    /// Total weight of the edges whose endpoints lie on different sides.
    ///
    /// `partition` must have been built for this graph; a partition of another graph panics or
    /// gives a meaningless result.
    pub fn calculate_edge_cut(&self, partition: &Bipartition) -> u64 {
        self.debug_check_partition(partition);
        let mut edge_cut = 0;
        for (vx, v) in self.vertices.iter().enumerate() {
            let side = partition.side(vx as u32);
            for e in v.edges.iter() {
                if partition.side(e.dst) != side {
                    edge_cut += e.weight as u64;
                }
            }
        }
        edge_cut / 2
    }

    /// D-value of every vertex: external minus internal weighted degree.
    /// Isolated vertices get 0. `partition` must have been built for this graph.
    pub fn calculate_d_values(&self, partition: &Bipartition) -> Vec<i64> {
        self.debug_check_partition(partition);
        (0..self.vertices.len() as u32)
            .map(|vx| {
                let side = partition.side(vx);
                self.get_degree(partition, vx, side.opposite()) - self.get_degree(partition, vx, side)
            })
            .collect()
    }

    #[inline]
    fn debug_check_partition(&self, partition: &Bipartition) {
        debug_assert_eq!(
            partition.vertex_count(),
            self.vertex_count(),
            "bipartition built for a different graph"
        );
    }

    /// Cut reduction obtained by exchanging `va` and `vb`, given their current D-values.
    /// Their mutual edge is subtracted twice since it stays cut after the exchange.
    #[inline]
    pub fn swap_gain(&self, d_values: &[i64], va: u32, vb: u32) -> i64 {
        d_values[va as usize] + d_values[vb as usize] - 2 * self.edge_weight(va, vb) as i64
    }

    /// Scans all pairs of `candidates_a` x `candidates_b` and returns the pair with the highest
    /// gain. Ties go to the first pair in scan order (outer loop over A, inner loop over B).
    pub(crate) fn best_exchange(
        &self,
        d_values: &[i64],
        candidates_a: &[u32],
        candidates_b: &[u32],
    ) -> Option<Exchange> {
        let mut best: Option<Exchange> = None;
        for &a in candidates_a.iter() {
            for &b in candidates_b.iter() {
                let gain = self.swap_gain(d_values, a, b);
                if best.map_or(true, |ex| gain > ex.gain) {
                    best = Some(Exchange { a, b, gain });
                }
            }
        }
        best
    }
}

use crate::{Bipartition, Exchange, Graph, Side};

impl Graph {
    /// Finds the single exchange with the highest strictly positive gain for the current sides.
    /// D-values are recomputed from scratch every call and nothing is locked, so repeated steps
    /// stop at the first local optimum for single swaps.
    ///
    /// `partition` must have been built for this graph.
    pub fn greedy_step(&self, partition: &Bipartition) -> Option<Exchange> {
        let d_values = self.calculate_d_values(partition);
        let side_a = partition.members(Side::A);
        let side_b = partition.members(Side::B);
        self.best_exchange(&d_values, &side_a, &side_b)
            .filter(|ex| ex.gain > 0)
    }
}

use crate::{Bipartition, Graph, Side};

/// A tentative exchange of vertex `a` (side A) with vertex `b` (side B).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub a: u32,
    pub b: u32,
    /// Cut reduction of this exchange given all earlier exchanges of the same pass.
    pub gain: i64,
}

/// Outcome of one Kernighan-Lin pass over a bipartition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExchangePass {
    /// Exchanges in the order they were locked.
    pub exchanges: Vec<Exchange>,
    /// Length of the prefix of `exchanges` with the highest cumulative gain.
    pub best_k: usize,
    /// Cumulative gain of that prefix. Never negative; 0 when no prefix improves the cut.
    pub max_gain: i64,
}

impl ExchangePass {
    pub fn improves(&self) -> bool {
        self.max_gain > 0
    }

    /// The exchanges that are committed when the pass is applied.
    pub fn committed(&self) -> &[Exchange] {
        &self.exchanges[..self.best_k]
    }

    /// Swaps the committed prefix of exchanges in `partition`.
    pub fn apply(&self, partition: &mut Bipartition) {
        for ex in self.committed() {
            partition.swap(ex.a, ex.b);
        }
    }
}

impl Graph {
    /// Runs one Kernighan-Lin pass without modifying `partition`.
    ///
    /// Pairs are locked one at a time by highest gain, with D-values patched after every lock as
    /// if the pair had already moved. The pass stops when either side runs out of unlocked
    /// vertices. The returned prefix is the one with the largest positive cumulative gain.
    ///
    /// `partition` must have been built for this graph.
    pub fn exchange_pass(&self, partition: &Bipartition) -> ExchangePass {
        let mut d_values = self.calculate_d_values(partition);
        let mut unlocked_a = partition.members(Side::A);
        let mut unlocked_b = partition.members(Side::B);

        let steps = unlocked_a.len().min(unlocked_b.len());
        let mut exchanges = Vec::with_capacity(steps);

        for _ in 0..steps {
            let Some(ex) = self.best_exchange(&d_values, &unlocked_a, &unlocked_b) else {
                break;
            };
            exchanges.push(ex);

            unlocked_a.retain(|&vx| vx != ex.a);
            unlocked_b.retain(|&vx| vx != ex.b);

            for &u in unlocked_a.iter() {
                let (wa, wb) = (self.edge_weight(u, ex.a) as i64, self.edge_weight(u, ex.b) as i64);
                d_values[u as usize] += 2 * wa - 2 * wb;
            }
            for &v in unlocked_b.iter() {
                let (wa, wb) = (self.edge_weight(v, ex.a) as i64, self.edge_weight(v, ex.b) as i64);
                d_values[v as usize] += 2 * wb - 2 * wa;
            }
        }

        let mut cumulative = 0;
        let mut max_gain = 0;
        let mut best_k = 0;
        for (i, ex) in exchanges.iter().enumerate() {
            cumulative += ex.gain;
            if cumulative > max_gain {
                max_gain = cumulative;
                best_k = i + 1;
            }
        }

        ExchangePass {
            exchanges,
            best_k,
            max_gain,
        }
    }
}

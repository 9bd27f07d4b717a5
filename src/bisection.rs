use crate::{Bipartition, Graph, InitialPartitioningMethod, PartitionError, Side};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Engine {
    /// Kernighan-Lin passes: lock a full sequence of exchanges, commit the best prefix.
    KernighanLin,
    /// Commit the single best positive exchange per iteration. Used as a baseline.
    Greedy,
}

#[derive(Clone, Debug)]
pub struct BisectionPartitioningConfig {
    /// The seed for the random number generator.
    pub rng_seed: u64,
    /// What initial partitioning method to use.
    pub initial_partitioning: InitialPartitioningMethod,
    /// Which optimization engine drives the run.
    pub engine: Engine,
    /// Maximum number of passes (Kernighan-Lin) or iterations (greedy).
    pub max_passes: u32,
    /// If this is set to Some(n), the run stops once n consecutive committed steps did not lower
    /// the best cut seen so far. Some(0) stops after the first committed step.
    pub patience: Option<u32>,
    /// Narrate the run through [`LogObserver`]. Has no effect on the result.
    pub verbose: bool,
}

impl Default for BisectionPartitioningConfig {
    fn default() -> Self {
        Self {
            rng_seed: 1234,
            initial_partitioning: InitialPartitioningMethod::Random,
            engine: Engine::KernighanLin,
            max_passes: 10,
            patience: None,
            verbose: false,
        }
    }
}

impl BisectionPartitioningConfig {
    /// Greedy baseline with an iteration cap of 100.
    pub fn greedy() -> Self {
        Self {
            engine: Engine::Greedy,
            max_passes: 100,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub step: u32,
    pub cut_size: u64,
    pub description: String,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum StopReason {
    /// The last step found nothing to commit.
    Converged,
    /// `max_passes` steps were run.
    StepLimit,
    /// The patience threshold of non-improving steps was reached.
    Patience,
}

/// A copy of the input graph with every vertex tagged with its side.
#[derive(Clone, Debug)]
pub struct AnnotatedGraph {
    pub graph: Graph,
    pub sides: Vec<Side>,
}

impl AnnotatedGraph {
    fn new(graph: &Graph, partition: &Bipartition) -> Self {
        Self {
            graph: graph.clone(),
            sides: partition.sides().to_vec(),
        }
    }

    pub fn side_of(&self, name: &str) -> Option<Side> {
        self.graph.vertex_id(name).map(|vx| self.sides[vx as usize])
    }
}

#[derive(Clone, Debug)]
pub struct RunResult {
    /// Names on side A of the best partition found, in vertex id order.
    pub final_a: Vec<String>,
    /// Names on side B of the best partition found, in vertex id order.
    pub final_b: Vec<String>,
    pub partition: Bipartition,
    pub cut_size: u64,
    pub history: Vec<HistoryEntry>,
    pub elapsed: Duration,
    /// Number of passes or iterations that were run, including a final non-committing one.
    pub steps: u32,
    pub stop_reason: StopReason,
    pub initial_graph: AnnotatedGraph,
    pub final_graph: AnnotatedGraph,
}

impl RunResult {
    pub fn initial_cut_size(&self) -> u64 {
        self.history[0].cut_size
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Receives progress notifications from a bisection run.
pub trait RunObserver {
    fn pass_started(&mut self, _step: u32, _cut_size: u64) {}
    fn exchange_committed(&mut self, _entry: &HistoryEntry) {}
    fn converged(&mut self, _reason: StopReason, _cut_size: u64, _elapsed: Duration) {}
}

pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Narrates a run at info level.
pub struct LogObserver;

impl RunObserver for LogObserver {
    fn pass_started(&mut self, step: u32, cut_size: u64) {
        log::info!("step {step} starting at edge cut {cut_size}");
    }

    fn exchange_committed(&mut self, entry: &HistoryEntry) {
        log::info!("step {}: {}, edge cut {}", entry.step, entry.description, entry.cut_size);
    }

    fn converged(&mut self, reason: StopReason, cut_size: u64, elapsed: Duration) {
        log::info!("stopped ({reason:?}) with edge cut {cut_size} after {:.6}s", elapsed.as_secs_f64());
    }
}

impl Graph {
    /// Splits the graph into two parts while minimizing the edge cut cost.
    pub fn partition_bisection(&self, config: &BisectionPartitioningConfig) -> Result<RunResult, PartitionError> {
        if config.verbose {
            self.partition_bisection_observed(config, &mut LogObserver)
        } else {
            self.partition_bisection_observed(config, &mut NoopObserver)
        }
    }

    /// Like [`Graph::partition_bisection`], reporting progress to `observer`.
    pub fn partition_bisection_observed(
        &self,
        config: &BisectionPartitioningConfig,
        observer: &mut dyn RunObserver,
    ) -> Result<RunResult, PartitionError> {
        let t1 = Instant::now();
        let mut rng = StdRng::seed_from_u64(config.rng_seed);

        let mut partition = self.partition_initial(&config.initial_partitioning, &mut rng)?;
        let initial_graph = AnnotatedGraph::new(self, &partition);

        let mut cut = self.calculate_edge_cut(&partition);
        log::trace!("initial edge cut: {cut}");
        let description = match config.initial_partitioning {
            InitialPartitioningMethod::Bfs { .. } => "BFS initial state",
            _ => "Initial state",
        };
        let mut history = vec![HistoryEntry {
            step: 0,
            cut_size: cut,
            description: description.to_string(),
        }];

        let mut best_partition = partition.clone();
        let mut best_cut = cut;
        let mut non_improving = 0;
        let mut steps = 0;
        let mut stop_reason = StopReason::StepLimit;

        for step in 1..=config.max_passes {
            steps = step;
            observer.pass_started(step, cut);

            let committed = match config.engine {
                Engine::KernighanLin => {
                    let pass = self.exchange_pass(&partition);
                    log::trace!(
                        "pass {step}: {} exchanges, max cumulative gain {} after {}",
                        pass.exchanges.len(),
                        pass.max_gain,
                        pass.best_k
                    );
                    pass.improves().then(|| {
                        pass.apply(&mut partition);
                        format!("Applied {} swaps.", pass.best_k)
                    })
                }
                Engine::Greedy => self.greedy_step(&partition).map(|ex| {
                    partition.swap(ex.a, ex.b);
                    format!("Swapped {} and {} with gain {}", self.name(ex.a), self.name(ex.b), ex.gain)
                }),
            };

            let Some(description) = committed else {
                stop_reason = StopReason::Converged;
                break;
            };

            cut = self.calculate_edge_cut(&partition);
            let entry = HistoryEntry {
                step,
                cut_size: cut,
                description,
            };
            log::trace!("step {step}: {}, edge cut: {cut}", entry.description);
            observer.exchange_committed(&entry);
            history.push(entry);

            if cut < best_cut {
                best_cut = cut;
                best_partition = partition.clone();
                non_improving = 0;
            } else {
                non_improving += 1;
            }

            if let Some(patience) = config.patience {
                if non_improving >= patience {
                    log::trace!("stopping early");
                    stop_reason = StopReason::Patience;
                    break;
                }
            }
        }

        let final_graph = AnnotatedGraph::new(self, &best_partition);
        let elapsed = t1.elapsed();
        observer.converged(stop_reason, best_cut, elapsed);
        log::debug!(
            "{:?} bisection: edge cut {} -> {best_cut} in {steps} steps ({stop_reason:?}), {}ms",
            config.engine,
            history[0].cut_size,
            elapsed.as_millis()
        );

        Ok(RunResult {
            final_a: best_partition.names(self, Side::A),
            final_b: best_partition.names(self, Side::B),
            partition: best_partition,
            cut_size: best_cut,
            history,
            elapsed,
            steps,
            stop_reason,
            initial_graph,
            final_graph,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_graphs::{cycle4, from_edges, two_triangles};

    fn supplied(graph: &Graph, a: &[&str], b: &[&str]) -> InitialPartitioningMethod {
        InitialPartitioningMethod::Supplied(Bipartition::from_halves(graph, a, b).unwrap())
    }

    #[derive(Default)]
    struct Recorder {
        started: Vec<u32>,
        committed: Vec<u32>,
        stopped: Option<StopReason>,
    }

    impl RunObserver for Recorder {
        fn pass_started(&mut self, step: u32, _cut_size: u64) {
            self.started.push(step);
        }

        fn exchange_committed(&mut self, entry: &HistoryEntry) {
            self.committed.push(entry.step);
        }

        fn converged(&mut self, reason: StopReason, _cut_size: u64, _elapsed: Duration) {
            self.stopped = Some(reason);
        }
    }

    #[test]
    fn kernighan_lin_on_cycle() {
        let graph = cycle4();
        let config = BisectionPartitioningConfig {
            initial_partitioning: supplied(&graph, &["N0", "N2"], &["N1", "N3"]),
            ..Default::default()
        };
        let result = graph.partition_bisection(&config).unwrap();

        assert_eq!(result.initial_cut_size(), 4);
        assert_eq!(result.cut_size, 2);
        assert_eq!(result.stop_reason, StopReason::Converged);
        assert_eq!(result.steps, 2);
        assert_eq!(result.final_a, vec!["N1", "N2"]);
        assert_eq!(result.final_b, vec!["N0", "N3"]);
        assert_eq!(
            result.history,
            vec![
                HistoryEntry { step: 0, cut_size: 4, description: "Initial state".to_string() },
                HistoryEntry { step: 1, cut_size: 2, description: "Applied 1 swaps.".to_string() },
            ]
        );
        assert_eq!(result.initial_graph.side_of("N0"), Some(Side::A));
        assert_eq!(result.final_graph.side_of("N0"), Some(Side::B));
        assert_eq!(result.final_graph.side_of("N7"), None);
    }

    #[test]
    fn greedy_on_cycle() {
        let graph = cycle4();
        let config = BisectionPartitioningConfig {
            initial_partitioning: supplied(&graph, &["N0", "N2"], &["N1", "N3"]),
            ..BisectionPartitioningConfig::greedy()
        };
        let result = graph.partition_bisection(&config).unwrap();
        assert_eq!(result.cut_size, 2);
        assert_eq!(result.history[1].description, "Swapped N0 and N1 with gain 2");
        assert_eq!(result.stop_reason, StopReason::Converged);
    }

    #[test]
    fn step_limit_stops_run() {
        let graph = two_triangles();
        let config = BisectionPartitioningConfig {
            initial_partitioning: supplied(&graph, &["N0", "N1", "N3"], &["N2", "N4", "N5"]),
            max_passes: 1,
            ..Default::default()
        };
        let result = graph.partition_bisection(&config).unwrap();
        assert_eq!(result.stop_reason, StopReason::StepLimit);
        assert_eq!(result.steps, 1);
        assert_eq!(result.cut_size, 0);

        let config = BisectionPartitioningConfig { max_passes: 0, ..config };
        let result = graph.partition_bisection(&config).unwrap();
        assert_eq!(result.stop_reason, StopReason::StepLimit);
        assert_eq!(result.history.len(), 1);
        assert_eq!(result.cut_size, 4);
    }

    #[test]
    fn patience_zero_stops_after_first_commit() {
        let graph = two_triangles();
        let config = BisectionPartitioningConfig {
            initial_partitioning: supplied(&graph, &["N0", "N1", "N3"], &["N2", "N4", "N5"]),
            patience: Some(0),
            ..Default::default()
        };
        let result = graph.partition_bisection(&config).unwrap();
        assert_eq!(result.stop_reason, StopReason::Patience);
        assert_eq!(result.history.len(), 2);
    }

    #[test]
    fn observer_sees_every_step() {
        let graph = cycle4();
        let config = BisectionPartitioningConfig {
            initial_partitioning: supplied(&graph, &["N0", "N2"], &["N1", "N3"]),
            ..Default::default()
        };
        let mut recorder = Recorder::default();
        let observed = graph.partition_bisection_observed(&config, &mut recorder).unwrap();
        assert_eq!(recorder.started, vec![1, 2]);
        assert_eq!(recorder.committed, vec![1]);
        assert_eq!(recorder.stopped, Some(StopReason::Converged));

        let verbose = BisectionPartitioningConfig { verbose: true, ..config };
        let narrated = graph.partition_bisection(&verbose).unwrap();
        assert_eq!(narrated.partition, observed.partition);
        assert_eq!(narrated.history, observed.history);
    }

    #[test]
    fn zero_weight_graph_terminates() {
        let graph = from_edges(&[("N0", "N1", 0), ("N1", "N2", 0), ("N2", "N3", 0)]);
        for config in [BisectionPartitioningConfig::default(), BisectionPartitioningConfig::greedy()] {
            let result = graph.partition_bisection(&config).unwrap();
            assert_eq!(result.cut_size, 0);
            assert_eq!(result.stop_reason, StopReason::Converged);
        }
    }

    #[test]
    fn invalid_partition_is_rejected_before_running() {
        let graph = cycle4();
        let config = BisectionPartitioningConfig {
            initial_partitioning: InitialPartitioningMethod::Supplied(Bipartition::from_sides(vec![Side::A])),
            ..Default::default()
        };
        assert!(matches!(
            graph.partition_bisection(&config),
            Err(PartitionError::InvalidPartition { .. })
        ));
    }
}

use crate::{BisectionPartitioningConfig, Graph, PartitionError};

pub struct ExperimentConfig {
    /// How many runs to perform. Run `i` uses `i` as its rng seed.
    pub runs: u32,
    /// Settings shared by every run. Its `rng_seed` is ignored.
    pub base: BisectionPartitioningConfig,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            runs: 20,
            base: BisectionPartitioningConfig::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrialOutcome {
    pub initial_cut: u64,
    pub final_cut: u64,
    /// `(initial - final) / initial`, 0 when the initial cut is already 0.
    pub reduction_rate: f64,
    pub seconds: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExperimentSummary {
    pub trials: Vec<TrialOutcome>,
    pub max_reduction_rate: f64,
    pub avg_reduction_rate: f64,
    pub avg_seconds: f64,
    /// Population standard deviation of the final cut sizes.
    pub final_cut_std_dev: f64,
}

impl ExperimentSummary {
    fn from_trials(trials: Vec<TrialOutcome>) -> Self {
        if trials.is_empty() {
            return Self::default();
        }
        let n = trials.len() as f64;
        let mean_cut = trials.iter().map(|t| t.final_cut as f64).sum::<f64>() / n;
        let variance = trials
            .iter()
            .map(|t| (t.final_cut as f64 - mean_cut).powi(2))
            .sum::<f64>()
            / n;
        Self {
            max_reduction_rate: trials.iter().map(|t| t.reduction_rate).fold(f64::MIN, f64::max),
            avg_reduction_rate: trials.iter().map(|t| t.reduction_rate).sum::<f64>() / n,
            avg_seconds: trials.iter().map(|t| t.seconds).sum::<f64>() / n,
            final_cut_std_dev: variance.sqrt(),
            trials,
        }
    }
}

impl Graph {
    /// Runs the configured bisection repeatedly with seeds `0..runs` and aggregates the results.
    pub fn run_experiment(&self, config: &ExperimentConfig) -> Result<ExperimentSummary, PartitionError> {
        let mut trials = Vec::with_capacity(config.runs as usize);
        for run in 0..config.runs {
            let run_config = BisectionPartitioningConfig {
                rng_seed: run as u64,
                ..config.base.clone()
            };
            let result = self.partition_bisection(&run_config)?;

            let initial_cut = result.initial_cut_size();
            let reduction_rate = if initial_cut > 0 {
                (initial_cut as f64 - result.cut_size as f64) / initial_cut as f64
            } else {
                0.0
            };
            log::trace!(
                "run {}/{}: initial cut {initial_cut}, final cut {}, reduction {:.2}%",
                run + 1,
                config.runs,
                result.cut_size,
                reduction_rate * 100.0
            );
            trials.push(TrialOutcome {
                initial_cut,
                final_cut: result.cut_size,
                reduction_rate,
                seconds: result.elapsed_seconds(),
            });
        }
        Ok(ExperimentSummary::from_trials(trials))
    }
}

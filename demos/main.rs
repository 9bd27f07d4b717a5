use kl_partition::{BisectionPartitioningConfig, ExperimentConfig, Graph, InitialPartitioningMethod};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let graph = match std::env::args().nth(1) {
        Some(path) => Graph::deserialize_netlist(path)?,
        None => Graph::generate_connected(50, 100, &mut StdRng::seed_from_u64(42))?,
    };
    println!("graph: {} nodes, {} edges", graph.vertex_count(), graph.edge_count());

    let configs = [
        ("Simple Greedy", BisectionPartitioningConfig::greedy()),
        ("Classic KL (Random Init)", BisectionPartitioningConfig::default()),
        (
            "KL with BFS Init",
            BisectionPartitioningConfig {
                initial_partitioning: InitialPartitioningMethod::Bfs { start: None },
                ..Default::default()
            },
        ),
    ];

    for (name, config) in configs {
        let t1 = time::Instant::now();
        let result = graph.partition_bisection(&BisectionPartitioningConfig {
            verbose: true,
            ..config.clone()
        })?;
        println!(
            "{name}: edge cut {} -> {} in {} steps ({:?}), time: {}ms",
            result.initial_cut_size(),
            result.cut_size,
            result.steps,
            result.stop_reason,
            t1.elapsed().as_millis()
        );

        let summary = graph.run_experiment(&ExperimentConfig {
            runs: 20,
            base: config,
        })?;
        println!(
            "  20 runs: max reduction {:.2}%, avg reduction {:.2}%, avg runtime {:.6}s, std dev {:.4}",
            summary.max_reduction_rate * 100.0,
            summary.avg_reduction_rate * 100.0,
            summary.avg_seconds,
            summary.final_cut_std_dev
        );
    }
    Ok(())
}

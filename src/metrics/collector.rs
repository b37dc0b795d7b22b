//! Wraps one placement run: measures wall-clock time of the algorithm body
//! only and derives utilization and energy figures from the post-run state of
//! the algorithm's private cluster copy.

use std::time::Instant;

use average::{concatenate, Estimate, Max, Mean, Min, Variance};
use serde::Serialize;

use crate::core::cluster::Cluster;
use crate::core::container::Container;
use crate::core::scheduler::interface::{PlacementAlgorithm, ScheduleError};

concatenate!(
    Estimator,
    [Min, min],
    [Max, max],
    [Mean, mean],
    [Variance, population_variance]
);

/// Spread of per-node cpu-used ratios after a run. Uneven spread indicates
/// the algorithm concentrated load on few nodes.
#[derive(Default, Debug, Clone, Copy, Serialize, PartialEq)]
pub struct UtilizationSpread {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    /// Wall-clock duration of the placement loop, ms.
    pub scheduling_time: f64,
    /// Used cpu over total cluster cpu capacity, percent.
    pub cpu_utilization: f64,
    /// Used memory over total cluster memory capacity, percent.
    pub memory_utilization: f64,
    /// Cluster-wide power draw after placement, watts.
    pub energy: f64,
    /// Simulated total completion time reported by the algorithm, ms.
    pub makespan: f64,
    pub node_count: usize,
    /// Containers no node could fit. Non-zero marks a partial-failure run.
    pub unschedulable_count: usize,
    pub node_cpu_spread: UtilizationSpread,
}

/// Runs the algorithm on the given cluster copy and derives its metrics.
/// Cloning the cluster is the caller's concern and is excluded from the
/// measured scheduling time.
pub fn measure(
    algorithm: &dyn PlacementAlgorithm,
    containers: &[Container],
    cluster: &mut Cluster,
) -> Result<RunMetrics, ScheduleError> {
    let start = Instant::now();
    let outcome = algorithm.run(containers, cluster)?;
    let scheduling_time = start.elapsed().as_secs_f64() * 1000.0;

    let mut total_cpu_capacity = 0.0;
    let mut total_memory_capacity = 0.0;
    let mut used_cpu = 0.0;
    let mut used_memory = 0.0;
    let mut energy = 0.0;
    let mut spread = Estimator::new();

    for node in &cluster.nodes {
        total_cpu_capacity += node.cpu_capacity;
        total_memory_capacity += node.memory_capacity;
        used_cpu += node.used_cpu();
        used_memory += node.used_memory();

        let used_cpu_ratio = node.used_cpu() / node.cpu_capacity;
        energy += node.energy_profile.idle_consumption
            + used_cpu_ratio * node.energy_profile.cpu_energy_factor * node.cpu_capacity;
        spread.add(used_cpu_ratio);
    }

    Ok(RunMetrics {
        scheduling_time,
        cpu_utilization: used_cpu / total_cpu_capacity * 100.0,
        memory_utilization: used_memory / total_memory_capacity * 100.0,
        energy,
        // Algorithms that report no makespan fall back to the scheduling
        // time; zero active nodes falls back to the total node count.
        makespan: if outcome.makespan_ms > 0.0 {
            outcome.makespan_ms
        } else {
            scheduling_time
        },
        node_count: if outcome.active_nodes > 0 {
            outcome.active_nodes
        } else {
            cluster.node_count()
        },
        unschedulable_count: outcome.unschedulable.len(),
        node_cpu_spread: UtilizationSpread {
            min: spread.min(),
            max: spread.max(),
            mean: spread.mean(),
            variance: spread.population_variance(),
        },
    })
}

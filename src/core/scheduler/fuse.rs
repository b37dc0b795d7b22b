//! Hybrid scheduler blending the packing efficiency of bin packing with the
//! fairness ordering of DRF. Containers are ranked by a weighted score and
//! nodes are chosen best-fit by post-placement balance and utilization.

use log::debug;

use crate::core::cluster::Cluster;
use crate::core::container::Container;
use crate::core::scheduler::interface::{
    MakespanModel, PlacementAlgorithm, PlacementOutcome, ScheduleError,
};
use crate::core::scheduler::shares::ShareCalculator;

const MAKESPAN: MakespanModel = MakespanModel {
    base_ms: 60.0,
    cpu_factor: 250.0,
    memory_factor: 0.03,
};

// Empirically chosen weights of the container and node scoring formulas,
// kept verbatim.
const EFFICIENCY_WEIGHT: f64 = 0.6;
const FAIRNESS_WEIGHT: f64 = 0.4;
const BALANCE_WEIGHT: f64 = 0.4;
const UTILIZATION_WEIGHT: f64 = 0.6;

/// Weighted blend of the container's cpu-to-memory efficiency and the inverse
/// of its dominant share. Higher scores are scheduled earlier.
pub fn fuse_score(shares: &ShareCalculator, container: &Container) -> f64 {
    let (dominant_share, _) = shares.dominant_share(container);
    let resource_efficiency = container.cpu_request / container.memory_request;
    let fairness_score = 1.0 / (dominant_share * 10.0 + 1.0);
    EFFICIENCY_WEIGHT * resource_efficiency + FAIRNESS_WEIGHT * fairness_score
}

/// Index of the fitting node that maximizes the weighted balance/utilization
/// score. The first node keeps winning on exact score ties.
fn best_node(cluster: &Cluster, container: &Container) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, node) in cluster.nodes.iter().enumerate() {
        if !node.can_fit(container) {
            continue;
        }
        let remaining_cpu_ratio = (node.available_cpu - container.cpu_request) / node.cpu_capacity;
        let remaining_memory_ratio =
            (node.available_memory - container.memory_request) / node.memory_capacity;

        let balance_score = -(remaining_cpu_ratio - remaining_memory_ratio).abs();
        let utilization_score = 1.0 - (remaining_cpu_ratio + remaining_memory_ratio) / 2.0;
        let node_score = BALANCE_WEIGHT * balance_score + UTILIZATION_WEIGHT * utilization_score;

        match best {
            Some((_, best_score)) if node_score <= best_score => {}
            _ => best = Some((idx, node_score)),
        }
    }
    best.map(|(idx, _)| idx)
}

pub struct FuseScheduler;

impl PlacementAlgorithm for FuseScheduler {
    fn name(&self) -> &'static str {
        "fuse"
    }

    fn run(
        &self,
        containers: &[Container],
        cluster: &mut Cluster,
    ) -> Result<PlacementOutcome, ScheduleError> {
        let shares = ShareCalculator::new(cluster)?;

        let mut ranked: Vec<(&Container, f64)> = containers
            .iter()
            .map(|container| (container, fuse_score(&shares, container)))
            .collect();
        // Highest score first, higher priority wins ties.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(b.0.priority.cmp(&a.0.priority)));

        let mut outcome = PlacementOutcome::default();
        for (container, _) in ranked {
            match best_node(cluster, container) {
                Some(idx) => {
                    let node = &mut cluster.nodes[idx];
                    node.allocate(container);
                    outcome.assignments.record(&node.id, &container.id);
                    outcome.makespan_ms = outcome
                        .makespan_ms
                        .max(MAKESPAN.completion_time_ms(container));
                }
                None => {
                    debug!(
                        "container {} could not be scheduled with FUSE",
                        container.id
                    );
                    outcome.unschedulable.push(container.id.clone());
                }
            }
        }
        outcome.active_nodes = outcome.assignments.active_nodes();
        Ok(outcome)
    }
}

//! Dominant-resource-fairness placement. Containers are served smallest
//! dominant share first so no workload class starves on either dimension.

use log::debug;

use crate::core::cluster::Cluster;
use crate::core::container::Container;
use crate::core::scheduler::interface::{
    first_fit, DominantResource, MakespanModel, PlacementAlgorithm, PlacementOutcome,
    ScheduleError,
};
use crate::core::scheduler::shares::ShareCalculator;

const MAKESPAN: MakespanModel = MakespanModel {
    base_ms: 80.0,
    cpu_factor: 300.0,
    memory_factor: 0.08,
};

pub struct DrfScheduler;

impl PlacementAlgorithm for DrfScheduler {
    fn name(&self) -> &'static str {
        "drf"
    }

    fn run(
        &self,
        containers: &[Container],
        cluster: &mut Cluster,
    ) -> Result<PlacementOutcome, ScheduleError> {
        // Totals are captured before any placement mutates the cluster.
        let shares = ShareCalculator::new(cluster)?;

        let mut ranked: Vec<(&Container, f64, DominantResource)> = containers
            .iter()
            .map(|container| {
                let (dominant_share, dominant) = shares.dominant_share(container);
                (container, dominant_share, dominant)
            })
            .collect();
        // Smallest dominant share first, higher priority wins ties.
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(b.0.priority.cmp(&a.0.priority)));

        let mut outcome = PlacementOutcome::default();
        for (container, _, dominant) in ranked {
            // Prefer the nodes with the most headroom in the container's
            // dominant dimension.
            match dominant {
                DominantResource::Cpu => cluster
                    .nodes
                    .sort_by(|a, b| b.available_cpu.total_cmp(&a.available_cpu)),
                DominantResource::Memory => cluster
                    .nodes
                    .sort_by(|a, b| b.available_memory.total_cmp(&a.available_memory)),
            }

            match first_fit(cluster, container) {
                Some(node_id) => {
                    outcome.assignments.record(&node_id, &container.id);
                    outcome.makespan_ms = outcome
                        .makespan_ms
                        .max(MAKESPAN.completion_time_ms(container));
                }
                None => {
                    debug!("container {} could not be scheduled with DRF", container.id);
                    outcome.unschedulable.push(container.id.clone());
                }
            }
        }
        outcome.active_nodes = outcome.assignments.active_nodes();
        Ok(outcome)
    }
}

//! Capacity-greedy first-fit-decreasing placement. Packs containers into as
//! few nodes as possible, prioritizing resource efficiency over fairness.

use log::debug;

use crate::core::cluster::Cluster;
use crate::core::container::Container;
use crate::core::scheduler::interface::{
    first_fit, MakespanModel, PlacementAlgorithm, PlacementOutcome, ScheduleError,
};

const MAKESPAN: MakespanModel = MakespanModel {
    base_ms: 100.0,
    cpu_factor: 500.0,
    memory_factor: 0.05,
};

pub struct BinPackingScheduler;

impl PlacementAlgorithm for BinPackingScheduler {
    fn name(&self) -> &'static str {
        "bin_packing"
    }

    fn run(
        &self,
        containers: &[Container],
        cluster: &mut Cluster,
    ) -> Result<PlacementOutcome, ScheduleError> {
        let mut order: Vec<&Container> = containers.iter().collect();
        // Stable sort keeps the original order for equal cpu requests.
        order.sort_by(|a, b| b.cpu_request.total_cmp(&a.cpu_request));

        let mut outcome = PlacementOutcome::default();
        for container in order {
            match first_fit(cluster, container) {
                Some(node_id) => {
                    outcome.assignments.record(&node_id, &container.id);
                    outcome.makespan_ms = outcome
                        .makespan_ms
                        .max(MAKESPAN.completion_time_ms(container));
                }
                None => {
                    debug!(
                        "container {} could not be scheduled with bin packing",
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

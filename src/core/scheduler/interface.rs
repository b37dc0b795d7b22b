//! Trait and shared result types implemented by every placement algorithm.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::cluster::Cluster;
use crate::core::container::Container;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("cluster has zero total cpu or memory capacity")]
    EmptyCluster,
}

/// Which of the two resource dimensions dominates a container's demand.
/// Memory wins exact share ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantResource {
    Cpu,
    Memory,
}

/// Simulated completion-time model for one placed container. The constants
/// are empirically chosen per algorithm and kept verbatim.
#[derive(Debug, Clone, Copy)]
pub struct MakespanModel {
    pub base_ms: f64,
    pub cpu_factor: f64,
    pub memory_factor: f64,
}

impl MakespanModel {
    pub fn completion_time_ms(&self, container: &Container) -> f64 {
        self.base_ms
            + container.cpu_request * self.cpu_factor
            + container.memory_request * self.memory_factor
    }
}

/// Node id -> container ids in placement order. Built once inside a scheduler
/// run; immutable to consumers afterwards.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct AssignmentTable {
    by_node: BTreeMap<String, Vec<String>>,
}

impl AssignmentTable {
    pub(crate) fn record(&mut self, node_id: &str, container_id: &str) {
        self.by_node
            .entry(node_id.to_string())
            .or_default()
            .push(container_id.to_string());
    }

    /// Container ids placed on the node, in placement order.
    pub fn placed_on(&self, node_id: &str) -> Option<&[String]> {
        self.by_node.get(node_id).map(Vec::as_slice)
    }

    /// The number of nodes that received at least one container.
    pub fn active_nodes(&self) -> usize {
        self.by_node.len()
    }

    pub fn total_placed(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_node
            .iter()
            .map(|(node_id, containers)| (node_id.as_str(), containers.as_slice()))
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    pub assignments: AssignmentTable,
    /// Max simulated completion time over all placed containers, ms.
    pub makespan_ms: f64,
    pub active_nodes: usize,
    /// Ids of containers no node could fit, in attempt order. Non-fatal.
    pub unschedulable: Vec<String>,
}

/// Trait which should implement any placement algorithm in the benchmark.
pub trait PlacementAlgorithm: Send + Sync {
    fn name(&self) -> &'static str;

    /// Places the containers onto the cluster's nodes, decrementing their
    /// remaining capacity. The cluster must be a private copy of the caller;
    /// the containers are read-only.
    fn run(
        &self,
        containers: &[Container],
        cluster: &mut Cluster,
    ) -> Result<PlacementOutcome, ScheduleError>;
}

/// Scans nodes in their current order and allocates on the first node with
/// sufficient remaining capacity. Returns the chosen node id.
pub(crate) fn first_fit(cluster: &mut Cluster, container: &Container) -> Option<String> {
    for node in cluster.nodes.iter_mut() {
        if node.can_fit(container) {
            node.allocate(container);
            return Some(node.id.clone());
        }
    }
    None
}

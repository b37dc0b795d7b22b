//! Cluster generation and capacity totals.

use serde::{Deserialize, Serialize};

use crate::core::node::Node;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterTotals {
    pub cpu: f64,
    pub memory: f64,
}

/// The node set one scheduler run operates on. Every run receives its own
/// clone so runs never observe each other's mutations.
#[derive(Default, Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Cluster {
    pub nodes: Vec<Node>,
}

impl Cluster {
    /// Produces `node_count` identical nodes with the fixed capacity and
    /// energy constants. Deterministic given the count.
    pub fn homogeneous(node_count: usize) -> Self {
        let nodes = (0..node_count)
            .map(|idx| Node::new(format!("node-{}", idx)))
            .collect();
        Self { nodes }
    }

    /// Sums the remaining capacity over all nodes. On a fresh cluster this
    /// equals total capacity.
    pub fn totals(&self) -> ClusterTotals {
        let mut totals = ClusterTotals {
            cpu: 0.0,
            memory: 0.0,
        };
        for node in &self.nodes {
            totals.cpu += node.available_cpu;
            totals.memory += node.available_memory;
        }
        totals
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::{NODE_CPU_CAPACITY, NODE_MEMORY_CAPACITY};

    #[test]
    fn test_homogeneous_cluster_generation() {
        let cluster = Cluster::homogeneous(3);
        assert_eq!(cluster.node_count(), 3);
        assert_eq!(cluster.nodes[0].id, "node-0");
        assert_eq!(cluster.nodes[2].id, "node-2");
        for node in &cluster.nodes {
            assert_eq!(node.available_cpu, NODE_CPU_CAPACITY);
            assert_eq!(node.available_memory, NODE_MEMORY_CAPACITY);
        }

        let totals = cluster.totals();
        assert_eq!(totals.cpu, 3.0 * NODE_CPU_CAPACITY);
        assert_eq!(totals.memory, 3.0 * NODE_MEMORY_CAPACITY);
    }

    #[test]
    fn test_empty_cluster_has_zero_totals() {
        let totals = Cluster::homogeneous(0).totals();
        assert_eq!(totals.cpu, 0.0);
        assert_eq!(totals.memory, 0.0);
    }
}

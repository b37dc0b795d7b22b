//! Type definitions for cluster nodes and their energy model.

use serde::{Deserialize, Serialize};

use crate::core::container::Container;

/// Fixed per-node capacity of the homogeneous simulated cluster.
pub const NODE_CPU_CAPACITY: f64 = 4.0; // cores
pub const NODE_MEMORY_CAPACITY: f64 = 8192.0; // MB

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EnergyProfile {
    /// Draw of a powered node with no load, in watts.
    pub idle_consumption: f64,
    /// Upper bound of the node's power draw, in watts. Informational.
    pub max_consumption: f64,
    /// Additional draw per fully used core, in watts.
    pub cpu_energy_factor: f64,
}

impl Default for EnergyProfile {
    fn default() -> Self {
        Self {
            idle_consumption: 100.0,
            max_consumption: 400.0,
            cpu_energy_factor: 75.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub cpu_capacity: f64,
    pub memory_capacity: f64,
    /// Remaining capacity, decremented on every placement.
    pub available_cpu: f64,
    pub available_memory: f64,
    pub energy_profile: EnergyProfile,
}

impl Node {
    pub fn new(id: String) -> Self {
        Self {
            id,
            cpu_capacity: NODE_CPU_CAPACITY,
            memory_capacity: NODE_MEMORY_CAPACITY,
            available_cpu: NODE_CPU_CAPACITY,
            available_memory: NODE_MEMORY_CAPACITY,
            energy_profile: Default::default(),
        }
    }

    pub fn can_fit(&self, container: &Container) -> bool {
        self.available_cpu >= container.cpu_request
            && self.available_memory >= container.memory_request
    }

    /// Subtracts the container's requests from the remaining capacity.
    /// Callers must check `can_fit` first; capacity never goes negative.
    pub fn allocate(&mut self, container: &Container) {
        assert!(
            self.can_fit(container),
            "allocation of {} would overcommit node {}",
            container.id,
            self.id
        );
        self.available_cpu -= container.cpu_request;
        self.available_memory -= container.memory_request;
    }

    pub fn used_cpu(&self) -> f64 {
        self.cpu_capacity - self.available_cpu
    }

    pub fn used_memory(&self) -> f64 {
        self.memory_capacity - self.available_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_decrements_remaining_capacity() {
        let mut node = Node::new("node-0".to_string());
        let container = Container::new("container-0".to_string(), 1.0, 2048.0, 5);
        assert!(node.can_fit(&container));
        node.allocate(&container);
        assert_eq!(node.available_cpu, 3.0);
        assert_eq!(node.available_memory, 6144.0);
        assert_eq!(node.used_cpu(), 1.0);
        assert_eq!(node.used_memory(), 2048.0);
    }

    #[test]
    #[should_panic(expected = "overcommit")]
    fn test_allocate_panics_on_overcommit() {
        let mut node = Node::new("node-0".to_string());
        let container = Container::new("container-0".to_string(), 5.0, 1024.0, 5);
        node.allocate(&container);
    }
}

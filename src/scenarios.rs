//! Built-in scenario catalog. Scenarios are named workload/cluster shapes;
//! the orchestrator only consumes the config they expand to.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::config::{DistributionTag, SimulationConfig};

pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub container_count: usize,
    pub node_count: usize,
    pub cpu_distribution: DistributionTag,
    pub memory_distribution: DistributionTag,
}

impl Scenario {
    pub fn to_config(&self, seed: u64) -> SimulationConfig {
        SimulationConfig {
            container_count: self.container_count,
            node_count: self.node_count,
            cpu_distribution: self.cpu_distribution,
            memory_distribution: self.memory_distribution,
            seed,
        }
    }
}

lazy_static! {
    pub static ref SCENARIOS: HashMap<&'static str, Scenario> = {
        HashMap::from([
            (
                "scenario1",
                Scenario {
                    name: "High Resource Demand",
                    description: "Many containers requiring high cpu and memory resources",
                    container_count: 50,
                    node_count: 10,
                    cpu_distribution: DistributionTag::High,
                    memory_distribution: DistributionTag::High,
                },
            ),
            (
                "scenario2",
                Scenario {
                    name: "Low Resource Demand",
                    description: "Many containers with minimal resource requirements",
                    container_count: 100,
                    node_count: 5,
                    cpu_distribution: DistributionTag::Low,
                    memory_distribution: DistributionTag::Low,
                },
            ),
            (
                "scenario3",
                Scenario {
                    name: "Mixed Workload",
                    description: "Combination of high and low resource-demanding containers",
                    container_count: 75,
                    node_count: 8,
                    cpu_distribution: DistributionTag::Mixed,
                    memory_distribution: DistributionTag::Mixed,
                },
            ),
            (
                "scenario4",
                Scenario {
                    name: "High Scheduling Load",
                    description: "Large number of containers and nodes to test scheduler performance",
                    container_count: 200,
                    node_count: 20,
                    cpu_distribution: DistributionTag::Mixed,
                    memory_distribution: DistributionTag::Mixed,
                },
            ),
            (
                "scenario5",
                Scenario {
                    name: "Stress Test",
                    description: "Maximum load on the system with varied resource requirements",
                    container_count: 300,
                    node_count: 25,
                    cpu_distribution: DistributionTag::High,
                    memory_distribution: DistributionTag::Mixed,
                },
            ),
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contains_five_scenarios() {
        assert_eq!(SCENARIOS.len(), 5);
        for key in ["scenario1", "scenario2", "scenario3", "scenario4", "scenario5"] {
            assert!(SCENARIOS.contains_key(key));
        }
    }

    #[test]
    fn test_scenario_expands_to_valid_config() {
        let config = SCENARIOS["scenario2"].to_config(46);
        assert_eq!(config.container_count, 100);
        assert_eq!(config.node_count, 5);
        assert_eq!(config.cpu_distribution, DistributionTag::Low);
        assert_eq!(config.seed, 46);
        assert!(config.validate().is_ok());
    }
}

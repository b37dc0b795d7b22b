//! Synthetic workload generation with a seeded random source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::config::DistributionTag;
use crate::core::container::Container;

pub struct WorkloadGenerator {
    rng: Pcg64,
}

impl WorkloadGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Draws `count` containers with resource requests uniform over the range
    /// the distribution tags select. Pure function of the inputs and the rng
    /// state: cpu is rounded to 2 decimals, memory is floored to a whole MB.
    pub fn generate(
        &mut self,
        count: usize,
        cpu_distribution: DistributionTag,
        memory_distribution: DistributionTag,
    ) -> Vec<Container> {
        let mut containers = Vec::with_capacity(count);
        for idx in 0..count {
            let cpu_request: f64 = match cpu_distribution {
                DistributionTag::Low => self.rng.gen_range(0.1..0.4),
                DistributionTag::High => self.rng.gen_range(0.5..1.0),
                DistributionTag::Mixed => self.rng.gen_range(0.1..1.0),
            };
            let memory_request: f64 = match memory_distribution {
                DistributionTag::Low => self.rng.gen_range(64.0..576.0),
                DistributionTag::High => self.rng.gen_range(1024.0..2048.0),
                DistributionTag::Mixed => self.rng.gen_range(64.0..2024.0),
            };
            containers.push(Container {
                id: format!("container-{}", idx),
                cpu_request: (cpu_request * 100.0).round() / 100.0,
                memory_request: memory_request.floor(),
                priority: self.rng.gen_range(1..=10),
            });
        }
        containers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_stay_in_tagged_ranges() {
        let mut generator = WorkloadGenerator::new(123);
        let containers = generator.generate(1000, DistributionTag::Low, DistributionTag::High);
        assert_eq!(containers.len(), 1000);
        for container in &containers {
            assert!(container.cpu_request >= 0.1 && container.cpu_request <= 0.4);
            assert!(container.memory_request >= 1024.0 && container.memory_request < 2048.0);
            assert!(container.priority >= 1 && container.priority <= 10);
            // memory is floored to a whole MB
            assert_eq!(container.memory_request, container.memory_request.floor());
        }
    }

    #[test]
    fn test_cpu_rounded_to_two_decimals() {
        let mut generator = WorkloadGenerator::new(7);
        for container in generator.generate(100, DistributionTag::Mixed, DistributionTag::Mixed) {
            let scaled = container.cpu_request * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_workload() {
        let first = WorkloadGenerator::new(46).generate(
            200,
            DistributionTag::Mixed,
            DistributionTag::Mixed,
        );
        let second = WorkloadGenerator::new(46).generate(
            200,
            DistributionTag::Mixed,
            DistributionTag::Mixed,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_container_ids_are_sequential() {
        let mut generator = WorkloadGenerator::new(1);
        let containers = generator.generate(3, DistributionTag::Low, DistributionTag::Low);
        let ids: Vec<&str> = containers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["container-0", "container-1", "container-2"]);
    }
}

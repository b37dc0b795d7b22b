//! Dominant-share computation over fixed cluster capacity totals, shared by
//! the fairness-aware algorithms.

use crate::core::cluster::Cluster;
use crate::core::container::Container;
use crate::core::scheduler::interface::{DominantResource, ScheduleError};

/// Capacity totals captured before any placement mutates the cluster.
#[derive(Debug, Clone, Copy)]
pub struct ShareCalculator {
    total_cpu: f64,
    total_memory: f64,
}

impl ShareCalculator {
    /// Fails on a degenerate cluster so no share computation divides by zero.
    pub fn new(cluster: &Cluster) -> Result<Self, ScheduleError> {
        let totals = cluster.totals();
        if totals.cpu <= 0.0 || totals.memory <= 0.0 {
            return Err(ScheduleError::EmptyCluster);
        }
        Ok(Self {
            total_cpu: totals.cpu,
            total_memory: totals.memory,
        })
    }

    /// The larger of the container's cpu and memory shares of total capacity,
    /// together with the dominating dimension.
    pub fn dominant_share(&self, container: &Container) -> (f64, DominantResource) {
        let cpu_share = container.cpu_request / self.total_cpu;
        let memory_share = container.memory_request / self.total_memory;
        if cpu_share > memory_share {
            (cpu_share, DominantResource::Cpu)
        } else {
            (memory_share, DominantResource::Memory)
        }
    }
}

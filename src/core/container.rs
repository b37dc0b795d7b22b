//! Type definition for the container primitive of a synthetic workload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Container {
    pub id: String,
    /// Requested cpu in cores, fractional.
    pub cpu_request: f64,
    /// Requested memory in megabytes.
    pub memory_request: f64,
    /// 1-10, higher is more important.
    pub priority: u8,
}

impl Container {
    pub fn new(id: String, cpu_request: f64, memory_request: f64, priority: u8) -> Self {
        Self {
            id,
            cpu_request,
            memory_request,
            priority,
        }
    }
}

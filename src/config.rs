//! Config fields definitions and validation for a simulation run.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("container count must be positive")]
    ZeroContainerCount,
    #[error("unknown distribution tag: {0:?}, expected one of low, high, mixed")]
    UnknownDistributionTag(String),
    #[error("unknown scenario: {0:?}")]
    UnknownScenario(String),
}

/// Named range for randomized container resource requests.
#[derive(Default, Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistributionTag {
    Low,
    High,
    #[default]
    Mixed,
}

impl FromStr for DistributionTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(DistributionTag::Low),
            "high" => Ok(DistributionTag::High),
            "mixed" => Ok(DistributionTag::Mixed),
            other => Err(ValidationError::UnknownDistributionTag(other.to_string())),
        }
    }
}

fn default_seed() -> u64 {
    123
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub container_count: usize,
    pub node_count: usize,
    #[serde(default)]
    pub cpu_distribution: DistributionTag,
    #[serde(default)]
    pub memory_distribution: DistributionTag,
    /// Seed for the workload random source. Fixed seed gives reproducible runs.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl SimulationConfig {
    /// Checks the config before any workload or cluster entity is created.
    ///
    /// Counts are unsigned, so a negative count is unrepresentable. A zero
    /// node count passes validation and is reported by the orchestrator as an
    /// empty cluster instead.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.container_count == 0 {
            return Err(ValidationError::ZeroContainerCount);
        }
        Ok(())
    }
}

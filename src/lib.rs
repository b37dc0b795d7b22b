//! Offline comparison of three container-placement strategies (bin packing,
//! dominant resource fairness and a hybrid scorer) over a shared synthetic
//! workload and cluster snapshot.

pub mod config;
pub mod core;
pub mod metrics;
pub mod scenarios;
pub mod simulator;

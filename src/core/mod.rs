pub mod cluster;
pub mod container;
pub mod node;
pub mod scheduler;
pub mod workload;

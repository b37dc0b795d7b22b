use std::collections::HashMap;

use placement_sim::core::cluster::Cluster;
use placement_sim::core::container::Container;
use placement_sim::core::scheduler::bin_packing::BinPackingScheduler;
use placement_sim::core::scheduler::interface::PlacementAlgorithm;

fn create_container(id: &str, cpu: f64, memory: f64, priority: u8) -> Container {
    Container::new(id.to_string(), cpu, memory, priority)
}

#[test]
fn test_containers_placed_in_decreasing_cpu_order() {
    let containers = vec![
        create_container("small", 0.5, 512.0, 5),
        create_container("large", 2.0, 512.0, 5),
        create_container("medium", 1.0, 512.0, 5),
    ];
    let mut cluster = Cluster::homogeneous(1);

    let outcome = BinPackingScheduler.run(&containers, &mut cluster).unwrap();
    assert_eq!(
        outcome.assignments.placed_on("node-0").unwrap(),
        ["large", "medium", "small"]
    );
    assert_eq!(outcome.active_nodes, 1);
    assert!(outcome.unschedulable.is_empty());
}

#[test]
fn test_equal_cpu_requests_keep_original_order() {
    let containers = vec![
        create_container("first", 1.0, 512.0, 1),
        create_container("second", 1.0, 512.0, 10),
        create_container("third", 1.0, 512.0, 5),
    ];
    let mut cluster = Cluster::homogeneous(1);

    let outcome = BinPackingScheduler.run(&containers, &mut cluster).unwrap();
    assert_eq!(
        outcome.assignments.placed_on("node-0").unwrap(),
        ["first", "second", "third"]
    );
}

#[test]
fn test_first_fit_picks_first_node_with_space() {
    let containers = vec![
        create_container("filler", 3.5, 1024.0, 5),
        create_container("spill", 1.0, 1024.0, 5),
    ];
    let mut cluster = Cluster::homogeneous(2);

    let outcome = BinPackingScheduler.run(&containers, &mut cluster).unwrap();
    // filler leaves 0.5 cores on node-0, so spill moves on to node-1
    assert_eq!(outcome.assignments.placed_on("node-0").unwrap(), ["filler"]);
    assert_eq!(outcome.assignments.placed_on("node-1").unwrap(), ["spill"]);
    assert_eq!(outcome.active_nodes, 2);
}

#[test]
fn test_memory_shortage_also_blocks_placement() {
    let containers = vec![
        create_container("memory-hog", 0.5, 8192.0, 5),
        create_container("small", 0.5, 512.0, 5),
    ];
    let mut cluster = Cluster::homogeneous(1);

    let outcome = BinPackingScheduler.run(&containers, &mut cluster).unwrap();
    assert_eq!(
        outcome.assignments.placed_on("node-0").unwrap(),
        ["memory-hog"]
    );
    assert_eq!(outcome.unschedulable, vec!["small".to_string()]);
}

#[test]
fn test_unschedulable_containers_are_non_fatal() {
    let containers = vec![
        create_container("a", 3.0, 1024.0, 5),
        create_container("b", 3.0, 1024.0, 5),
    ];
    let mut cluster = Cluster::homogeneous(1);

    let outcome = BinPackingScheduler.run(&containers, &mut cluster).unwrap();
    assert_eq!(outcome.assignments.total_placed(), 1);
    assert_eq!(outcome.unschedulable.len(), 1);
    assert_eq!(cluster.nodes[0].available_cpu, 1.0);
}

#[test]
fn test_makespan_is_max_completion_time() {
    let containers = vec![
        create_container("a", 1.0, 2048.0, 5),
        create_container("b", 0.5, 512.0, 5),
    ];
    let mut cluster = Cluster::homogeneous(1);

    let outcome = BinPackingScheduler.run(&containers, &mut cluster).unwrap();
    // container a dominates: 100 + 1.0 * 500 + 2048 * 0.05
    assert_eq!(outcome.makespan_ms, 100.0 + 1.0 * 500.0 + 2048.0 * 0.05);
}

#[test]
fn test_capacity_conservation() {
    let _ = env_logger::try_init();

    let containers: Vec<Container> = (0..40)
        .map(|idx| {
            create_container(
                &format!("container-{}", idx),
                0.1 + 0.07 * (idx % 10) as f64,
                128.0 + 256.0 * (idx % 7) as f64,
                1 + (idx % 10) as u8,
            )
        })
        .collect();
    let requests: HashMap<&str, &Container> = containers
        .iter()
        .map(|container| (container.id.as_str(), container))
        .collect();

    let mut cluster = Cluster::homogeneous(3);
    let outcome = BinPackingScheduler.run(&containers, &mut cluster).unwrap();

    for node in &cluster.nodes {
        assert!(node.available_cpu >= 0.0);
        assert!(node.available_memory >= 0.0);

        let placed = outcome.assignments.placed_on(&node.id).unwrap_or(&[]);
        let cpu_sum: f64 = placed.iter().map(|id| requests[id.as_str()].cpu_request).sum();
        let memory_sum: f64 = placed
            .iter()
            .map(|id| requests[id.as_str()].memory_request)
            .sum();
        assert!((node.used_cpu() - cpu_sum).abs() < 1e-9);
        assert!((node.used_memory() - memory_sum).abs() < 1e-9);
    }
    assert_eq!(
        outcome.assignments.total_placed() + outcome.unschedulable.len(),
        containers.len()
    );
}

use placement_sim::core::cluster::Cluster;
use placement_sim::core::container::Container;
use placement_sim::core::scheduler::bin_packing::BinPackingScheduler;
use placement_sim::metrics::collector::measure;

fn create_container(id: &str, cpu: f64, memory: f64, priority: u8) -> Container {
    Container::new(id.to_string(), cpu, memory, priority)
}

#[test]
fn test_utilization_and_energy_derivation() {
    let containers = vec![create_container("a", 1.0, 2048.0, 5)];
    let mut cluster = Cluster::homogeneous(2);

    let metrics = measure(&BinPackingScheduler, &containers, &mut cluster).unwrap();
    // 1.0 of 8 cores used, 2048 of 16384 MB used
    assert_eq!(metrics.cpu_utilization, 12.5);
    assert_eq!(metrics.memory_utilization, 12.5);
    // node-0: 100 + (1.0 / 4) * 75 * 4 = 175 W, node-1 idle: 100 W
    assert_eq!(metrics.energy, 275.0);
    assert_eq!(metrics.node_count, 1);
    assert_eq!(metrics.unschedulable_count, 0);
    assert_eq!(metrics.makespan, 100.0 + 1.0 * 500.0 + 2048.0 * 0.05);
}

#[test]
fn test_node_cpu_spread_reflects_packing() {
    let containers = vec![
        create_container("a", 2.0, 1024.0, 5),
        create_container("b", 2.0, 1024.0, 5),
    ];
    let mut cluster = Cluster::homogeneous(2);

    let metrics = measure(&BinPackingScheduler, &containers, &mut cluster).unwrap();
    // both containers pack onto node-0, node-1 stays empty
    assert_eq!(metrics.node_cpu_spread.min, 0.0);
    assert_eq!(metrics.node_cpu_spread.max, 1.0);
    assert_eq!(metrics.node_cpu_spread.mean, 0.5);
}

#[test]
fn test_fallbacks_when_nothing_is_placed() {
    let containers = vec![create_container("oversized", 9.0, 1024.0, 5)];
    let mut cluster = Cluster::homogeneous(2);

    let metrics = measure(&BinPackingScheduler, &containers, &mut cluster).unwrap();
    assert_eq!(metrics.unschedulable_count, 1);
    // no placement reported: makespan falls back to the scheduling time and
    // node count to the cluster size
    assert_eq!(metrics.makespan, metrics.scheduling_time);
    assert_eq!(metrics.node_count, 2);
    assert_eq!(metrics.cpu_utilization, 0.0);
    assert_eq!(metrics.energy, 200.0);
}

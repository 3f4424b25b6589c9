use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indexmap::IndexMap;
use wayfinder_admin::editor::tap_routing::{route_tap, HitTestConfig};
use wayfinder_admin::geometry::CanvasScale;
use wayfinder_admin::models::{derive_connections, HitPolicy, MapNode, NavigationPath, NodeId};

const GRID: usize = 20;

/// A grid of nodes with a path between every horizontal neighbour, plus as many
/// paths again that belong to other maps.
fn build_map() -> (Vec<MapNode>, Vec<NavigationPath>) {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
    let mut nodes = Vec::new();
    let mut paths = Vec::new();

    for row in 0..GRID {
        for col in 0..GRID {
            #[allow(clippy::cast_precision_loss)]
            let position = (col as f64 * 50.0, row as f64 * 50.0);
            nodes.push(MapNode::new(format!("n{row}-{col}").as_str(), "m1", "Node", position));

            if col > 0 {
                let id = format!("p{row}-{col}");
                paths.push(NavigationPath::new(&id, &id, format!("n{row}-{}", col - 1).as_str(), format!("n{row}-{col}").as_str(), created));
                let foreign = format!("x{row}-{col}");
                paths.push(NavigationPath::new(&foreign, &foreign, "elsewhere-a", "elsewhere-b", created));
            }
        }
    }

    (nodes, paths)
}

fn benchmark_tap_routing(c: &mut Criterion) {
    let (nodes, paths) = build_map();
    let connections = derive_connections(&nodes, &paths);
    let index: IndexMap<NodeId, MapNode> = nodes.iter().map(|n| (n.id.clone(), n.clone())).collect();

    c.bench_function("derive_connections", |b| {
        b.iter(|| derive_connections(black_box(&nodes), black_box(&paths)));
    });

    // Bottom-right corner is the worst case for first-match
    let tap = (GRID as f64 * 50.0 - 75.0, GRID as f64 * 50.0 - 45.0);

    c.bench_function("route_tap_first_match", |b| {
        b.iter(|| {
            route_tap(
                black_box(tap),
                CanvasScale::IDENTITY,
                None,
                black_box(&connections),
                black_box(&index),
                HitTestConfig::default(),
            )
        });
    });

    let nearest = HitTestConfig { policy: HitPolicy::Nearest, ..HitTestConfig::default() };
    c.bench_function("route_tap_nearest", |b| {
        b.iter(|| {
            route_tap(
                black_box(tap),
                CanvasScale::IDENTITY,
                None,
                black_box(&connections),
                black_box(&index),
                nearest,
            )
        });
    });
}

criterion_group!(benches, benchmark_tap_routing);
criterion_main!(benches);

//! Integration tests for eit-graph.

use eit_core::Id;
use eit_graph::{GraphError, IntensityGrid, NetworkBuilder, build_graph};
use proptest::prelude::*;

fn sample_grid() -> IntensityGrid {
    IntensityGrid::from_rows(vec![
        vec![1.0, 1.0, 23.0, 34.0, 34.0, 24.0, 1.0, 1.0],
        vec![1.0, 38.0, 36.0, 35.0, 35.0, 36.0, 39.0, 1.0],
        vec![23.0, 36.0, 35.0, 35.0, 35.0, 35.0, 36.0, 24.0],
        vec![33.0, 35.0, 35.0, 35.0, 35.0, 35.0, 35.0, 34.0],
        vec![33.0, 35.0, 35.0, 35.0, 35.0, 35.0, 35.0, 34.0],
        vec![24.0, 36.0, 35.0, 35.0, 35.0, 35.0, 36.0, 24.0],
        vec![1.0, 39.0, 36.0, 35.0, 35.0, 36.0, 39.0, 1.0],
        vec![1.0, 1.0, 24.0, 34.0, 34.0, 24.0, 1.0, 1.0],
    ])
    .unwrap()
}

#[test]
fn sample_grid_regression() {
    let graph = build_graph(&sample_grid(), 4.0, 0.5, 1000.0).unwrap();

    // Lattice points of the radius-4 disc around (4, 4), clipped to 8x8.
    assert_eq!(graph.node_count(), 47);
    assert_eq!(graph.node_at(4, 4).map(|id| graph.degree(id)), Some(4));

    let node0 = Id::from_index(0);
    let (to, edge) = graph.neighbors(node0).next().unwrap();
    assert_eq!(to, Id::from_index(3));
    assert!((edge.resistance - 29.477).abs() < 5e-4);

    for node in graph.nodes() {
        let degree = graph.degree(node.id);
        assert!((1..=4).contains(&degree), "node {} has degree {}", node.id, degree);
        assert_eq!(node.boundary, degree < 4);
        assert!((0.0..=1.0).contains(&node.x));
        assert!((0.0..=1.0).contains(&node.y));
    }
}

#[test]
fn ids_follow_row_major_scan() {
    let graph = build_graph(&sample_grid(), 4.0, 0.5, 1000.0).unwrap();
    let cells: Vec<(usize, usize)> = graph.nodes().iter().map(|n| (n.row, n.col)).collect();
    let mut sorted = cells.clone();
    sorted.sort_unstable();
    assert_eq!(cells, sorted);

    for (i, node) in graph.nodes().iter().enumerate() {
        assert_eq!(node.id.idx(), i);
        assert_eq!(graph.node_at(node.row, node.col), Some(node.id));
    }
}

#[test]
fn boundary_nodes_reported_in_id_order() {
    let graph = build_graph(&sample_grid(), 4.0, 0.5, 1000.0).unwrap();
    let boundary = graph.boundary_nodes();
    assert!(!boundary.is_empty());
    assert_eq!(boundary[0], Id::from_index(0));
    assert!(boundary.windows(2).all(|w| w[0] < w[1]));
    assert!(boundary.len() < graph.node_count());
}

#[test]
fn large_radius_admits_whole_grid() {
    let grid = IntensityGrid::from_rows(vec![vec![10.0; 4]; 3]).unwrap();
    let graph = build_graph(&grid, 100.0, 0.5, 1000.0).unwrap();
    assert_eq!(graph.node_count(), 12);
    // 3 rows x 3 horizontal links + 2 x 4 vertical links
    assert_eq!(graph.edge_count(), 17);
}

#[test]
fn hand_built_circuit() {
    // Four-node demo circuit: 1-2 (5), 1-3 (10), 2-3 (20), 3-4 (15).
    let mut builder = NetworkBuilder::new(2, 2);
    let n1 = builder.add_node(0, 0);
    let n2 = builder.add_node(0, 1);
    let n3 = builder.add_node(1, 0);
    let n4 = builder.add_node(1, 1);
    builder.add_edge(n1, n2, 5.0);
    builder.add_edge(n1, n3, 10.0);
    builder.add_edge(n2, n3, 20.0);
    builder.add_edge(n3, n4, 15.0);
    let graph = builder.build().unwrap();

    assert_eq!(graph.degree(n3), 3);
    assert_eq!(graph.boundary_nodes().len(), 4);
    let resistances: Vec<f64> = graph.neighbors(n3).map(|(_, e)| e.resistance).collect();
    assert_eq!(resistances, vec![10.0, 20.0, 15.0]);
}

#[test]
fn single_cell_grid_is_rejected() {
    let grid = IntensityGrid::from_rows(vec![vec![3.0]]).unwrap();
    assert!(matches!(
        build_graph(&grid, 10.0, 0.5, 1000.0),
        Err(GraphError::IsolatedNode { .. })
    ));
}

fn grid_strategy() -> impl Strategy<Value = IntensityGrid> {
    (1_usize..12, 1_usize..12).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(1.0_f64..255.0, rows * cols)
            .prop_map(move |data| IntensityGrid::new(rows, cols, data).unwrap())
    })
}

proptest! {
    #[test]
    fn degree_bounds_hold(grid in grid_strategy(), radius in 0.0_f64..10.0) {
        match build_graph(&grid, radius, 0.5, 1000.0) {
            Ok(graph) => {
                for node in graph.nodes() {
                    let degree = graph.degree(node.id);
                    prop_assert!((1..=4).contains(&degree));
                    prop_assert_eq!(node.boundary, degree < 4);
                }
                for edge in graph.edges() {
                    prop_assert!(edge.a < edge.b);
                    prop_assert!(edge.resistance >= 0.5 && edge.resistance <= 1000.0);
                }
            }
            // Only a lone admitted cell can fail on valid input.
            Err(GraphError::IsolatedNode { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn mask_admits_exactly_the_disc(grid in grid_strategy(), radius in 1.0_f64..10.0) {
        if let Ok(graph) = build_graph(&grid, radius, 0.5, 1000.0) {
            for r in 0..grid.rows() {
                for c in 0..grid.cols() {
                    let inside = grid.distance_from_center(r, c) <= radius;
                    prop_assert_eq!(graph.node_at(r, c).is_some(), inside);
                }
            }
        }
    }

    #[test]
    fn rebuild_is_deterministic(grid in grid_strategy(), radius in 1.0_f64..10.0) {
        let first = build_graph(&grid, radius, 0.5, 1000.0);
        let second = build_graph(&grid, radius, 0.5, 1000.0);
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.nodes(), b.nodes());
                prop_assert_eq!(a.edges(), b.edges());
                for node in a.nodes() {
                    prop_assert_eq!(a.incident_edges(node.id), b.incident_edges(node.id));
                }
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "builds disagree"),
        }
    }
}

use gradgraph_core::{Graph, NodeId, Shape};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Initializes env_logger once per test binary; RUST_LOG controls the output.
#[allow(dead_code)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub(crate) fn shape(dims: &[usize]) -> Shape {
    Shape::new(dims).expect("Test shape creation failed")
}

// Fills every leaf with reproducible values drawn uniformly from [low, high).
#[allow(dead_code)]
pub(crate) fn fill_leaves(graph: &mut Graph<f64>, seed: u64, low: f64, high: f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let leaves: Vec<NodeId> = graph.leaves().collect();
    for id in leaves {
        let numel = graph.value(id).expect("Leaf lookup failed").numel();
        let data: Vec<f64> = (0..numel).map(|_| rng.gen_range(low..high)).collect();
        graph.feed(id, &data).expect("Feeding test data failed");
    }
}

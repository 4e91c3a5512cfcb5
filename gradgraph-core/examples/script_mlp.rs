// Compiles a small classifier from a script, evaluates it on one input and
// prints the gradient of the loss with respect to every parameter.
//
// Run with `RUST_LOG=debug` to see graph construction and both passes.

use gradgraph_core::{compile_str, GraphError, Op};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SCRIPT: &str = "
def image   placeholder 2 2
def x       reshape image 1 4
def w1      parameter 4 8
def hidden  matmul x w1
def act     relu hidden
def w2      parameter 8 3
def logits  matmul act w2
def probs   softmax logits
def logp    log probs
def loss    mul logp -1
";

fn main() -> Result<(), GraphError> {
    env_logger::init();

    let mut graph = compile_str::<f32>(SCRIPT)?;
    graph.randomize_parameters(&mut StdRng::seed_from_u64(0), 0.5)?;
    graph.feed_named("image", &[0.0, 1.0, 1.0, 0.0])?;

    graph.forward()?;
    let probs = graph.resolve("probs")?;
    println!("class probabilities: {:?}", graph.value(probs)?.data());

    // The loss is seeded at class 0, i.e. the target label is 0
    let adjoints = graph.differentiate()?;
    for id in graph.leaves() {
        let node = graph.node(id)?;
        if let Op::Parameter = node.op() {
            let grad = adjoints.wrt(id)?;
            let norm: f32 = grad.data().iter().map(|g| g.abs()).sum();
            println!("parameter {} {}: sum |grad| = {}", id, node.value().shape(), norm);
        }
    }
    Ok(())
}

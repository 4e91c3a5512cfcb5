use super::*;
use crate::graph::Op;
use approx::assert_relative_eq;

#[test]
fn test_compile_full_grammar() {
    let source = "
        # a small network
        def x placeholder 2 3 0 0
        def w parameter 3 4
        def h matmul x w
        def b parameter 2 4 0
        def s add h b
        def r relu s
        def g gelu r
        def f reshape g 8 0 0 0
        def p softmax f
        def l log p
        def loss mul l -1.5
    ";
    let g: Graph<f64> = compile_str(source).unwrap();
    assert_eq!(g.len(), 11);

    let shape_of = |name: &str| g.value(g.lookup(name).unwrap()).unwrap().shape().dims().to_vec();
    assert_eq!(shape_of("x"), vec![2, 3]);
    assert_eq!(shape_of("w"), vec![3, 4]);
    assert_eq!(shape_of("h"), vec![2, 4]);
    assert_eq!(shape_of("f"), vec![8]);
    assert_eq!(shape_of("loss"), vec![8]);

    let h = g.lookup("h").unwrap();
    let x = g.lookup("x").unwrap();
    let w = g.lookup("w").unwrap();
    assert_eq!(g.node(h).unwrap().op(), &Op::MatMul { a: x, b: w });
    match g.node(g.lookup("loss").unwrap()).unwrap().op() {
        Op::Mul { factor, .. } => assert_relative_eq!(*factor, -1.5),
        other => panic!("Expected mul, got {:?}", other),
    }
}

#[test]
fn test_compile_from_reader() {
    let source = b"def a placeholder 4\ndef b softmax a\n";
    let g: Graph<f32> = compile(&source[..]).unwrap();
    assert_eq!(g.len(), 2);
    assert_eq!(g.lookup("b").map(|id| id.index()), Some(1));
}

#[test]
fn test_shape_ends_at_non_numeric_token() {
    let g: Graph<f64> = compile_str("def a placeholder 5 def b relu a").unwrap();
    assert_eq!(g.value(g.lookup("a").unwrap()).unwrap().shape().dims(), &[5]);
}

#[test]
fn test_shape_stops_after_four_dims() {
    let g: Graph<f64> = compile_str("def a parameter 1 2 3 4 def b relu a").unwrap();
    assert_eq!(g.value(g.lookup("a").unwrap()).unwrap().shape().dims(), &[1, 2, 3, 4]);
}

#[test]
fn test_shape_without_dims_is_scalar() {
    let g: Graph<f64> = compile_str("def a placeholder 0 0 0 0").unwrap();
    assert_eq!(g.value(g.lookup("a").unwrap()).unwrap().numel(), 1);
}

#[test]
fn test_negative_dimension_is_a_parse_error() {
    let result = compile_str::<f64>("def a placeholder 2 -3");
    assert!(matches!(result, Err(GraphError::Parse { token, .. }) if token == "-3"));
}

#[test]
fn test_unknown_keyword() {
    assert_eq!(
        compile_str::<f64>("def a placeholder 2\nlet b relu a").unwrap_err(),
        GraphError::UnknownKeyword("let".to_string())
    );
}

#[test]
fn test_unknown_operator() {
    assert_eq!(
        compile_str::<f64>("def a placeholder 2 def b tanh a").unwrap_err(),
        GraphError::UnknownOperator("tanh".to_string())
    );
}

#[test]
fn test_unknown_symbol() {
    assert_eq!(
        compile_str::<f64>("def a placeholder 2 def b add a c").unwrap_err(),
        GraphError::UnknownSymbol("c".to_string())
    );
}

#[test]
fn test_definition_cannot_reference_itself() {
    assert_eq!(
        compile_str::<f64>("def a relu a").unwrap_err(),
        GraphError::UnknownSymbol("a".to_string())
    );
}

#[test]
fn test_rebinding_points_to_newest_node() {
    let g: Graph<f64> = compile_str("def a placeholder 3 def a relu a def b mul a 2").unwrap();
    let a = g.lookup("a").unwrap();
    assert_eq!(a.index(), 1);
    let b = g.lookup("b").unwrap();
    assert_eq!(g.node(b).unwrap().op().inputs(), vec![a]);
}

#[test]
fn test_construction_errors_propagate() {
    assert!(matches!(
        compile_str::<f64>("def a placeholder 2 3 def b placeholder 2 3 def c matmul a b"),
        Err(GraphError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        compile_str::<f64>("def a placeholder 2 3 def r reshape a 5"),
        Err(GraphError::ReshapeSizeMismatch { .. })
    ));
}

#[test]
fn test_truncated_statement() {
    assert!(matches!(
        compile_str::<f64>("def a placeholder 2 def b mul a"),
        Err(GraphError::Parse { .. })
    ));
    assert!(matches!(
        compile_str::<f64>("def"),
        Err(GraphError::Parse { .. })
    ));
}

#[test]
fn test_bad_scalar() {
    match compile_str::<f64>("def a placeholder 2\ndef b mul a two") {
        Err(GraphError::Parse { token, message }) => {
            assert_eq!(token, "two");
            assert!(message.starts_with("line 2"));
        }
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[test]
fn test_comments_are_skipped() {
    let g: Graph<f64> = compile_str("# def a placeholder 2\ndef b placeholder 3 # trailing def c\n").unwrap();
    assert_eq!(g.len(), 1);
    assert_eq!(g.lookup("a"), None);
    assert!(g.lookup("b").is_some());
}

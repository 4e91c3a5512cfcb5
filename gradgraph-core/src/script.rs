//! # Graph Scripts
//!
//! Compiles a whitespace-separated textual description into a [`Graph`].
//! Every statement defines one named node:
//!
//! ```text
//! # comment until end of line
//! def x  placeholder 2 3
//! def w  parameter   3 4 0 0
//! def h  matmul  x w
//! def y  relu    h
//! def z  mul     y -0.5
//! ```
//!
//! Operators: `placeholder`, `parameter` and `reshape` take up to four
//! dimensions; `matmul` and `add` take two operand names; `log`, `relu`,
//! `gelu` and `softmax` take one; `mul` takes an operand name and a scalar.
//!
//! A shape ends after four dimensions, at a `0` (trailing `0` padding up to
//! four slots is consumed), or at the first token that is not a number.

use crate::error::GraphError;
use crate::graph::{Graph, NodeId};
use crate::shape::{Shape, MAX_RANK};
use crate::types::Scalar;
use log::debug;
use std::io::Read;

/// Compiles a script read from `reader`.
///
/// # Errors
/// - `GraphError::Io` if reading fails.
/// - `GraphError::UnknownKeyword` for a statement not starting with `def`.
/// - `GraphError::UnknownOperator` for an unsupported operator name.
/// - `GraphError::UnknownSymbol` for an operand name that was never defined.
/// - `GraphError::Parse` for missing or malformed tokens.
/// - Any construction error of the node being defined.
pub fn compile<T: Scalar, R: Read>(mut reader: R) -> Result<Graph<T>, GraphError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    compile_str(&source)
}

/// Compiles a script held in memory.
pub fn compile_str<T: Scalar>(source: &str) -> Result<Graph<T>, GraphError> {
    let mut tokens = Tokens::new(source);
    let mut graph = Graph::new();
    while let Some(keyword) = tokens.next() {
        if keyword.text != "def" {
            return Err(GraphError::UnknownKeyword(keyword.text.to_string()));
        }
        let name = tokens.expect("a node name after 'def'")?.text;
        let op = tokens.expect("an operator after the node name")?.text;
        let id = define_node(&mut graph, &mut tokens, op)?;
        debug!("Script defined '{}' as {} {}", name, op, id);
        graph.define(name, id)?;
    }
    debug!("Compiled script into {} nodes", graph.len());
    Ok(graph)
}

/// Parses the arguments of `op` and appends the node.
///
/// Operands are resolved before the caller binds the new name, so a
/// definition never sees itself.
fn define_node<T: Scalar>(
    graph: &mut Graph<T>,
    tokens: &mut Tokens<'_>,
    op: &str,
) -> Result<NodeId, GraphError> {
    match op {
        "placeholder" => {
            let shape = read_shape(tokens)?;
            graph.placeholder(shape)
        }
        "parameter" => {
            let shape = read_shape(tokens)?;
            graph.parameter(shape)
        }
        "matmul" => {
            let (a, b) = (operand(graph, tokens)?, operand(graph, tokens)?);
            graph.matmul(a, b)
        }
        "add" => {
            let (a, b) = (operand(graph, tokens)?, operand(graph, tokens)?);
            graph.add(a, b)
        }
        "log" => {
            let a = operand(graph, tokens)?;
            graph.log(a)
        }
        "reshape" => {
            let a = operand(graph, tokens)?;
            let shape = read_shape(tokens)?;
            graph.reshape(a, shape)
        }
        "relu" => {
            let a = operand(graph, tokens)?;
            graph.relu(a)
        }
        "gelu" => {
            let a = operand(graph, tokens)?;
            graph.gelu(a)
        }
        "softmax" => {
            let a = operand(graph, tokens)?;
            graph.softmax(a)
        }
        "mul" => {
            let a = operand(graph, tokens)?;
            let token = tokens.expect("a scalar factor")?;
            let factor: f64 = token.text.parse().map_err(|_| token.error("expected a number"))?;
            graph.mul(a, T::from_f64(factor))
        }
        other => Err(GraphError::UnknownOperator(other.to_string())),
    }
}

fn operand<T: Scalar>(graph: &Graph<T>, tokens: &mut Tokens<'_>) -> Result<NodeId, GraphError> {
    let token = tokens.expect("an operand name")?;
    graph.resolve(token.text)
}

fn read_shape(tokens: &mut Tokens<'_>) -> Result<Shape, GraphError> {
    let mut dims = Vec::with_capacity(MAX_RANK);
    let mut slots = 0;
    while slots < MAX_RANK {
        let Some(token) = tokens.peek() else { break };
        let dim = match token.text.parse::<usize>() {
            Ok(dim) => dim,
            Err(_) if token.text.starts_with('-') && token.text[1..].parse::<usize>().is_ok() => {
                return Err(token.error("dimensions must be positive"));
            }
            Err(_) => break,
        };
        tokens.next();
        slots += 1;
        if dim == 0 {
            skip_zero_padding(tokens, MAX_RANK - slots);
            break;
        }
        dims.push(dim);
    }
    Shape::new(&dims)
}

fn skip_zero_padding(tokens: &mut Tokens<'_>, max: usize) {
    for _ in 0..max {
        match tokens.peek() {
            Some(token) if token.text.parse::<usize>() == Ok(0) => {
                tokens.next();
            }
            _ => break,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    line: usize,
}

impl Token<'_> {
    fn error(&self, message: &str) -> GraphError {
        GraphError::Parse {
            token: self.text.to_string(),
            message: format!("line {}: {}", self.line, message),
        }
    }
}

/// Whitespace tokenizer that drops everything from a `#` to the end of its line.
struct Tokens<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        let tokens = source
            .lines()
            .enumerate()
            .flat_map(|(i, line)| {
                line.split_whitespace()
                    .take_while(|t| !t.starts_with('#'))
                    .map(move |text| Token { text, line: i + 1 })
            })
            .collect();
        Tokens { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn expect(&mut self, what: &str) -> Result<Token<'a>, GraphError> {
        self.next().ok_or_else(|| GraphError::Parse {
            token: String::new(),
            message: format!("unexpected end of input, expected {}", what),
        })
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;

//! # Tree Rendering
//!
//! Programs and environments are recursive values with no inherent visual
//! form; this module renders them as [`petgraph`] directed graphs (edge
//! weight = child position) with DOT export for quick inspection.
//!
//! Infinite environments are handled the only way they can be: walk a
//! bounded number of layers and mark the cut.

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use std::fmt;

use crate::cofree::Cofree;
use crate::free::Free;
use crate::functor::Functor;
use crate::lazy::LazyCofree;

/// Render a program as a graph: leaves are labeled with their values,
/// interior nodes with their child count.
pub fn free_graph<F, A>(program: &Free<F, A>) -> DiGraph<String, usize>
where
    F: Functor,
    A: fmt::Display + 'static,
{
    let mut graph = DiGraph::new();
    add_free(&mut graph, program);
    graph
}

fn add_free<F, A>(graph: &mut DiGraph<String, usize>, node: &Free<F, A>) -> NodeIndex
where
    F: Functor,
    A: fmt::Display + 'static,
{
    match node {
        Free::Pure(value) => graph.add_node(format!("pure {value}")),
        Free::Impure(layer) => {
            let mut children = Vec::new();
            F::map_ref(&**layer, |child| children.push(child));
            let index = graph.add_node(format!("op/{}", children.len()));
            for (position, child) in children.into_iter().enumerate() {
                let child_index = add_free(graph, child);
                graph.add_edge(index, child_index, position);
            }
            index
        }
    }
}

/// Render a finite environment as a graph, one node per annotation.
pub fn cofree_graph<F, A>(tree: &Cofree<F, A>) -> DiGraph<String, usize>
where
    F: Functor,
    A: fmt::Display + 'static,
{
    let mut graph = DiGraph::new();
    add_cofree(&mut graph, tree);
    graph
}

fn add_cofree<F, A>(graph: &mut DiGraph<String, usize>, tree: &Cofree<F, A>) -> NodeIndex
where
    F: Functor,
    A: fmt::Display + 'static,
{
    let index = graph.add_node(tree.extract().to_string());
    let mut children = Vec::new();
    F::map_ref(tree.tail(), |child| children.push(child));
    for (position, child) in children.into_iter().enumerate() {
        let child_index = add_cofree(graph, child);
        graph.add_edge(index, child_index, position);
    }
    index
}

/// Render the first `depth` layers of a (possibly infinite) environment.
/// Nodes at the cut are suffixed with `…` to show the tree continues.
pub fn lazy_graph<F, A>(tree: &LazyCofree<F, A>, depth: usize) -> DiGraph<String, usize>
where
    F: Functor,
    A: fmt::Display + Clone + 'static,
{
    let mut graph = DiGraph::new();
    add_lazy(&mut graph, tree, depth);
    graph
}

fn add_lazy<F, A>(
    graph: &mut DiGraph<String, usize>,
    tree: &LazyCofree<F, A>,
    depth: usize,
) -> NodeIndex
where
    F: Functor,
    A: fmt::Display + Clone + 'static,
{
    if depth == 0 {
        return graph.add_node(format!("{} …", tree.extract()));
    }
    let index = graph.add_node(tree.extract().to_string());
    let mut children = Vec::new();
    F::map(tree.force_tail(), |child| children.push(child));
    for (position, child) in children.into_iter().enumerate() {
        let child_index = add_lazy(graph, &child, depth - 1);
        graph.add_edge(index, child_index, position);
    }
    index
}

/// DOT source for any rendered graph.
pub fn dot<N: fmt::Display, E: fmt::Display>(graph: &DiGraph<N, E>) -> String {
    format!("{}", Dot::new(graph))
}

//! This module describes Node data we use in petgraph for the Persistent Weisfeiler-Lehman kernel.
//! Nodes can have one discrete label (the original node attribute of the data file). A node without label
//! gets the constant initial label.
//! Edges carry no data, the graph is undirected and its node order (petgraph NodeIndex order) is the node rank
//! used all along the kernel computations.
//!

use std::cmp::Ord;
use std::hash::Hash;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::Undirected;

/// Our original labels must satisfy:
/// Hash + Eq to be compressed, Ord to get a canonical (node order independent) compression.
pub trait LabelT: Send + Sync + Eq + Hash + Ord + Clone + std::fmt::Debug {}

impl LabelT for u8 {}
impl LabelT for u16 {}
impl LabelT for u32 {}
impl LabelT for u64 {}
impl LabelT for i32 {}
impl LabelT for i64 {}
impl LabelT for String {}

/// defines associated data to a Node.
#[derive(Clone, Debug, PartialEq)]
pub struct Nweight<Nlabel> {
    /// original attribute, if any
    label: Option<Nlabel>,
}

impl<Nlabel> Nweight<Nlabel>
where
    Nlabel: LabelT,
{
    ///
    pub fn new(label: Option<Nlabel>) -> Self {
        Nweight { label }
    }

    /// node without attribute
    pub fn unlabeled() -> Self {
        Nweight { label: None }
    }

    pub fn get_label(&self) -> Option<&Nlabel> {
        self.label.as_ref()
    }
} // end of Nweight

impl<Nlabel> Default for Nweight<Nlabel> {
    fn default() -> Self {
        Nweight { label: None }
    }
}

/// The graph type we read from data files
pub type LabelGraph = Graph<Nweight<String>, (), Undirected>;

/// builds an undirected graph from a label list (one per node, in node order) and an edge list of node ranks.
/// Edges referencing a node rank out of range are an error.
pub fn graph_from_parts<Nlabel>(
    labels: Vec<Option<Nlabel>>,
    edges: &[(usize, usize)],
) -> anyhow::Result<Graph<Nweight<Nlabel>, (), Undirected>>
where
    Nlabel: LabelT,
{
    let nb_nodes = labels.len();
    let mut graph = Graph::<Nweight<Nlabel>, (), Undirected>::with_capacity(nb_nodes, edges.len());
    for label in labels {
        graph.add_node(Nweight::new(label));
    }
    for (a, b) in edges {
        if *a >= nb_nodes || *b >= nb_nodes {
            return Err(anyhow::anyhow!(
                "edge ({}, {}) references a node out of range, nb nodes : {}",
                a,
                b,
                nb_nodes
            ));
        }
        graph.add_edge(NodeIndex::new(*a), NodeIndex::new(*b), ());
    }
    Ok(graph)
} // end of graph_from_parts

// end of mod tests

//! Builds the filtration of a graph induced by a node labeling.
//!
//! A vertex gets as weight its label code (a rank derived from label comparison, see [relabel](super::relabel::relabel)).
//! An edge enters with its last end point : the max of its end points weights in a sublevel filtration,
//! the min in a superlevel one.
//!
//! Elements are sorted by weight (ascending for sublevel, descending for superlevel), then vertices before edges,
//! then by node rank. So an edge always comes after its end points and the order is reproducible.

use std::cmp::Ordering;

use petgraph::graph::{Graph, IndexType};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;

use super::params::FiltrationKind;
use crate::error::PwlError;

/// An element entering the filtration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Simplex {
    /// node rank
    Vertex(usize),
    /// node ranks, smaller first, and edge rank
    Edge(usize, usize, usize),
}

impl Simplex {
    fn dimension(&self) -> u8 {
        match self {
            Simplex::Vertex(_) => 0,
            Simplex::Edge(..) => 1,
        }
    }

    // tie breaking key inside a dimension
    fn key(&self) -> (usize, usize, usize) {
        match self {
            Simplex::Vertex(i) => (*i, 0, 0),
            Simplex::Edge(a, b, e) => (*a, *b, *e),
        }
    }
} // end of impl Simplex

/// The ordered sequence of (element, weight). Elements are in admission order.
#[derive(Debug, Clone)]
pub struct Filtration {
    kind: FiltrationKind,
    nb_vertices: usize,
    elements: Vec<(Simplex, f64)>,
} // end of Filtration

impl Filtration {
    ///
    pub fn get_kind(&self) -> FiltrationKind {
        self.kind
    }

    /// number of vertices in the filtration
    pub fn get_nb_vertices(&self) -> usize {
        self.nb_vertices
    }

    /// elements in admission order
    pub fn get_elements(&self) -> &[(Simplex, f64)] {
        &self.elements
    }

    /// weight of the last admitted element, None if filtration is empty
    pub fn get_last_value(&self) -> Option<f64> {
        self.elements.last().map(|(_, w)| *w)
    }

    /// true if a precedes b in filtration order
    pub fn precedes(&self, a: f64, b: f64) -> bool {
        match self.kind {
            FiltrationKind::Sublevel => a < b,
            FiltrationKind::Superlevel => a > b,
        }
    }
} // end of impl Filtration

/// builds the filtration. labels are indexed by node rank
pub fn build_filtration<N, E, Ty, Ix>(
    graph: &Graph<N, E, Ty, Ix>,
    labels: &[u64],
    kind: FiltrationKind,
) -> Result<Filtration, PwlError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let nb_vertices = graph.node_count();
    if labels.len() != nb_vertices {
        return Err(PwlError::config(format!(
            "build_filtration : got {} labels for {} nodes",
            labels.len(),
            nb_vertices
        )));
    }
    let weights: Vec<f64> = labels.iter().map(|l| *l as f64).collect();
    //
    let mut elements = Vec::<(Simplex, f64)>::with_capacity(nb_vertices + graph.edge_count());
    for (rank, w) in weights.iter().enumerate() {
        elements.push((Simplex::Vertex(rank), *w));
    }
    for edge in graph.edge_references() {
        let (s, t) = (edge.source().index(), edge.target().index());
        let (a, b) = if s <= t { (s, t) } else { (t, s) };
        let w = match kind {
            FiltrationKind::Sublevel => weights[a].max(weights[b]),
            FiltrationKind::Superlevel => weights[a].min(weights[b]),
        };
        elements.push((Simplex::Edge(a, b, edge.id().index()), w));
    }
    //
    elements.sort_by(|(sa, wa), (sb, wb)| {
        let by_weight = match kind {
            FiltrationKind::Sublevel => wa.total_cmp(wb),
            FiltrationKind::Superlevel => wb.total_cmp(wa),
        };
        match by_weight {
            Ordering::Equal => sa
                .dimension()
                .cmp(&sb.dimension())
                .then_with(|| sa.key().cmp(&sb.key())),
            other => other,
        }
    });
    log::trace!("build_filtration {} : {} elements", kind, elements.len());
    //
    Ok(Filtration {
        kind,
        nb_vertices,
        elements,
    })
} // end of build_filtration

// end of mod tests

//! 0-dimensional persistence of a graph filtration and its reduction to a fixed length vector.
//!
//! Vertices are born when they enter the filtration. When an edge joins two components the younger one
//! (the one whose root entered last) dies at the edge weight, the elder survives (elder rule).
//! Components alive at the end die at the last filtration value.
//! An edge joining two vertices already connected creates a cycle, we count them.
//!
//! The diagram is reduced to [PersistenceSummary::DIMENSION] values :
//! - 0 : number of pairs
//! - 1 : total persistence
//! - 2 : max persistence
//! - 3 : mean persistence
//! - 4 : number of pairs with persistence strictly above a threshold
//! - 5 : number of essential components
//! - 6 : number of cycles

use super::filtration::*;
use crate::error::PwlError;

/// union-find on vertex ranks. Each root keeps the admission position of its elder vertex.
struct UnionFind {
    parent: Vec<usize>,
    // admission position of the vertex in the filtration, for roots it is the component birth position
    position: Vec<usize>,
    birth: Vec<f64>,
}

impl UnionFind {
    fn new(nb_vertices: usize) -> Self {
        UnionFind {
            parent: (0..nb_vertices).collect(),
            position: vec![usize::MAX; nb_vertices],
            birth: vec![0.; nb_vertices],
        }
    }

    fn make_set(&mut self, vertex: usize, position: usize, birth: f64) {
        self.parent[vertex] = vertex;
        self.position[vertex] = position;
        self.birth[vertex] = birth;
    }

    fn find(&mut self, vertex: usize) -> usize {
        let mut root = vertex;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut current = vertex;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    } // end of find
} // end of impl UnionFind

/// birth death pairs of connected components
#[derive(Debug, Clone, Default)]
pub struct PersistenceDiagram {
    /// (birth, death), one per vertex
    pairs: Vec<(f64, f64)>,
    /// components still alive at the end
    nb_essential: usize,
    /// edges that did not merge anything
    nb_cycles: usize,
}

impl PersistenceDiagram {
    ///
    pub fn get_pairs(&self) -> &[(f64, f64)] {
        &self.pairs
    }

    pub fn get_nb_essential(&self) -> usize {
        self.nb_essential
    }

    pub fn get_nb_cycles(&self) -> usize {
        self.nb_cycles
    }

    /// persistence |death - birth| of each pair
    pub fn persistences(&self) -> impl Iterator<Item = f64> + '_ {
        self.pairs.iter().map(|(b, d)| (d - b).abs())
    }
} // end of impl PersistenceDiagram

/// computes the diagram. The filtration must have at least one vertex.
pub fn persistence_diagram(filtration: &Filtration) -> Result<PersistenceDiagram, PwlError> {
    let nb_vertices = filtration.get_nb_vertices();
    let last_value = match filtration.get_last_value() {
        Some(v) if nb_vertices > 0 => v,
        _ => {
            return Err(PwlError::DegenerateFiltration { graph: 0 });
        }
    };
    let mut uf = UnionFind::new(nb_vertices);
    let mut pairs = Vec::<(f64, f64)>::with_capacity(nb_vertices);
    let mut nb_cycles = 0usize;
    //
    for (position, (simplex, weight)) in filtration.get_elements().iter().enumerate() {
        match simplex {
            Simplex::Vertex(v) => uf.make_set(*v, position, *weight),
            Simplex::Edge(a, b, _) => {
                let ra = uf.find(*a);
                let rb = uf.find(*b);
                if ra == rb {
                    nb_cycles += 1;
                    continue;
                }
                // the younger root entered last
                let (elder, younger) = if uf.position[ra] < uf.position[rb] { (ra, rb) } else { (rb, ra) };
                pairs.push((uf.birth[younger], *weight));
                uf.parent[younger] = elder;
            }
        }
    } // end of loop on elements
    //
    let mut nb_essential = 0usize;
    for v in 0..nb_vertices {
        if uf.parent[v] == v {
            pairs.push((uf.birth[v], last_value));
            nb_essential += 1;
        }
    }
    log::trace!(
        "persistence_diagram nb pairs : {}, essential : {}, cycles : {}",
        pairs.len(),
        nb_essential,
        nb_cycles
    );
    Ok(PersistenceDiagram {
        pairs,
        nb_essential,
        nb_cycles,
    })
} // end of persistence_diagram

/// The interface between the transformer and the reduction of a filtration to a feature vector.
/// Implementors must return vectors of length [get_dimension](FeatureExtractorT::get_dimension) for every graph.
pub trait FeatureExtractorT: Sync {
    /// length of vectors returned by extract
    fn get_dimension(&self) -> usize;
    /// reduce a filtration to a feature vector
    fn extract(&self, filtration: &Filtration) -> Result<Vec<f64>, PwlError>;
}

/// Default reduction : statistics of persistence values.
#[derive(Debug, Copy, Clone)]
pub struct PersistenceSummary {
    /// persistence strictly above threshold is counted in entry 4
    threshold: f64,
}

impl PersistenceSummary {
    /// vector length
    pub const DIMENSION: usize = 7;

    pub fn new(threshold: f64) -> Self {
        PersistenceSummary { threshold }
    }

    /// reduction of a diagram
    pub fn summarize(&self, diagram: &PersistenceDiagram) -> Vec<f64> {
        let nb_pairs = diagram.get_pairs().len();
        let mut total = 0f64;
        let mut max = 0f64;
        let mut nb_above = 0usize;
        for p in diagram.persistences() {
            total += p;
            max = max.max(p);
            if p > self.threshold {
                nb_above += 1;
            }
        }
        let mean = if nb_pairs > 0 { total / nb_pairs as f64 } else { 0. };
        vec![
            nb_pairs as f64,
            total,
            max,
            mean,
            nb_above as f64,
            diagram.get_nb_essential() as f64,
            diagram.get_nb_cycles() as f64,
        ]
    } // end of summarize
} // end of impl PersistenceSummary

impl Default for PersistenceSummary {
    fn default() -> Self {
        PersistenceSummary::new(0.)
    }
}

impl FeatureExtractorT for PersistenceSummary {
    fn get_dimension(&self) -> usize {
        PersistenceSummary::DIMENSION
    }

    fn extract(&self, filtration: &Filtration) -> Result<Vec<f64>, PwlError> {
        let diagram = persistence_diagram(filtration)?;
        Ok(self.summarize(&diagram))
    }
} // end of impl FeatureExtractorT for PersistenceSummary

// end of mod tests

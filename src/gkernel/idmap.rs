//! Graph data files come with labels of various types. We need to map original labels of nodes to discrete codes
//! before the first Weisfeiler-Lehman iteration.
//!
//! The map is built once on the whole graph collection so that an original label gets the same code in every graph.
//! Codes are ranks in the sorted set of labels seen, so they do not depend on the order in which graphs or nodes are read.
//! **The code 0 is reserved to nodes without label**, effective labels are coded from 1.
//!

use std::collections::BTreeSet;

use indexmap::IndexMap;
use petgraph::graph::{Graph, IndexType};
use petgraph::EdgeType;

use super::pgraph::*;

/// code given to nodes without original label
pub const NO_LABEL: u64 = 0;

/// Label is the original label of nodes, mapped to u64 codes.
pub struct IdMap<Nlabel>
where
    Nlabel: LabelT,
{
    /// given the original label, get the discrete code used in node labeling
    relabel: IndexMap<Nlabel, u64, ahash::RandomState>,
} // end of struct IdMap

impl<Nlabel> IdMap<Nlabel>
where
    Nlabel: LabelT,
{
    /// scans all nodes of all graphs
    pub fn new<E, Ty, Ix>(graphs: &[Graph<Nweight<Nlabel>, E, Ty, Ix>]) -> Self
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        let mut seen = BTreeSet::<&Nlabel>::new();
        for graph in graphs {
            for node in graph.raw_nodes() {
                if let Some(label) = node.weight.get_label() {
                    seen.insert(label);
                }
            }
        }
        let mut relabel = IndexMap::<Nlabel, u64, ahash::RandomState>::with_capacity_and_hasher(
            seen.len(),
            ahash::RandomState::default(),
        );
        for (rank, label) in seen.into_iter().enumerate() {
            relabel.insert(label.clone(), 1 + rank as u64);
        }
        log::debug!("IdMap::new nb distinct original labels : {}", relabel.len());
        IdMap { relabel }
    } // end of new

    /// number of distinct original labels
    pub fn get_nb_labels(&self) -> usize {
        self.relabel.len()
    }

    /// get code from initial label in data file
    pub fn get_code(&self, label: &Nlabel) -> Option<u64> {
        self.relabel.get(label).copied()
    }

    /// iteration 0 labels of a graph, indexed by node rank. Labels unknown to the map are treated as absent.
    pub fn initial_labels<E, Ty, Ix>(&self, graph: &Graph<Nweight<Nlabel>, E, Ty, Ix>) -> Vec<u64>
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        graph
            .raw_nodes()
            .iter()
            .map(|node| match node.weight.get_label() {
                Some(label) => self.get_code(label).unwrap_or(NO_LABEL),
                None => NO_LABEL,
            })
            .collect()
    } // end of initial_labels
} // end of impl IdMap

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn codes_do_not_depend_on_reading_order() {
        let g1 = graph_from_parts(
            vec![Some(String::from("O")), Some(String::from("C")), None],
            &[(0, 1), (1, 2)],
        )
        .unwrap();
        let g2 = graph_from_parts(vec![Some(String::from("N")), Some(String::from("C"))], &[(0, 1)]).unwrap();
        //
        let map_12 = IdMap::new(&[g1.clone(), g2.clone()]);
        let map_21 = IdMap::new(&[g2.clone(), g1.clone()]);
        assert_eq!(map_12.get_nb_labels(), 3);
        for label in ["C", "N", "O"] {
            assert_eq!(map_12.get_code(&String::from(label)), map_21.get_code(&String::from(label)));
        }
        // C < N < O
        assert_eq!(map_12.initial_labels(&g1), vec![3, 1, NO_LABEL]);
        assert_eq!(map_12.initial_labels(&g2), vec![2, 1]);
    }

    #[test]
    fn unlabeled_graphs_are_constant() {
        let g = graph_from_parts::<String>(vec![None, None, None], &[(0, 1)]).unwrap();
        let map = IdMap::new(std::slice::from_ref(&g));
        assert_eq!(map.get_nb_labels(), 0);
        assert_eq!(map.initial_labels(&g), vec![NO_LABEL; 3]);
    }
} // end of mod tests

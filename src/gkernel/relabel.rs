//! One Weisfeiler-Lehman iteration.
//!
//! Each node is described by its signature : its own label followed by the sorted labels of its neighbours.
//! Nodes get the same new label iff they have the same signature.
//! The new label is the rank of the signature in the sorted set of signatures observed in the call, so the
//! compression table is local to the call and the labels do not depend on the node numbering.
//!

use std::collections::BTreeMap;

use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::EdgeType;

use crate::error::PwlError;

/// signature of a node : own label followed by sorted neighbour labels
fn node_signature<N, E, Ty, Ix>(graph: &Graph<N, E, Ty, Ix>, labels: &[u64], node: NodeIndex<Ix>) -> Vec<u64>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let mut neighbour_labels: Vec<u64> = graph
        .neighbors_undirected(node)
        .map(|neighbour| labels[neighbour.index()])
        .collect();
    neighbour_labels.sort_unstable();
    let mut signature = Vec::<u64>::with_capacity(1 + neighbour_labels.len());
    signature.push(labels[node.index()]);
    signature.append(&mut neighbour_labels);
    signature
} // end of node_signature

/// Computes labels of next iteration. labels are indexed by node rank.
pub fn relabel<N, E, Ty, Ix>(graph: &Graph<N, E, Ty, Ix>, labels: &[u64]) -> Result<Vec<u64>, PwlError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    if labels.len() != graph.node_count() {
        return Err(PwlError::config(format!(
            "relabel : got {} labels for {} nodes",
            labels.len(),
            graph.node_count()
        )));
    }
    let signatures: Vec<Vec<u64>> = graph
        .node_indices()
        .map(|node| node_signature(graph, labels, node))
        .collect();
    // local compression table, ranks are assigned in signature order
    let mut table = BTreeMap::<&[u64], u64>::new();
    for signature in &signatures {
        table.insert(signature.as_slice(), 0);
    }
    for (rank, code) in table.values_mut().enumerate() {
        *code = rank as u64;
    }
    log::trace!("relabel nb nodes : {}, nb distinct signatures : {}", signatures.len(), table.len());
    //
    let new_labels = signatures.iter().map(|signature| table[signature.as_slice()]).collect();
    Ok(new_labels)
} // end of relabel

/// Equivalence classes induced by a labeling : groups of node ranks sharing a label, each group sorted,
/// groups sorted by their first node. Two labelings induce the same partition iff this returns the same value.
pub fn label_classes(labels: &[u64]) -> Vec<Vec<usize>> {
    let mut groups = BTreeMap::<u64, Vec<usize>>::new();
    for (rank, label) in labels.iter().enumerate() {
        groups.entry(*label).or_default().push(rank);
    }
    let mut classes: Vec<Vec<usize>> = groups.into_values().collect();
    classes.sort_unstable_by_key(|class| class[0]);
    classes
} // end of label_classes

#[cfg(test)]
mod tests {

    use super::*;

    use crate::gkernel::pgraph::graph_from_parts;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // path 0 - 1 - 2 - 3 with a pendant 4 on 1
    fn small_tree_edges() -> Vec<(usize, usize)> {
        vec![(0, 1), (1, 2), (2, 3), (1, 4)]
    }

    #[test]
    fn relabel_is_deterministic() {
        log_init_test();
        //
        let graph = graph_from_parts::<String>(vec![None; 5], &small_tree_edges()).unwrap();
        let labels = vec![0u64; 5];
        let first = relabel(&graph, &labels).unwrap();
        let second = relabel(&graph, &labels).unwrap();
        assert_eq!(first, second);
        assert_eq!(label_classes(&first), label_classes(&second));
        // degrees are 1,3,2,1,1 so after one iteration leaves are grouped together
        assert_eq!(label_classes(&first), vec![vec![0, 3, 4], vec![1], vec![2]]);
    }

    #[test]
    fn relabel_equality_iff_same_signature() {
        log_init_test();
        //
        // star centered on 0 with leaves 1,2,3, leaves labelled differently
        let graph = graph_from_parts::<String>(vec![None; 4], &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let labels = vec![5u64, 1, 1, 2];
        let next = relabel(&graph, &labels).unwrap();
        assert_eq!(next[1], next[2]);
        assert_ne!(next[1], next[3]);
        assert_ne!(next[0], next[1]);
        // ranks of sorted signatures : [1,5] < [2,5] < [5,1,1,2]
        assert_eq!(next, vec![2, 0, 0, 1]);
    }

    #[test]
    fn isomorphic_graphs_same_partitions() {
        log_init_test();
        //
        let g1 = graph_from_parts::<String>(vec![None; 5], &small_tree_edges()).unwrap();
        // same tree with nodes renumbered by perm : old rank -> new rank
        let perm = [3usize, 0, 4, 1, 2];
        let edges2: Vec<(usize, usize)> = small_tree_edges().iter().map(|(a, b)| (perm[*a], perm[*b])).collect();
        let g2 = graph_from_parts::<String>(vec![None; 5], &edges2).unwrap();
        //
        let mut l1 = vec![0u64; 5];
        let mut l2 = vec![0u64; 5];
        for _ in 0..4 {
            l1 = relabel(&g1, &l1).unwrap();
            l2 = relabel(&g2, &l2).unwrap();
            // g2 labels pulled back on g1 numbering induce the same partition
            let pulled_back: Vec<u64> = (0..5).map(|i| l2[perm[i]]).collect();
            assert_eq!(label_classes(&l1), label_classes(&pulled_back));
            // and codes are canonical : node i in g1 and node perm[i] in g2 carry the same label
            assert_eq!(l1, pulled_back);
        }
    }

    #[test]
    fn relabel_checks_label_count() {
        let graph = graph_from_parts::<String>(vec![None; 3], &[(0, 1)]).unwrap();
        assert!(matches!(relabel(&graph, &[0, 0]), Err(PwlError::InvalidConfiguration(_))));
    }
} // end of mod tests

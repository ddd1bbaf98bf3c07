//! This module implements the Persistent Weisfeiler-Lehman feature map of labelled graphs.
//!
//! Node labels are refined by the Weisfeiler-Lehman procedure : at each iteration a node label is replaced by a
//! compressed label of its own label and the multiset of its neighbours labels.
//! At each iteration the labels induce a filtration of the graph whose 0-dimensional persistence
//! (birth and death of connected components) is summarized in a fixed length block of features.
//! A graph is represented by the concatenation of its blocks along iterations.
//!
//! Some references are :
//!
//! - Shervashidze-Borgwardt Weisfeiler-Lehman Graph Kernels 2011
//!     sorting neighbours labels + compression (hash) and h iterations.
//!
//! - Rieck-Bock-Borgwardt A Persistent Weisfeiler-Lehman Procedure for Graph Classification ICML 2019
//!     filtration induced by labels, persistence of components and cycles as features.
//!
//! - Edelsbrunner-Harer Computational Topology 2010
//!     union-find computation of 0-dimensional persistence, elder rule.
//!

/// Defines node data in petgraph.
pub mod pgraph;

/// Defines transform parameters.
pub mod params;

/// Defines translations of original node labels to initial codes.
pub mod idmap;

/// One Weisfeiler-Lehman relabeling step.
pub mod relabel;

/// Filtration induced by a labeling.
pub mod filtration;

/// Persistence diagram and feature extraction.
pub mod persistence;

/// The transform of a graph collection.
pub mod pwl;

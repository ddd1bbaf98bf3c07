//! The Persistent Weisfeiler-Lehman transform of a graph collection.
//!
//! For each graph and each iteration i in 0..=nb_iter we build the filtration induced by the labels of iteration i,
//! reduce it to a feature block and then relabel the graph for iteration i+1.
//! Iteration 0 uses the original node labels mapped by [IdMap](super::idmap::IdMap).
//!
//! The result is a matrix with one row per graph (in input order) where blocks are concatenated in iteration order,
//! and the number of columns each iteration contributed.
//! Graphs are independent so they are processed in parallel if asked for in [PwlParams].

use std::time::SystemTime;

use cpu_time::ProcessTime;
use ndarray::Array2;
use rayon::prelude::*;

use petgraph::graph::{Graph, IndexType};
use petgraph::EdgeType;

use super::filtration::build_filtration;
use super::idmap::IdMap;
use super::params::*;
use super::persistence::*;
use super::pgraph::*;
use super::relabel::relabel;
use crate::error::PwlError;

pub struct PersistentWeisfeilerLehman<'a, E>
where
    E: FeatureExtractorT,
{
    /// transform parameters
    params: PwlParams,
    /// reduction of a filtration to a feature block
    extractor: &'a E,
} // end of struct PersistentWeisfeilerLehman

impl<'a, E> PersistentWeisfeilerLehman<'a, E>
where
    E: FeatureExtractorT,
{
    pub fn new(params: PwlParams, extractor: &'a E) -> Self {
        PersistentWeisfeilerLehman { params, extractor }
    }

    ///
    pub fn get_params(&self) -> &PwlParams {
        &self.params
    }

    // feature blocks of one graph, one per iteration
    fn graph_blocks<Nlabel, Ed, Ty, Ix>(
        &self,
        rank: usize,
        graph: &Graph<Nweight<Nlabel>, Ed, Ty, Ix>,
        idmap: &IdMap<Nlabel>,
    ) -> Result<Vec<Vec<f64>>, PwlError>
    where
        Nlabel: LabelT,
        Ty: EdgeType,
        Ix: IndexType,
    {
        let nb_iter = self.params.get_nb_iter();
        let mut blocks = Vec::<Vec<f64>>::with_capacity(nb_iter + 1);
        let mut labels = idmap.initial_labels(graph);
        for iter in 0..=nb_iter {
            let filtration = build_filtration(graph, &labels, self.params.get_filtration())?;
            let block = match self.extractor.extract(&filtration) {
                Ok(block) => block,
                Err(PwlError::DegenerateFiltration { .. }) => match self.params.get_empty_policy() {
                    EmptyGraphPolicy::Fail => {
                        log::error!("graph {} has no node", rank);
                        return Err(PwlError::DegenerateFiltration { graph: rank });
                    }
                    EmptyGraphPolicy::ZeroFill => {
                        log::warn!("graph {} has no node, iteration {} block filled with 0", rank, iter);
                        vec![0.; self.extractor.get_dimension()]
                    }
                },
                Err(e) => return Err(e),
            };
            blocks.push(block);
            // no relabeling after last iteration
            if iter < nb_iter {
                labels = relabel(graph, &labels)?;
            }
        }
        Ok(blocks)
    } // end of graph_blocks

    /// returns the feature matrix and the number of columns of each iteration
    pub fn transform<Nlabel, Ed, Ty, Ix>(
        &self,
        graphs: &[Graph<Nweight<Nlabel>, Ed, Ty, Ix>],
    ) -> Result<(Array2<f64>, Vec<usize>), PwlError>
    where
        Nlabel: LabelT,
        Ed: Sync,
        Ty: EdgeType + Sync,
        Ix: IndexType + Sync,
    {
        if graphs.is_empty() {
            return Err(PwlError::config("no graph to transform"));
        }
        log::info!(
            "PersistentWeisfeilerLehman::transform nb graphs : {}, nb_iter : {}, filtration : {}",
            graphs.len(),
            self.params.get_nb_iter(),
            self.params.get_filtration()
        );
        let cpu_start = ProcessTime::now();
        let sys_start = SystemTime::now();
        //
        let idmap = IdMap::new(graphs);
        let blocks: Vec<Vec<Vec<f64>>> = if self.params.get_parallel() {
            graphs
                .par_iter()
                .enumerate()
                .map(|(rank, graph)| self.graph_blocks(rank, graph, &idmap))
                .collect::<Result<Vec<_>, PwlError>>()?
        } else {
            graphs
                .iter()
                .enumerate()
                .map(|(rank, graph)| self.graph_blocks(rank, graph, &idmap))
                .collect::<Result<Vec<_>, PwlError>>()?
        };
        // column counts come from the first graph, all graphs must agree
        let column_counts: Vec<usize> = blocks[0].iter().map(|b| b.len()).collect();
        for (rank, graph_blocks) in blocks.iter().enumerate() {
            for (iter, block) in graph_blocks.iter().enumerate() {
                if block.len() != column_counts[iter] {
                    return Err(PwlError::config(format!(
                        "graph {} iteration {} has {} features, expected {}",
                        rank,
                        iter,
                        block.len(),
                        column_counts[iter]
                    )));
                }
            }
        }
        let nb_columns: usize = column_counts.iter().sum();
        let mut features = Array2::<f64>::zeros((graphs.len(), nb_columns));
        for (rank, graph_blocks) in blocks.iter().enumerate() {
            let mut row = features.row_mut(rank);
            let mut col = 0;
            for block in graph_blocks {
                for value in block {
                    row[col] = *value;
                    col += 1;
                }
            }
        }
        //
        log::info!(
            "PersistentWeisfeilerLehman::transform feature matrix : ({}, {}), column counts : {:?}",
            features.nrows(),
            features.ncols(),
            column_counts
        );
        log::info!(
            "PersistentWeisfeilerLehman::transform sys time(s) {:.2e} cpu time(s) {:.2e}",
            sys_start.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.),
            cpu_start.elapsed().as_secs_f64()
        );
        Ok((features, column_counts))
    } // end of transform
} // end of impl PersistentWeisfeilerLehman

/// transform with default parameters (sublevel filtration, [PersistenceSummary] reduction) and nb_iter iterations
pub fn transform<Nlabel, Ed, Ty, Ix>(
    graphs: &[Graph<Nweight<Nlabel>, Ed, Ty, Ix>],
    nb_iter: usize,
) -> Result<(Array2<f64>, Vec<usize>), PwlError>
where
    Nlabel: LabelT,
    Ed: Sync,
    Ty: EdgeType + Sync,
    Ix: IndexType + Sync,
{
    let params = PwlParams::new(nb_iter, FiltrationKind::Sublevel, 0., EmptyGraphPolicy::Fail, true);
    let extractor = PersistenceSummary::default();
    PersistentWeisfeilerLehman::new(params, &extractor).transform(graphs)
} // end of transform

// end of mod tests

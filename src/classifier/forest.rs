//! Random forest : trees grown on bootstrap samples with a random subset of sqrt(nb features) features
//! examined at each split. Prediction is the majority vote of trees.
//!
//! Each tree gets its own random generator, obtained from the forest seed by jumps of Xoshiro256PlusPlus,
//! so that trees can be grown in parallel and the forest is reproducible.

use std::fmt;

use ndarray::ArrayView2;
use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use super::tree::DecisionTree;
use super::{majority, ClassifierBuilderT, ClassifierT};
use crate::error::PwlError;

/// number of trees searched in grid search
pub const NB_TREES_GRID: [usize; 6] = [10, 20, 50, 100, 150, 200];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ForestParams {
    /// number of trees
    pub nb_trees: usize,
    /// None means grow until pure leaves
    pub max_depth: Option<usize>,
    /// a node with less samples becomes a leaf
    pub min_samples_split: usize,
    /// draw a bootstrap sample for each tree, else each tree sees all samples
    pub bootstrap: bool,
    /// grow trees in parallel
    pub parallel: bool,
} // end of ForestParams

impl ForestParams {
    pub fn new(nb_trees: usize, max_depth: Option<usize>, min_samples_split: usize, bootstrap: bool, parallel: bool) -> Self {
        ForestParams {
            nb_trees,
            max_depth,
            min_samples_split,
            bootstrap,
            parallel,
        }
    }

    /// same parameters with another number of trees
    pub fn with_nb_trees(&self, nb_trees: usize) -> Self {
        ForestParams { nb_trees, ..*self }
    }
} // end of impl ForestParams

/// 50 trees, unbounded depth, bootstrap, parallel
impl Default for ForestParams {
    fn default() -> Self {
        ForestParams::new(50, None, 2, true, true)
    }
}

impl fmt::Display for ForestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RandomForest(nb_trees={}, max_depth={:?})", self.nb_trees, self.max_depth)
    }
}

pub struct RandomForest {
    params: ForestParams,
    seed: u64,
    nb_classes: usize,
    trees: Vec<DecisionTree>,
} // end of struct RandomForest

impl RandomForest {
    pub fn new(params: ForestParams, seed: u64) -> Self {
        RandomForest {
            params,
            seed,
            nb_classes: 0,
            trees: Vec::new(),
        }
    }

    ///
    pub fn get_params(&self) -> &ForestParams {
        &self.params
    }

    /// number of fitted trees
    pub fn get_nb_trees(&self) -> usize {
        self.trees.len()
    }

    fn grow_tree(&self, x: &ArrayView2<f64>, y: &[usize], mut rng: Xoshiro256PlusPlus) -> DecisionTree {
        let nb_samples = x.nrows();
        let samples: Vec<usize> = if self.params.bootstrap {
            (0..nb_samples).map(|_| rng.gen_range(0..nb_samples)).collect()
        } else {
            (0..nb_samples).collect()
        };
        let max_features = ((x.ncols() as f64).sqrt() as usize).max(1);
        let mut tree = DecisionTree::new(self.nb_classes, max_features, self.params.max_depth, self.params.min_samples_split);
        tree.fit(x, y, &samples, &mut rng);
        tree
    } // end of grow_tree
} // end of impl RandomForest

impl ClassifierT for RandomForest {
    fn fit(&mut self, x: &ArrayView2<f64>, y: &[usize]) -> Result<(), PwlError> {
        if x.nrows() == 0 {
            return Err(PwlError::fit("no training sample"));
        }
        if x.nrows() != y.len() {
            return Err(PwlError::fit(format!("{} samples but {} classes", x.nrows(), y.len())));
        }
        if x.ncols() == 0 {
            return Err(PwlError::fit("no feature"));
        }
        if self.params.nb_trees == 0 {
            return Err(PwlError::fit("forest with no tree"));
        }
        self.nb_classes = y.iter().max().map(|m| m + 1).unwrap_or(0);
        // one generator per tree
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);
        let mut rngs = Vec::<Xoshiro256PlusPlus>::with_capacity(self.params.nb_trees);
        for _ in 0..self.params.nb_trees {
            rngs.push(rng.clone());
            rng.jump();
        }
        let trees: Vec<DecisionTree> = if self.params.parallel {
            rngs.into_par_iter().map(|r| self.grow_tree(x, y, r)).collect()
        } else {
            rngs.into_iter().map(|r| self.grow_tree(x, y, r)).collect()
        };
        self.trees = trees;
        log::debug!("RandomForest::fit nb samples : {}, nb trees : {}", x.nrows(), self.trees.len());
        Ok(())
    } // end of fit

    fn predict(&self, x: &ArrayView2<f64>) -> Result<Vec<usize>, PwlError> {
        if self.trees.is_empty() {
            return Err(PwlError::fit("predict called on a forest not fitted"));
        }
        let mut predictions = Vec::<usize>::with_capacity(x.nrows());
        for row in x.rows() {
            let row = row.to_vec();
            let mut votes = vec![0usize; self.nb_classes];
            for tree in &self.trees {
                votes[tree.predict_row(&row)] += 1;
            }
            predictions.push(majority(&votes));
        }
        Ok(predictions)
    } // end of predict
} // end of impl ClassifierT for RandomForest

/// Builds forests. The grid varies the number of trees around base parameters.
#[derive(Debug, Clone)]
pub struct RandomForestBuilder {
    base: ForestParams,
    nb_trees_grid: Vec<usize>,
}

impl RandomForestBuilder {
    pub fn new(base: ForestParams, nb_trees_grid: Vec<usize>) -> Self {
        RandomForestBuilder { base, nb_trees_grid }
    }
}

impl Default for RandomForestBuilder {
    fn default() -> Self {
        RandomForestBuilder::new(ForestParams::default(), NB_TREES_GRID.to_vec())
    }
}

impl ClassifierBuilderT for RandomForestBuilder {
    type Classifier = RandomForest;
    type Params = ForestParams;

    fn default_params(&self) -> ForestParams {
        self.base
    }

    fn param_grid(&self) -> Vec<ForestParams> {
        self.nb_trees_grid.iter().map(|n| self.base.with_nb_trees(*n)).collect()
    }

    fn build(&self, params: &ForestParams, seed: u64) -> RandomForest {
        RandomForest::new(*params, seed)
    }
} // end of impl ClassifierBuilderT for RandomForestBuilder

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::Array2;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // nb_per_class samples per class, all features shifted by 10 * class
    fn separable(nb_per_class: usize, nb_classes: usize, nb_features: usize) -> (Array2<f64>, Vec<usize>) {
        let nb = nb_per_class * nb_classes;
        let mut x = Array2::<f64>::zeros((nb, nb_features));
        let mut y = Vec::with_capacity(nb);
        for i in 0..nb {
            let class = i % nb_classes;
            for j in 0..nb_features {
                x[[i, j]] = 10. * class as f64 + ((i * 7 + j * 3) % 5) as f64 * 0.1;
            }
            y.push(class);
        }
        (x, y)
    }

    #[test]
    fn forest_learns_separable_classes() {
        log_init_test();
        //
        let (x, y) = separable(10, 3, 4);
        let mut forest = RandomForest::new(ForestParams::default(), 17);
        forest.fit(&x.view(), &y).unwrap();
        assert_eq!(forest.get_nb_trees(), 50);
        let predicted = forest.predict(&x.view()).unwrap();
        assert_eq!(predicted, y);
        // unseen points
        let probes = ndarray::array![[0.2, 0.1, 0.3, 0.], [20.1, 20.2, 20., 20.4]];
        assert_eq!(forest.predict(&probes.view()).unwrap(), vec![0, 2]);
    }

    #[test]
    fn forest_is_reproducible() {
        log_init_test();
        //
        let (x, y) = separable(6, 2, 3);
        let probes = ndarray::array![[5., 5., 5.], [4., 6., 5.5], [6., 4., 5.]];
        let params = ForestParams::new(15, Some(3), 2, true, true);
        let mut f1 = RandomForest::new(params, 3);
        let mut f2 = RandomForest::new(params.with_nb_trees(15), 3);
        f1.fit(&x.view(), &y).unwrap();
        f2.fit(&x.view(), &y).unwrap();
        assert_eq!(f1.predict(&probes.view()).unwrap(), f2.predict(&probes.view()).unwrap());
    }

    #[test]
    fn fit_errors() {
        let x = Array2::<f64>::zeros((0, 3));
        let mut forest = RandomForest::new(ForestParams::default(), 1);
        assert!(matches!(forest.fit(&x.view(), &[]), Err(PwlError::ClassifierFit { .. })));
        let x = Array2::<f64>::zeros((2, 3));
        assert!(matches!(forest.fit(&x.view(), &[0]), Err(PwlError::ClassifierFit { .. })));
        assert!(forest.predict(&x.view()).is_err());
    }

    #[test]
    fn builder_grid() {
        let builder = RandomForestBuilder::default();
        let grid = builder.param_grid();
        assert_eq!(grid.iter().map(|p| p.nb_trees).collect::<Vec<_>>(), NB_TREES_GRID.to_vec());
        assert_eq!(builder.default_params().nb_trees, 50);
        assert_eq!(builder.build(&grid[0], 1).get_params().nb_trees, 10);
    }
} // end of mod tests

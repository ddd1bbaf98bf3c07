//! Classifiers used by the cross validation harness.
//!
//! The harness only sees the [ClassifierT] interface `{fit, predict}` and builds a fresh classifier for each fold
//! (and each grid trial) through a [ClassifierBuilderT], which also exposes the hyperparameter grid searched in
//! nested cross validation.
//!
//! The provided classifier is a random forest of CART trees, see [forest].
//! Classes are dense codes 0..nb_classes, see [ClassLabels](crate::validation::classes::ClassLabels).

use ndarray::ArrayView2;

use crate::error::PwlError;

/// A decision tree grown on Gini impurity
pub mod tree;

/// A bagging ensemble of trees
pub mod forest;

pub use forest::{ForestParams, RandomForest, RandomForestBuilder};

#[cfg(test)]
pub(crate) mod testing;

/// The interface satisfied by classifiers. Rows of x are samples.
pub trait ClassifierT: Send {
    /// learn from samples x with classes y
    fn fit(&mut self, x: &ArrayView2<f64>, y: &[usize]) -> Result<(), PwlError>;
    /// predicted class of each row
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Vec<usize>, PwlError>;
}

/// Builds classifiers from hyperparameters. seed makes the built classifier reproducible.
pub trait ClassifierBuilderT: Sync {
    type Classifier: ClassifierT;
    type Params: Clone + std::fmt::Debug + Send + Sync;

    /// hyperparameters used without grid search
    fn default_params(&self) -> Self::Params;
    /// hyperparameters searched in grid search
    fn param_grid(&self) -> Vec<Self::Params>;
    ///
    fn build(&self, params: &Self::Params, seed: u64) -> Self::Classifier;
} // end of trait ClassifierBuilderT

/// fraction of correct predictions. 0 if there is nothing to predict
pub fn accuracy(truth: &[usize], predicted: &[usize]) -> f64 {
    assert_eq!(truth.len(), predicted.len());
    if truth.is_empty() {
        return 0.;
    }
    let nb_good = truth.iter().zip(predicted.iter()).filter(|(t, p)| t == p).count();
    nb_good as f64 / truth.len() as f64
} // end of accuracy

/// most frequent class among counts, ties go to the smallest class code
pub(crate) fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = class;
        }
    }
    best
} // end of majority

// end of mod tests

//! Deterministic classifiers for tests of the validation harness.

use ndarray::ArrayView2;

use super::{ClassifierBuilderT, ClassifierT};
use crate::error::PwlError;

/// nearest centroid in euclidean distance, ties to smallest class
pub(crate) struct NearestCentroid {
    centroids: Vec<Vec<f64>>,
}

impl ClassifierT for NearestCentroid {
    fn fit(&mut self, x: &ArrayView2<f64>, y: &[usize]) -> Result<(), PwlError> {
        let nb_classes = y.iter().max().map(|m| m + 1).unwrap_or(0);
        let mut sums = vec![vec![0.; x.ncols()]; nb_classes];
        let mut counts = vec![0usize; nb_classes];
        for (row, class) in x.rows().into_iter().zip(y.iter()) {
            counts[*class] += 1;
            for (s, v) in sums[*class].iter_mut().zip(row.iter()) {
                *s += v;
            }
        }
        self.centroids = sums
            .into_iter()
            .zip(counts)
            .map(|(s, c)| s.into_iter().map(|v| v / c.max(1) as f64).collect())
            .collect();
        Ok(())
    }

    fn predict(&self, x: &ArrayView2<f64>) -> Result<Vec<usize>, PwlError> {
        let predictions = x
            .rows()
            .into_iter()
            .map(|row| {
                let dist = |c: &Vec<f64>| c.iter().zip(row.iter()).map(|(a, b)| (a - b) * (a - b)).sum::<f64>();
                let mut best = 0;
                for (class, c) in self.centroids.iter().enumerate() {
                    if dist(c) < dist(&self.centroids[best]) {
                        best = class;
                    }
                }
                best
            })
            .collect();
        Ok(predictions)
    }
}

/// builds nearest centroids, the usize parameter is ignored
pub(crate) struct CentroidBuilder;

impl ClassifierBuilderT for CentroidBuilder {
    type Classifier = NearestCentroid;
    type Params = usize;

    fn default_params(&self) -> usize {
        0
    }
    fn param_grid(&self) -> Vec<usize> {
        vec![0, 1]
    }
    fn build(&self, _params: &usize, _seed: u64) -> NearestCentroid {
        NearestCentroid { centroids: Vec::new() }
    }
}

/// always predicts the class given as parameter
pub(crate) struct Constant(usize);

impl ClassifierT for Constant {
    fn fit(&mut self, _x: &ArrayView2<f64>, _y: &[usize]) -> Result<(), PwlError> {
        Ok(())
    }
    fn predict(&self, x: &ArrayView2<f64>) -> Result<Vec<usize>, PwlError> {
        Ok(vec![self.0; x.nrows()])
    }
}

pub(crate) struct ConstantBuilder;

impl ClassifierBuilderT for ConstantBuilder {
    type Classifier = Constant;
    type Params = usize;

    fn default_params(&self) -> usize {
        0
    }
    fn param_grid(&self) -> Vec<usize> {
        vec![0]
    }
    fn build(&self, params: &usize, _seed: u64) -> Constant {
        Constant(*params)
    }
}

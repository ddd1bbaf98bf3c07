//! Grid search of the pipeline parameters by an inner stratified k-fold.
//!
//! Trials are the cartesian product of cutoffs 0..nb_iterations (all recorded iterations) and of the classifier
//! grid. All trials are scored on the same inner folds, each trial builds its own selector and classifiers.
//! The score of a trial is its mean held out accuracy, the best trial is the first one reaching the best score
//! in grid order (cutoffs outer, classifier parameters inner).

use std::sync::Arc;

use ndarray::{ArrayView2, Axis};
use rand::RngCore;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use super::kfold::*;
use super::pipeline::*;
use super::selector::FeatureSelector;
use crate::classifier::{accuracy, ClassifierBuilderT, ClassifierT};
use crate::error::PwlError;

pub struct GridSearchResult<P> {
    /// all trials with their score, in grid order
    scores: Vec<(PipelineParams<P>, f64)>,
    /// rank of best trial in scores
    best: usize,
}

impl<P: Clone> GridSearchResult<P> {
    /// best parameters
    pub fn get_best_params(&self) -> &PipelineParams<P> {
        &self.scores[self.best].0
    }

    /// mean inner accuracy of best parameters
    pub fn get_best_score(&self) -> f64 {
        self.scores[self.best].1
    }

    ///
    pub fn get_scores(&self) -> &[(PipelineParams<P>, f64)] {
        &self.scores
    }
} // end of impl GridSearchResult

// mean held out accuracy of one trial
fn score_trial<B>(
    builder: &B,
    trial: &PipelineParams<B::Params>,
    x: &ArrayView2<f64>,
    y: &[usize],
    column_counts: &Arc<Vec<usize>>,
    folds: &[Fold],
    seeds: &[u64],
) -> Result<f64, PwlError>
where
    B: ClassifierBuilderT,
{
    let mut total = 0.;
    for (fold, seed) in folds.iter().zip(seeds.iter()) {
        let selector = FeatureSelector::new(column_counts.clone(), trial.num_iterations)?;
        let mut pipeline = SelectorPipeline::new(selector, builder.build(&trial.classifier, *seed));
        let x_train = x.select(Axis(0), fold.get_train());
        let y_train: Vec<usize> = fold.get_train().iter().map(|r| y[*r]).collect();
        pipeline.fit(&x_train.view(), &y_train)?;
        let x_test = x.select(Axis(0), fold.get_test());
        let y_test: Vec<usize> = fold.get_test().iter().map(|r| y[*r]).collect();
        let predicted = pipeline.predict(&x_test.view())?;
        total += accuracy(&y_test, &predicted);
    }
    Ok(total / folds.len() as f64)
} // end of score_trial

/// runs the grid search on the training samples (x, y).
/// The number of inner folds is clamped to the smallest class size, it is an error if this is less than 2.
pub fn grid_search<B>(
    builder: &B,
    x: &ArrayView2<f64>,
    y: &[usize],
    column_counts: &Arc<Vec<usize>>,
    nb_inner_folds: usize,
    rng: &mut Xoshiro256PlusPlus,
    parallel: bool,
) -> Result<GridSearchResult<B::Params>, PwlError>
where
    B: ClassifierBuilderT,
{
    let smallest = smallest_class(y);
    let nb_folds = nb_inner_folds.min(smallest);
    if nb_folds < 2 {
        return Err(PwlError::fit(format!(
            "grid search impossible, smallest class of training split has {} sample(s)",
            smallest
        )));
    }
    if nb_folds < nb_inner_folds {
        log::warn!("grid search : inner folds reduced from {} to {}", nb_inner_folds, nb_folds);
    }
    let folds = stratified_kfold(y, nb_folds, rng)?;
    let seeds: Vec<u64> = (0..nb_folds).map(|_| rng.next_u64()).collect();
    //
    let mut trials = Vec::<PipelineParams<B::Params>>::new();
    for num_iterations in 0..column_counts.len() {
        for classifier in builder.param_grid() {
            trials.push(PipelineParams {
                num_iterations,
                classifier,
            });
        }
    }
    if trials.is_empty() {
        return Err(PwlError::config("empty parameter grid"));
    }
    log::debug!("grid search : {} trials, {} inner folds", trials.len(), nb_folds);
    //
    let scored: Vec<Result<f64, PwlError>> = if parallel {
        trials
            .par_iter()
            .map(|trial| score_trial(builder, trial, x, y, column_counts, &folds, &seeds))
            .collect()
    } else {
        trials
            .iter()
            .map(|trial| score_trial(builder, trial, x, y, column_counts, &folds, &seeds))
            .collect()
    };
    let mut scores = Vec::<(PipelineParams<B::Params>, f64)>::with_capacity(trials.len());
    for (trial, score) in trials.into_iter().zip(scored.into_iter()) {
        scores.push((trial, score?));
    }
    let mut best = 0;
    for (rank, (_, score)) in scores.iter().enumerate() {
        if *score > scores[best].1 {
            best = rank;
        }
    }
    log::debug!("grid search best : {} score : {:.3e}", scores[best].0, scores[best].1);
    Ok(GridSearchResult { scores, best })
} // end of grid_search

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::Array2;
    use rand_xoshiro::rand_core::SeedableRng;

    use crate::classifier::testing::CentroidBuilder;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn grid_prefers_informative_iteration() {
        log_init_test();
        //
        // iteration 0 column is noise shared by both classes, iteration 1 column separates classes
        let nb = 12;
        let x = Array2::from_shape_fn((nb, 2), |(i, j)| if j == 0 { (i % 3) as f64 } else { 10. * (i % 2) as f64 });
        let y: Vec<usize> = (0..nb).map(|i| i % 2).collect();
        let counts = Arc::new(vec![1, 1]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let result = grid_search(&CentroidBuilder, &x.view(), &y, &counts, 3, &mut rng, true).unwrap();
        assert_eq!(result.get_scores().len(), 4);
        assert_eq!(result.get_best_params().num_iterations, 1);
        // first of the tied classifier parameters
        assert_eq!(result.get_best_params().classifier, 0);
        assert_eq!(result.get_best_score(), 1.);
    }

    #[test]
    fn grid_needs_two_samples_per_class() {
        let x = Array2::<f64>::zeros((3, 1));
        let y = vec![0, 0, 1];
        let counts = Arc::new(vec![1]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let res = grid_search(&CentroidBuilder, &x.view(), &y, &counts, 10, &mut rng, false);
        assert!(matches!(res, Err(PwlError::ClassifierFit { .. })));
    }
} // end of mod tests

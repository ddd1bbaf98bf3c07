//! Repeated stratified k-fold cross validation of a classifier on a feature matrix.
//!
//! Each repetition gets its own random stream, obtained by jumps from the master seed, which draws the folds
//! and the seeds of the classifiers of the folds. So results do not depend on the scheduling of the folds.
//! All (repetition, fold) pairs run in parallel, results are collected then sorted.
//!
//! With grid search, the number of iterations kept and the classifier parameters are chosen in each fold by an
//! inner cross validation on the training split, then the best pipeline is refitted on the whole training split.
//!
//! The accuracy of a repetition is the mean of its fold accuracies. The reported accuracy is the mean and
//! (population) standard deviation of the repetition accuracies. A fold that cannot be fitted aborts its
//! repetition only, the run fails if no repetition survives.

use std::sync::Arc;

use cpu_time::ProcessTime;
use ndarray::{ArrayView2, Axis};
use parking_lot::Mutex;
use rand::RngCore;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::time::SystemTime;

use super::classes::ClassLabels;
use super::gridsearch::grid_search;
use super::kfold::*;
use super::params::ValidationParams;
use super::pipeline::SelectorPipeline;
use super::selector::FeatureSelector;
use crate::classifier::{ClassifierBuilderT, ClassifierT};
use crate::error::PwlError;
use crate::tools::stats::{mean, mean_std};

/// Outcome of one outer fold
#[derive(Debug, Clone)]
pub struct FoldResult {
    repetition: usize,
    fold: usize,
    nb_tested: usize,
    nb_correct: usize,
    /// parameters chosen by grid search, if any
    chosen: Option<String>,
}

impl FoldResult {
    pub fn get_repetition(&self) -> usize {
        self.repetition
    }

    pub fn get_fold(&self) -> usize {
        self.fold
    }

    /// fraction of test samples correctly predicted
    pub fn get_accuracy(&self) -> f64 {
        if self.nb_tested == 0 {
            return 0.;
        }
        self.nb_correct as f64 / self.nb_tested as f64
    }

    ///
    pub fn get_chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }
} // end of impl FoldResult

/// Folds of a repetition that went through
#[derive(Debug, Clone)]
pub struct RepetitionResult {
    repetition: usize,
    folds: Vec<FoldResult>,
    accuracy: f64,
}

impl RepetitionResult {
    pub fn get_repetition(&self) -> usize {
        self.repetition
    }

    pub fn get_folds(&self) -> &[FoldResult] {
        &self.folds
    }

    /// mean of fold accuracies
    pub fn get_accuracy(&self) -> f64 {
        self.accuracy
    }
} // end of impl RepetitionResult

#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    repetitions: Vec<RepetitionResult>,
    /// one error per aborted repetition
    failures: Vec<PwlError>,
    mean: f64,
    std: f64,
}

impl CrossValidationResult {
    /// successful repetitions in order
    pub fn get_repetitions(&self) -> &[RepetitionResult] {
        &self.repetitions
    }

    ///
    pub fn get_failures(&self) -> &[PwlError] {
        &self.failures
    }

    /// mean of repetition accuracies
    pub fn get_mean(&self) -> f64 {
        self.mean
    }

    /// population standard deviation of repetition accuracies
    pub fn get_std(&self) -> f64 {
        self.std
    }

    /// correct predictions over all predictions of successful repetitions.
    /// Differs from [Self::get_mean] when folds have different sizes.
    pub fn pooled_accuracy(&self) -> f64 {
        let (mut correct, mut tested) = (0usize, 0usize);
        for fold in self.repetitions.iter().flat_map(|r| r.folds.iter()) {
            correct += fold.nb_correct;
            tested += fold.nb_tested;
        }
        if tested == 0 {
            return 0.;
        }
        correct as f64 / tested as f64
    }
} // end of impl CrossValidationResult

struct FoldTask {
    repetition: usize,
    fold: usize,
    split: Fold,
    seed: u64,
}

fn run_fold<B>(
    builder: &B,
    features: &ArrayView2<f64>,
    codes: &[usize],
    nb_classes: usize,
    column_counts: &Arc<Vec<usize>>,
    task: &FoldTask,
    params: &ValidationParams,
) -> Result<FoldResult, PwlError>
where
    B: ClassifierBuilderT,
{
    let train = task.split.get_train();
    let test = task.split.get_test();
    let y_train: Vec<usize> = train.iter().map(|r| codes[*r]).collect();
    let mut present = vec![false; nb_classes];
    for c in &y_train {
        present[*c] = true;
    }
    if let Some(missing) = present.iter().position(|p| !p) {
        return Err(PwlError::fit(format!("class {} absent from training split", missing)));
    }
    let x_train = features.select(Axis(0), train);
    let x_test = features.select(Axis(0), test);
    //
    let (predicted, chosen) = if params.do_grid_search() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(task.seed);
        let search = grid_search(
            builder,
            &x_train.view(),
            &y_train,
            column_counts,
            params.get_nb_inner_folds(),
            &mut rng,
            params.get_parallel(),
        )?;
        let best = search.get_best_params();
        log::info!(
            "repetition {} fold {} best : {}, inner accuracy : {:.3e}",
            task.repetition,
            task.fold,
            best,
            search.get_best_score()
        );
        let selector = FeatureSelector::new(column_counts.clone(), best.num_iterations)?;
        let mut pipeline = SelectorPipeline::new(selector, builder.build(&best.classifier, task.seed));
        pipeline.fit(&x_train.view(), &y_train)?;
        (pipeline.predict(&x_test.view())?, Some(best.to_string()))
    } else {
        let selector = FeatureSelector::keep_all(column_counts.clone())?;
        let mut pipeline = SelectorPipeline::new(selector, builder.build(&builder.default_params(), task.seed));
        pipeline.fit(&x_train.view(), &y_train)?;
        (pipeline.predict(&x_test.view())?, None)
    };
    if predicted.len() != test.len() {
        return Err(PwlError::fit(format!(
            "classifier returned {} predictions for {} samples",
            predicted.len(),
            test.len()
        )));
    }
    let nb_correct = test.iter().zip(predicted.iter()).filter(|(r, p)| codes[**r] == **p).count();
    Ok(FoldResult {
        repetition: task.repetition,
        fold: task.fold,
        nb_tested: test.len(),
        nb_correct,
        chosen,
    })
} // end of run_fold

// one entry per repetition, folds sorted
fn aggregate(
    by_repetition: Vec<Vec<Result<FoldResult, PwlError>>>,
    nb_folds: usize,
) -> Result<CrossValidationResult, PwlError> {
    let mut repetitions = Vec::<RepetitionResult>::with_capacity(by_repetition.len());
    let mut failures = Vec::<PwlError>::new();
    for (repetition, folds) in by_repetition.into_iter().enumerate() {
        match folds.into_iter().collect::<Result<Vec<FoldResult>, PwlError>>() {
            Ok(folds) => {
                let accuracies: Vec<f64> = folds.iter().map(|f| f.get_accuracy()).collect();
                let accuracy = mean(&accuracies).unwrap_or(0.);
                log::info!("  - Mean {}-fold accuracy: {:2.2}", nb_folds, 100. * accuracy);
                repetitions.push(RepetitionResult {
                    repetition,
                    folds,
                    accuracy,
                });
            }
            Err(e) => {
                log::error!("repetition {} aborted : {}", repetition, e);
                failures.push(e);
            }
        }
    }
    let accuracies: Vec<f64> = repetitions.iter().map(|r| r.accuracy).collect();
    let (mean, std) = match mean_std(&accuracies) {
        Some(ms) => ms,
        None => {
            return Err(failures
                .into_iter()
                .next()
                .unwrap_or_else(|| PwlError::config("no repetition was run")))
        }
    };
    if !failures.is_empty() {
        log::warn!(
            "{} repetition(s) aborted, accuracy computed on {} repetition(s)",
            failures.len(),
            repetitions.len()
        );
    }
    log::info!("Accuracy: {:2.2} +- {:2.2}", 100. * mean, 100. * std);
    Ok(CrossValidationResult {
        repetitions,
        failures,
        mean,
        std,
    })
} // end of aggregate

/// repeated stratified cross validation of classifiers built by builder.
/// column_counts gives the number of columns each iteration contributed to features.
pub fn cross_validate<B>(
    builder: &B,
    features: &ArrayView2<f64>,
    classes: &ClassLabels,
    column_counts: &[usize],
    params: &ValidationParams,
) -> Result<CrossValidationResult, PwlError>
where
    B: ClassifierBuilderT,
{
    params.check()?;
    let codes = classes.get_codes();
    if features.nrows() != codes.len() {
        return Err(PwlError::InputMismatch {
            nb_graphs: features.nrows(),
            nb_labels: codes.len(),
        });
    }
    let nb_columns: usize = column_counts.iter().sum();
    if column_counts.is_empty() || nb_columns != features.ncols() {
        return Err(PwlError::config(format!(
            "column counts sum to {} but feature matrix has {} columns",
            nb_columns,
            features.ncols()
        )));
    }
    let counts = Arc::new(column_counts.to_vec());
    log::info!(
        "cross validation : {} repetitions of {}-fold, grid search : {}, {} samples, {} classes",
        params.get_nb_repeat(),
        params.get_nb_folds(),
        params.do_grid_search(),
        codes.len(),
        classes.get_nb_classes()
    );
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    // a stream per repetition, shifted by a large jump
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(params.get_seed());
    let mut tasks = Vec::<FoldTask>::with_capacity(params.get_nb_repeat() * params.get_nb_folds());
    for repetition in 0..params.get_nb_repeat() {
        let mut rep_rng = rng.clone();
        rng.jump();
        let folds = stratified_kfold(codes, params.get_nb_folds(), &mut rep_rng)?;
        for (fold, split) in folds.into_iter().enumerate() {
            tasks.push(FoldTask {
                repetition,
                fold,
                split,
                seed: rep_rng.next_u64(),
            });
        }
    }
    //
    let results = Mutex::new(Vec::<(usize, usize, Result<FoldResult, PwlError>)>::with_capacity(tasks.len()));
    let run = |task: &FoldTask| {
        let res = run_fold(builder, features, codes, classes.get_nb_classes(), &counts, task, params)
            .map_err(|e| e.at_fold(task.repetition, task.fold));
        results.lock().push((task.repetition, task.fold, res));
    };
    if params.get_parallel() {
        tasks.par_iter().for_each(run);
    } else {
        tasks.iter().for_each(run);
    }
    let mut results = results.into_inner();
    results.sort_by_key(|(repetition, fold, _)| (*repetition, *fold));
    let mut by_repetition: Vec<Vec<Result<FoldResult, PwlError>>> =
        (0..params.get_nb_repeat()).map(|_| Vec::new()).collect();
    for (repetition, _, res) in results {
        by_repetition[repetition].push(res);
    }
    let result = aggregate(by_repetition, params.get_nb_folds());
    log::info!(
        "cross validation sys time(s) {:.2e} cpu time {:.2e}",
        sys_start.elapsed().map(|d| d.as_secs_f64()).unwrap_or(0.),
        cpu_start.elapsed().as_secs_f64()
    );
    result
} // end of cross_validate

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::Array2;

    use crate::classifier::testing::{CentroidBuilder, ConstantBuilder};

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn fold_result(repetition: usize, fold: usize, nb_tested: usize, nb_correct: usize) -> Result<FoldResult, PwlError> {
        Ok(FoldResult {
            repetition,
            fold,
            nb_tested,
            nb_correct,
            chosen: None,
        })
    }

    #[test]
    fn mean_of_repetition_means() {
        log_init_test();
        //
        // classes 0,0,0,1,1 in 2 folds : test sets of sizes 3 (2 of class 0) and 2 (1 of class 0)
        let classes = ClassLabels::new(&["a", "a", "a", "b", "b"]);
        let x = Array2::<f64>::zeros((5, 2));
        let params = ValidationParams::new(3, 2, 2, false, 42, true);
        let res = cross_validate(&ConstantBuilder, &x.view(), &classes, &[1, 1], &params).unwrap();
        assert_eq!(res.get_repetitions().len(), 3);
        assert!(res.get_failures().is_empty());
        // (2/3 + 1/2) / 2, not 3/5
        assert!((res.get_mean() - 7. / 12.).abs() < 1.0e-12);
        assert!(res.get_std().abs() < 1.0e-12);
        assert!((res.pooled_accuracy() - 0.6).abs() < 1.0e-12);
        for (rank, repetition) in res.get_repetitions().iter().enumerate() {
            assert_eq!(repetition.get_repetition(), rank);
            let folds: Vec<usize> = repetition.get_folds().iter().map(|f| f.get_fold()).collect();
            assert_eq!(folds, vec![0, 1]);
        }
    }

    #[test]
    fn failed_repetition_is_skipped() {
        log_init_test();
        //
        let by_repetition = vec![
            vec![fold_result(0, 0, 2, 2), fold_result(0, 1, 2, 1)],
            vec![fold_result(1, 0, 2, 2), Err(PwlError::fit("bad").at_fold(1, 1))],
            vec![fold_result(2, 0, 2, 1), fold_result(2, 1, 2, 1)],
        ];
        let res = aggregate(by_repetition, 2).unwrap();
        assert_eq!(res.get_repetitions().len(), 2);
        assert_eq!(res.get_repetitions()[1].get_repetition(), 2);
        assert_eq!(
            res.get_failures(),
            &[PwlError::ClassifierFit {
                repetition: 1,
                fold: 1,
                reason: "bad".into()
            }]
        );
        // repetitions 0.75 and 0.5
        assert!((res.get_mean() - 0.625).abs() < 1.0e-12);
        assert!((res.get_std() - 0.125).abs() < 1.0e-12);
    }

    #[test]
    fn class_missing_from_training() {
        log_init_test();
        //
        // single sample of class b : the fold testing it trains without b, in every repetition
        let classes = ClassLabels::new(&["a", "a", "a", "a", "b"]);
        let x = Array2::<f64>::zeros((5, 1));
        let params = ValidationParams::new(2, 2, 2, false, 42, false);
        let res = cross_validate(&ConstantBuilder, &x.view(), &classes, &[1], &params);
        match res {
            Err(PwlError::ClassifierFit { repetition, fold, .. }) => {
                assert_eq!(repetition, 0);
                assert_eq!(fold, 0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn separable_with_grid_search() {
        log_init_test();
        //
        let nb = 40;
        let names: Vec<&str> = (0..nb).map(|i| if i % 2 == 0 { "even" } else { "odd" }).collect();
        let classes = ClassLabels::new(&names);
        // iteration 0 is noise, iteration 1 separates
        let x = Array2::from_shape_fn((nb, 3), |(i, j)| match j {
            0 => (i % 5) as f64,
            _ => 5. * (i % 2) as f64 + j as f64,
        });
        let params = ValidationParams::new(2, 4, 3, true, 7, true);
        let res = cross_validate(&CentroidBuilder, &x.view(), &classes, &[1, 2], &params).unwrap();
        assert_eq!(res.get_mean(), 1.);
        for fold in res.get_repetitions().iter().flat_map(|r| r.get_folds().iter()) {
            assert!(fold.get_chosen().unwrap().contains("num_iterations=1"));
        }
    }

    #[test]
    fn reproducible_from_seed() {
        let nb = 30;
        let names: Vec<String> = (0..nb).map(|i| format!("c{}", i % 3)).collect();
        let classes = ClassLabels::new(&names);
        let x = Array2::from_shape_fn((nb, 2), |(i, j)| ((i * 7 + j * 3) % 11) as f64);
        let params = ValidationParams::new(3, 5, 2, false, 42, true);
        let first = cross_validate(&CentroidBuilder, &x.view(), &classes, &[1, 1], &params).unwrap();
        let mut sequential = params;
        sequential.set_parallel(false);
        let second = cross_validate(&CentroidBuilder, &x.view(), &classes, &[1, 1], &sequential).unwrap();
        assert_eq!(first.get_mean(), second.get_mean());
        assert_eq!(first.get_std(), second.get_std());
    }

    #[test]
    fn shape_errors() {
        let classes = ClassLabels::new(&["a", "b", "a", "b"]);
        let x = Array2::<f64>::zeros((3, 2));
        let params = ValidationParams::new(1, 2, 2, false, 42, true);
        assert_eq!(
            cross_validate(&ConstantBuilder, &x.view(), &classes, &[1, 1], &params).err(),
            Some(PwlError::InputMismatch {
                nb_graphs: 3,
                nb_labels: 4
            })
        );
        let x = Array2::<f64>::zeros((4, 2));
        assert!(matches!(
            cross_validate(&ConstantBuilder, &x.view(), &classes, &[1, 2], &params),
            Err(PwlError::InvalidConfiguration(_))
        ));
    }
} // end of mod tests

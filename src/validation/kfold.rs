//! Stratified k-fold splitting.
//!
//! Samples of each class are shuffled and dealt in turn to the folds, the dealing position going on from one class
//! to the next. So each fold gets floor or ceil of (class size / k) samples of each class and fold sizes differ
//! by at most one. A class with at least k samples is present in every test set, and (if it has at least 2 samples)
//! in every training set.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::PwlError;

/// A train/test split given by sample ranks. Both lists are sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Fold {
    train: Vec<usize>,
    test: Vec<usize>,
}

impl Fold {
    ///
    pub fn get_train(&self) -> &[usize] {
        &self.train
    }

    ///
    pub fn get_test(&self) -> &[usize] {
        &self.test
    }
} // end of impl Fold

/// splits samples with classes codes in nb_folds stratified folds
pub fn stratified_kfold(codes: &[usize], nb_folds: usize, rng: &mut Xoshiro256PlusPlus) -> Result<Vec<Fold>, PwlError> {
    let nb_samples = codes.len();
    if nb_folds < 2 {
        return Err(PwlError::config(format!("stratified k-fold needs k >= 2, got {}", nb_folds)));
    }
    if nb_folds > nb_samples {
        return Err(PwlError::config(format!(
            "cannot split {} samples in {} folds",
            nb_samples, nb_folds
        )));
    }
    let mut by_class = BTreeMap::<usize, Vec<usize>>::new();
    for (rank, code) in codes.iter().enumerate() {
        by_class.entry(*code).or_default().push(rank);
    }
    let smallest = by_class.values().map(|v| v.len()).min().unwrap_or(0);
    if smallest < nb_folds {
        log::warn!(
            "least populated class has {} members, which is less than the number of folds {}",
            smallest,
            nb_folds
        );
    }
    //
    let mut tests: Vec<Vec<usize>> = vec![Vec::new(); nb_folds];
    let mut position = 0usize;
    for (_, mut members) in by_class {
        members.shuffle(rng);
        for rank in members {
            tests[position % nb_folds].push(rank);
            position += 1;
        }
    }
    //
    let folds = tests
        .into_iter()
        .map(|mut test| {
            test.sort_unstable();
            let mut in_test = vec![false; nb_samples];
            for rank in &test {
                in_test[*rank] = true;
            }
            let train = (0..nb_samples).filter(|r| !in_test[*r]).collect();
            Fold { train, test }
        })
        .collect();
    Ok(folds)
} // end of stratified_kfold

/// smallest class size among given samples
pub(crate) fn smallest_class(codes: &[usize]) -> usize {
    let mut sizes = BTreeMap::<usize, usize>::new();
    for code in codes {
        *sizes.entry(*code).or_default() += 1;
    }
    sizes.values().copied().min().unwrap_or(0)
}

#[cfg(test)]
mod tests {

    use super::*;

    use rand_xoshiro::rand_core::SeedableRng;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn folds_partition_samples() {
        log_init_test();
        //
        let codes: Vec<usize> = (0..23).map(|i| if i < 15 { 0 } else { 1 }).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let folds = stratified_kfold(&codes, 5, &mut rng).unwrap();
        assert_eq!(folds.len(), 5);
        let mut seen = vec![0usize; codes.len()];
        for fold in &folds {
            assert_eq!(fold.get_train().len() + fold.get_test().len(), codes.len());
            for r in fold.get_test() {
                seen[*r] += 1;
                assert!(!fold.get_train().contains(r));
            }
            // 15 / 5 = 3 of class 0, 8 / 5 gives 1 or 2 of class 1
            let nb_0 = fold.get_test().iter().filter(|r| codes[**r] == 0).count();
            let nb_1 = fold.get_test().len() - nb_0;
            assert_eq!(nb_0, 3);
            assert!(nb_1 == 1 || nb_1 == 2);
        }
        // each sample is tested exactly once
        assert!(seen.iter().all(|s| *s == 1));
    }

    #[test]
    fn two_by_two() {
        log_init_test();
        //
        let codes = vec![0, 0, 1, 1];
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let folds = stratified_kfold(&codes, 2, &mut rng).unwrap();
        for fold in &folds {
            assert_eq!(smallest_class(&fold.get_train().iter().map(|r| codes[*r]).collect::<Vec<_>>()), 1);
            let test_codes: Vec<usize> = fold.get_test().iter().map(|r| codes[*r]).collect();
            assert_eq!(test_codes, vec![0, 1]);
        }
    }

    #[test]
    fn bad_fold_numbers() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        assert!(stratified_kfold(&[0, 1], 1, &mut rng).is_err());
        assert!(stratified_kfold(&[0, 1], 3, &mut rng).is_err());
    }
} // end of mod tests

//! Selection of the feature columns of the first iterations.
//!
//! The transform records how many columns each iteration contributed. Keeping iterations 0..=cutoff is keeping
//! a prefix of the columns whose length is a prefix sum of the column counts.
//! The cutoff is a plain field so a grid search builds one selector per trial.

use std::sync::Arc;

use ndarray::{s, ArrayView2};

use crate::error::PwlError;

#[derive(Debug, Clone)]
pub struct FeatureSelector {
    /// number of columns of each iteration, shared between selectors of a grid search
    column_counts: Arc<Vec<usize>>,
    /// last iteration kept
    num_iterations: usize,
}

impl FeatureSelector {
    /// fails with InvalidCutoff if num_iterations >= column_counts.len()
    pub fn new(column_counts: Arc<Vec<usize>>, num_iterations: usize) -> Result<Self, PwlError> {
        check_cutoff(&column_counts, num_iterations)?;
        Ok(FeatureSelector {
            column_counts,
            num_iterations,
        })
    }

    /// a selector keeping all iterations
    pub fn keep_all(column_counts: Arc<Vec<usize>>) -> Result<Self, PwlError> {
        if column_counts.is_empty() {
            return Err(PwlError::config("no iteration recorded"));
        }
        let last = column_counts.len() - 1;
        FeatureSelector::new(column_counts, last)
    }

    ///
    pub fn get_num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// change the cutoff
    pub fn set_num_iterations(&mut self, num_iterations: usize) -> Result<(), PwlError> {
        check_cutoff(&self.column_counts, num_iterations)?;
        self.num_iterations = num_iterations;
        Ok(())
    }

    /// number of columns kept
    pub fn get_nb_columns(&self) -> usize {
        self.column_counts[0..=self.num_iterations].iter().sum()
    }

    /// returns a view on the columns of iterations 0..=num_iterations
    pub fn select<'a>(&self, features: &ArrayView2<'a, f64>) -> Result<ArrayView2<'a, f64>, PwlError> {
        let total: usize = self.column_counts.iter().sum();
        if features.ncols() != total {
            return Err(PwlError::config(format!(
                "selector expects {} columns, matrix has {}",
                total,
                features.ncols()
            )));
        }
        let end = self.get_nb_columns();
        Ok(features.clone().slice_move(s![.., 0..end]))
    } // end of select
} // end of impl FeatureSelector

fn check_cutoff(column_counts: &[usize], num_iterations: usize) -> Result<(), PwlError> {
    if num_iterations >= column_counts.len() {
        return Err(PwlError::InvalidCutoff {
            cutoff: num_iterations,
            nb_iterations: column_counts.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    use ndarray::Array2;

    fn matrix(counts: &[usize]) -> Array2<f64> {
        let nb_cols: usize = counts.iter().sum();
        Array2::from_shape_fn((3, nb_cols), |(i, j)| (10 * i + j) as f64)
    }

    #[test]
    fn select_prefix_columns() {
        // iterations need not have the same width
        let counts = Arc::new(vec![2, 3, 1]);
        let x = matrix(&counts);
        let mut selector = FeatureSelector::new(counts.clone(), 0).unwrap();
        let cumulated = [2, 5, 6];
        for cutoff in 0..3 {
            selector.set_num_iterations(cutoff).unwrap();
            let selected = selector.select(&x.view()).unwrap();
            assert_eq!(selected.ncols(), cumulated[cutoff]);
            assert_eq!(selected.nrows(), 3);
            assert_eq!(selected, x.slice(s![.., 0..cumulated[cutoff]]));
        }
        // last cutoff gives back the matrix
        let all = FeatureSelector::keep_all(counts).unwrap();
        assert_eq!(all.select(&x.view()).unwrap(), x.view());
    }

    #[test]
    fn out_of_range_cutoff() {
        let counts = Arc::new(vec![7, 7]);
        assert_eq!(
            FeatureSelector::new(counts.clone(), 2).err(),
            Some(PwlError::InvalidCutoff {
                cutoff: 2,
                nb_iterations: 2
            })
        );
        let mut selector = FeatureSelector::new(counts, 1).unwrap();
        assert!(matches!(selector.set_num_iterations(5), Err(PwlError::InvalidCutoff { .. })));
        // unchanged after failure
        assert_eq!(selector.get_num_iterations(), 1);
    }

    #[test]
    fn width_mismatch() {
        let selector = FeatureSelector::new(Arc::new(vec![2, 2]), 0).unwrap();
        let x = matrix(&[2, 3]);
        assert!(matches!(selector.select(&x.view()), Err(PwlError::InvalidConfiguration(_))));
    }
} // end of mod tests

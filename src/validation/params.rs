//! Validation parameters

use crate::error::PwlError;

/// A structure describing the repeated (nested) cross validation.
#[derive(Copy, Clone, Debug)]
pub struct ValidationParams {
    /// number of repetitions of the k-fold
    nb_repeat: usize,
    /// number of folds of outer cross validation
    nb_folds: usize,
    /// number of folds of the cross validation inside grid search
    nb_inner_folds: usize,
    /// do we search the number of iterations and the classifier parameters in each fold
    grid_search: bool,
    /// master seed, repetitions get their streams by jumps
    seed: u64,
    /// run folds and grid trials in parallel
    parallel: bool,
} // end of ValidationParams

impl ValidationParams {
    pub fn new(nb_repeat: usize, nb_folds: usize, nb_inner_folds: usize, grid_search: bool, seed: u64, parallel: bool) -> Self {
        ValidationParams {
            nb_repeat,
            nb_folds,
            nb_inner_folds,
            grid_search,
            seed,
            parallel,
        }
    }

    /// checks values before any computation
    pub fn check(&self) -> Result<(), PwlError> {
        if self.nb_repeat == 0 {
            return Err(PwlError::config("number of repetitions must be >= 1"));
        }
        if self.nb_folds < 2 {
            return Err(PwlError::config(format!("number of folds must be >= 2, got {}", self.nb_folds)));
        }
        if self.grid_search && self.nb_inner_folds < 2 {
            return Err(PwlError::config(format!(
                "number of inner folds must be >= 2, got {}",
                self.nb_inner_folds
            )));
        }
        Ok(())
    } // end of check

    /// number of repetitions
    pub fn get_nb_repeat(&self) -> usize {
        self.nb_repeat
    }

    pub fn get_nb_folds(&self) -> usize {
        self.nb_folds
    }

    pub fn get_nb_inner_folds(&self) -> usize {
        self.nb_inner_folds
    }

    ///
    pub fn do_grid_search(&self) -> bool {
        self.grid_search
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    pub fn get_parallel(&self) -> bool {
        self.parallel
    }

    pub fn set_grid_search(&mut self, grid_search: bool) {
        self.grid_search = grid_search
    }

    /// sequential mode helps debugging
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel
    }
} // end of impl ValidationParams

/// 10 repetitions of 10 folds, 10 inner folds, no grid search, seed 42, parallel
impl Default for ValidationParams {
    fn default() -> Self {
        ValidationParams::new(10, 10, 10, false, 42, true)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn check_params() {
        assert!(ValidationParams::default().check().is_ok());
        assert!(ValidationParams::new(0, 10, 10, false, 1, true).check().is_err());
        assert!(ValidationParams::new(1, 1, 10, false, 1, true).check().is_err());
        // inner folds only matter with grid search
        assert!(ValidationParams::new(1, 2, 0, false, 1, true).check().is_ok());
        assert!(ValidationParams::new(1, 2, 0, true, 1, true).check().is_err());
    }
} // end of mod tests

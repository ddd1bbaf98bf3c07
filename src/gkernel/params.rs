//! Persistent Weisfeiler-Lehman Parameters
//!
//!
//!
use std::fmt;
use std::str::FromStr;

use crate::error::PwlError;

/// The order in which graph elements enter the filtration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FiltrationKind {
    /// ascending weight order, an edge gets the max of its end points weights
    Sublevel,
    /// descending weight order, an edge gets the min of its end points weights
    Superlevel,
}

impl FromStr for FiltrationKind {
    type Err = PwlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sublevel" => Ok(FiltrationKind::Sublevel),
            "superlevel" => Ok(FiltrationKind::Superlevel),
            _ => Err(PwlError::config(format!(
                "unknown filtration kind {:?}, expecting sublevel or superlevel",
                s
            ))),
        }
    }
} // end of impl FromStr for FiltrationKind

impl fmt::Display for FiltrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiltrationKind::Sublevel => write!(f, "sublevel"),
            FiltrationKind::Superlevel => write!(f, "superlevel"),
        }
    }
}

/// What to do with a graph without node
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmptyGraphPolicy {
    /// propagate a DegenerateFiltration error
    Fail,
    /// replace the feature block by zeros
    ZeroFill,
}

#[derive(Debug, Copy, Clone)]
pub struct PwlParams {
    /// number of Weisfeiler-Lehman iterations. Features are computed for iterations 0..=nb_iter
    nb_iter: usize,
    /// filtration kind
    filtration: FiltrationKind,
    /// persistence above this threshold is counted as significant
    threshold: f64,
    /// empty graph handling
    empty_policy: EmptyGraphPolicy,
    /// parallel mode (graphs processed in parallel)
    parallel: bool,
} // end of PwlParams

impl PwlParams {
    pub fn new(nb_iter: usize, filtration: FiltrationKind, threshold: f64, empty_policy: EmptyGraphPolicy, parallel: bool) -> Self {
        PwlParams {
            nb_iter,
            filtration,
            threshold,
            empty_policy,
            parallel,
        }
    }

    ///
    pub fn get_nb_iter(&self) -> usize {
        self.nb_iter
    }

    ///
    pub fn get_filtration(&self) -> FiltrationKind {
        self.filtration
    }

    ///
    pub fn get_threshold(&self) -> f64 {
        self.threshold
    }

    ///
    pub fn get_empty_policy(&self) -> EmptyGraphPolicy {
        self.empty_policy
    }

    ///
    pub fn get_parallel(&self) -> bool {
        self.parallel
    }

    /// useful to set flag received from argument related to datafile reading
    pub fn set_empty_policy(&mut self, policy: EmptyGraphPolicy) {
        self.empty_policy = policy
    }

    /// sequential mode helps debugging
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel
    }
} // end of impl PwlParams

/// 3 iterations, sublevel filtration, zero threshold, fail on empty graphs, parallel
impl Default for PwlParams {
    fn default() -> Self {
        PwlParams::new(3, FiltrationKind::Sublevel, 0., EmptyGraphPolicy::Fail, true)
    }
}

// end of mod tests

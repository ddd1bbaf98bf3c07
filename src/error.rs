//! Errors of the library.
//!
//! Configuration and shape errors are fatal. A [PwlError::DegenerateFiltration] is fatal or replaced by a zero
//! feature block depending on [EmptyGraphPolicy](crate::gkernel::params::EmptyGraphPolicy).
//! A [PwlError::ClassifierFit] only aborts the aggregation of the repetition it occurred in.
//!
//! The io layer and the executable work with `anyhow::Result`, these errors go through `?` and can be
//! recovered with `downcast_ref::<PwlError>()`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PwlError {
    /// number of graphs and number of labels differ
    #[error("input mismatch : {nb_graphs} graphs but {nb_labels} labels")]
    InputMismatch { nb_graphs: usize, nb_labels: usize },

    /// bad parameter or incoherent data shape detected before computation
    #[error("invalid configuration : {0}")]
    InvalidConfiguration(String),

    /// feature selector asked for an iteration that was not computed
    #[error("invalid cutoff {cutoff}, only {nb_iterations} iterations recorded")]
    InvalidCutoff { cutoff: usize, nb_iterations: usize },

    /// graph without node, no filtration can be built
    #[error("degenerate filtration for graph {graph} : graph has no node")]
    DegenerateFiltration { graph: usize },

    /// classifier could not be fitted on a fold
    #[error("classifier fit failed at repetition {repetition}, fold {fold} : {reason}")]
    ClassifierFit {
        repetition: usize,
        fold: usize,
        reason: String,
    },
}

impl PwlError {
    /// a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        PwlError::InvalidConfiguration(msg.into())
    }

    /// a fit error not yet located in the cross validation loop. See [PwlError::at_fold]
    pub fn fit(reason: impl Into<String>) -> Self {
        PwlError::ClassifierFit {
            repetition: 0,
            fold: 0,
            reason: reason.into(),
        }
    }

    /// attach repetition and fold to a fit error, other errors are returned unchanged
    pub fn at_fold(self, repetition: usize, fold: usize) -> Self {
        match self {
            PwlError::ClassifierFit { reason, .. } => PwlError::ClassifierFit {
                repetition,
                fold,
                reason,
            },
            other => other,
        }
    }
} // end of impl PwlError

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn fit_error_gets_fold_context() {
        let err = PwlError::fit("empty training set").at_fold(3, 7);
        assert_eq!(
            err,
            PwlError::ClassifierFit {
                repetition: 3,
                fold: 7,
                reason: String::from("empty training set")
            }
        );
        let msg = format!("{}", err);
        assert!(msg.contains("repetition 3"));
        assert!(msg.contains("fold 7"));
    }

    #[test]
    fn other_errors_keep_their_kind() {
        let err = PwlError::config("k must be >= 2").at_fold(1, 1);
        assert!(matches!(err, PwlError::InvalidConfiguration(_)));
        // goes through anyhow and back
        let any: anyhow::Error = PwlError::InputMismatch { nb_graphs: 3, nb_labels: 2 }.into();
        assert!(matches!(
            any.downcast_ref::<PwlError>(),
            Some(PwlError::InputMismatch { nb_graphs: 3, nb_labels: 2 })
        ));
    }
} // end of mod tests

//! Classification experiment : Persistent Weisfeiler-Lehman features of labelled graphs evaluated by repeated
//! (nested) cross validation.
//!
//! Graph count and label count are checked before any feature is computed.

use ndarray::Array2;
use petgraph::graph::{Graph, IndexType};
use petgraph::EdgeType;

use crate::classifier::ClassifierBuilderT;
use crate::error::PwlError;
use crate::gkernel::params::PwlParams;
use crate::gkernel::persistence::FeatureExtractorT;
use crate::gkernel::pgraph::*;
use crate::gkernel::pwl::PersistentWeisfeilerLehman;
use crate::validation::classes::ClassLabels;
use crate::validation::crossval::*;
use crate::validation::params::ValidationParams;

/// what an experiment computed
pub struct ExperimentResult {
    features: Array2<f64>,
    column_counts: Vec<usize>,
    classes: ClassLabels,
    validation: CrossValidationResult,
}

impl ExperimentResult {
    /// one row per graph
    pub fn get_features(&self) -> &Array2<f64> {
        &self.features
    }

    /// number of columns of each iteration
    pub fn get_column_counts(&self) -> &[usize] {
        &self.column_counts
    }

    pub fn get_classes(&self) -> &ClassLabels {
        &self.classes
    }

    pub fn get_validation(&self) -> &CrossValidationResult {
        &self.validation
    }
} // end of impl ExperimentResult

pub struct Experiment<'a, E, B>
where
    E: FeatureExtractorT,
    B: ClassifierBuilderT,
{
    pwl_params: PwlParams,
    validation_params: ValidationParams,
    extractor: &'a E,
    builder: &'a B,
}

impl<'a, E, B> Experiment<'a, E, B>
where
    E: FeatureExtractorT,
    B: ClassifierBuilderT,
{
    pub fn new(pwl_params: PwlParams, validation_params: ValidationParams, extractor: &'a E, builder: &'a B) -> Self {
        Experiment {
            pwl_params,
            validation_params,
            extractor,
            builder,
        }
    }

    /// labels\[i\] is the class of graphs\[i\]
    pub fn run<Nlabel, Ed, Ty, Ix, S>(
        &self,
        graphs: &[Graph<Nweight<Nlabel>, Ed, Ty, Ix>],
        labels: &[S],
    ) -> Result<ExperimentResult, PwlError>
    where
        Nlabel: LabelT,
        Ed: Sync,
        Ty: EdgeType + Sync,
        Ix: IndexType + Sync,
        S: AsRef<str>,
    {
        if graphs.len() != labels.len() {
            return Err(PwlError::InputMismatch {
                nb_graphs: graphs.len(),
                nb_labels: labels.len(),
            });
        }
        self.validation_params.check()?;
        log::debug!("Read {} graphs and {} labels", graphs.len(), labels.len());
        //
        let classes = ClassLabels::new(labels);
        log::info!("{} classes, sizes : {:?}", classes.get_nb_classes(), classes.class_sizes());
        let pwl = PersistentWeisfeilerLehman::new(self.pwl_params, self.extractor);
        let (features, column_counts) = pwl.transform(graphs)?;
        let validation = cross_validate(
            self.builder,
            &features.view(),
            &classes,
            &column_counts,
            &self.validation_params,
        )?;
        Ok(ExperimentResult {
            features,
            column_counts,
            classes,
            validation,
        })
    } // end of run
} // end of impl Experiment

// end of mod tests

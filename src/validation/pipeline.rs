//! Sequential composition of a [FeatureSelector] and a classifier.
//! fit and predict first restrict the feature matrix to the selected iterations, then call the classifier.

use std::fmt;

use ndarray::ArrayView2;

use super::selector::FeatureSelector;
use crate::classifier::ClassifierT;
use crate::error::PwlError;

/// parameters of one grid trial
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams<P> {
    /// last iteration kept by the selector
    pub num_iterations: usize,
    /// classifier hyperparameters
    pub classifier: P,
}

impl<P: fmt::Debug> fmt::Display for PipelineParams<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pipeline(fs__num_iterations={}, clf={:?})", self.num_iterations, self.classifier)
    }
}

pub struct SelectorPipeline<C>
where
    C: ClassifierT,
{
    selector: FeatureSelector,
    classifier: C,
}

impl<C> SelectorPipeline<C>
where
    C: ClassifierT,
{
    pub fn new(selector: FeatureSelector, classifier: C) -> Self {
        SelectorPipeline { selector, classifier }
    }

    ///
    pub fn get_selector(&self) -> &FeatureSelector {
        &self.selector
    }
} // end of impl SelectorPipeline

impl<C> ClassifierT for SelectorPipeline<C>
where
    C: ClassifierT,
{
    fn fit(&mut self, x: &ArrayView2<f64>, y: &[usize]) -> Result<(), PwlError> {
        let selected = self.selector.select(x)?;
        self.classifier.fit(&selected, y)
    }

    fn predict(&self, x: &ArrayView2<f64>) -> Result<Vec<usize>, PwlError> {
        let selected = self.selector.select(x)?;
        self.classifier.predict(&selected)
    }
} // end of impl ClassifierT for SelectorPipeline

// end of mod tests

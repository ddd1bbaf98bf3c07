//! To ease access to most frequently items
//!

pub use crate::error::PwlError;

pub use crate::gkernel::params::*;
pub use crate::gkernel::persistence::{FeatureExtractorT, PersistenceSummary};
pub use crate::gkernel::pgraph::{graph_from_parts, LabelGraph, LabelT, Nweight};
pub use crate::gkernel::pwl::{transform, PersistentWeisfeilerLehman};

pub use crate::classifier::forest::NB_TREES_GRID;
pub use crate::classifier::{ClassifierBuilderT, ClassifierT, ForestParams, RandomForest, RandomForestBuilder};

pub use crate::validation::classes::ClassLabels;
pub use crate::validation::crossval::{cross_validate, CrossValidationResult};
pub use crate::validation::params::ValidationParams;

pub use crate::io::labels::read_labels;
pub use crate::io::output::Output;
pub use crate::io::{load_graph, load_graphs};

pub use crate::experiment::{Experiment, ExperimentResult};

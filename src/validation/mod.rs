//! Evaluation of graph features by classification.
//!
//! - [classes] maps class names to dense codes
//! - [kfold] stratified k-fold splits
//! - [selector] and [pipeline] restrict features to the first iterations before classification
//! - [gridsearch] chooses the number of iterations and classifier parameters by inner cross validation
//! - [crossval] repeated (nested) cross validation with accuracy mean and standard deviation
//!
//! references
//! - Cawley, Talbot. On over-fitting in model selection and subsequent selection bias in performance evaluation.
//!   JMLR 2010

pub mod classes;
pub mod params;
pub mod kfold;
pub mod selector;
pub mod pipeline;
pub mod gridsearch;
pub mod crossval;

//! lib target
//!
//! Persistent Weisfeiler-Lehman features of labelled graphs and their evaluation by repeated nested
//! cross validation of a random forest.
//!
//! - [gkernel] label propagation, filtrations, 0-dimensional persistence and the feature transform
//! - [classifier] random forest of CART trees behind a fit/predict interface
//! - [validation] stratified folds, iteration selection, grid search and repeated cross validation
//! - [io] gml and edge list graph readers, labels reader, csv dumps
//! - [experiment] glue from graphs and labels to accuracy

pub mod error;

pub mod gkernel;

pub mod classifier;

pub mod validation;

pub mod io;

pub mod tools;

pub mod experiment;

pub mod prelude;

//! Small numeric utilities.

pub mod stats;

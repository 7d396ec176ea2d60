//! Whole-mesh algorithms.

pub mod merge;

pub use merge::{MergeSource, merge_into};

//! Diff logic - deciding what happens to a single file

mod compare;

pub use compare::compare_mtimes;

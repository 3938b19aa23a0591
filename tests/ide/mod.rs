//! The analysis facade.

pub mod tests_analysis;

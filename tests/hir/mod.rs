//! Single-document semantics: linking and validation rules.

pub mod tests_linking;
pub mod tests_validation;

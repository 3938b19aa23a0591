//! Multi-document builds.

pub mod tests_builder;
pub mod tests_interop;

//! Project orchestration: the document builder and its configuration.

mod builder;
mod config;
mod error;

pub use builder::{BuildReport, BuilderServices, DocumentBuilder};
pub use config::EngineConfig;
pub use error::BuildError;

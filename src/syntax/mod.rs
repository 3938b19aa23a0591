//! Parsed documents and AST traversal.

pub mod file;
pub mod visit;

pub use file::SyntaxFile;
pub use visit::{walk_expr, walk_statements};

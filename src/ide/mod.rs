//! IDE features: high-level APIs for editor integrations.
//!
//! Everything here reads the state the [`DocumentBuilder`](crate::project::DocumentBuilder)
//! leaves behind; nothing recomputes semantics on its own. Positions are
//! zero-based lines and byte columns, converted at the editor boundary.

mod analysis;
mod goto;
mod symbols;

pub use analysis::{Analysis, AnalysisHost};
pub use goto::{GotoResult, GotoTarget, goto_definition, reference_at};
pub use symbols::{SymbolInfo, document_symbols, workspace_symbols};

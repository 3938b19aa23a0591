//! Logos lexer and recursive descent parser for BBj
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Parser → typed AST (Program / Statement / Expr), one NodeId per node
//!     ↓
//! HIR → scopes, links, diagnostics
//! ```
//!
//! Only the statement subset the semantic layer reasons about is modelled;
//! anything else degrades to an expression statement or a syntax error.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod expressions;
mod lexer;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{Parse, SyntaxError, parse};

pub use text_size::{TextRange, TextSize};

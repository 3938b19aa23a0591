//! Syntax file wrapper for parsed BBj documents.

use crate::base::LineIndex;
use crate::parser::{Parse, Program, Statement, SyntaxError, parse};

use super::visit::walk_statements;

/// A parsed BBj document: the AST, its syntax errors and a line index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFile {
    parse: Parse,
    line_index: LineIndex,
}

impl SyntaxFile {
    pub fn new(source: &str) -> Self {
        Self {
            parse: parse(source),
            line_index: LineIndex::new(source),
        }
    }

    /// Get the underlying parse result
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    pub fn program(&self) -> &Program {
        &self.parse.program
    }

    /// Check if parsing had errors
    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }

    /// Get parse errors
    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Visits every statement, nested ones included, in source order.
    pub fn for_each_statement(&self, mut f: impl FnMut(&Statement)) {
        walk_statements(&self.parse.program.statements, &mut f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{LineCol, TextSize};

    #[test]
    fn test_syntax_file_errors() {
        let ok = SyntaxFile::new("print 1\n");
        assert!(!ok.has_errors());
        let broken = SyntaxFile::new("for i=1 to 3\n");
        assert!(broken.has_errors());
        assert_eq!(broken.errors().len(), 1);
    }

    #[test]
    fn test_for_each_statement_visits_nested() {
        let file = SyntaxFile::new("while 1\n  print 2\n  if a then b=1\nwend\n");
        let mut count = 0;
        file.for_each_statement(|_| count += 1);
        // while, print, if, assignment
        assert_eq!(count, 4);
    }

    #[test]
    fn test_line_index() {
        let file = SyntaxFile::new("a=1\nb=2\n");
        assert_eq!(
            file.line_index().line_col(TextSize::new(4)),
            LineCol::new(1, 0)
        );
    }
}

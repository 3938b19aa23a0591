//! Statement option compatibility.
//!
//! Each verb with an option list has a fixed set of legal keys. A statement
//! using any other key gets one diagnostic listing every illegal key, as
//! written, and the legal set.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{ValidationContext, ValidationRule};
use crate::hir::diagnostics::{DiagnosticCollector, codes};
use crate::parser::{Statement, StatementKind, StatementOption};

/// Keys every verb accepts: error branches are generic.
const UNIVERSAL_OPTIONS: &[&str] = &["err"];

/// Legal option keys per verb, lowercase.
#[derive(Clone, Debug)]
pub struct OptionTable {
    verbs: FxHashMap<SmolStr, Vec<SmolStr>>,
}

impl Default for OptionTable {
    fn default() -> Self {
        Self::empty().with_verb("OPEN", &["mode", "tim"])
    }
}

impl OptionTable {
    pub fn empty() -> Self {
        Self {
            verbs: FxHashMap::default(),
        }
    }

    pub fn with_verb(mut self, verb: &str, options: &[&str]) -> Self {
        self.verbs.insert(
            SmolStr::new(verb.to_ascii_uppercase()),
            options
                .iter()
                .map(|o| SmolStr::new(o.to_ascii_lowercase()))
                .collect(),
        );
        self
    }

    pub fn legal_options(&self, verb: &str) -> Option<&[SmolStr]> {
        self.verbs.get(verb).map(Vec::as_slice)
    }

    /// Keys in `options` that `verb` does not accept, in source order.
    pub fn illegal<'a>(&self, verb: &str, options: &'a [StatementOption]) -> Vec<&'a StatementOption> {
        let Some(legal) = self.legal_options(verb) else {
            return Vec::new();
        };
        options
            .iter()
            .filter(|option| {
                let key = option.key.text.as_str();
                !legal
                    .iter()
                    .map(SmolStr::as_str)
                    .chain(UNIVERSAL_OPTIONS.iter().copied())
                    .any(|l| l.eq_ignore_ascii_case(key))
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatementOptionRule {
    table: OptionTable,
}

impl StatementOptionRule {
    pub fn new(table: OptionTable) -> Self {
        Self { table }
    }

    fn check_statement(&self, statement: &Statement, out: &mut DiagnosticCollector) {
        let StatementKind::Open(open) = &statement.kind else {
            return;
        };
        let verb = "OPEN";
        let illegal = self.table.illegal(verb, &open.options);
        if illegal.is_empty() {
            return;
        }
        let legal = self.table.legal_options(verb).unwrap_or_default();
        let found: Vec<&str> = illegal.iter().map(|o| o.key.text.as_str()).collect();
        let legal_names: Vec<&str> = legal.iter().map(SmolStr::as_str).collect();
        let message = format!(
            "{verb} verb can have following {} optional options: {}. Found: {}.",
            number_word(legal.len()),
            legal_names.join(","),
            found.join(","),
        );
        let diagnostic = out.error(statement.id, open.options_range, codes::OPTION_VIOLATION, message);
        diagnostic.property = Some("options");
    }
}

impl ValidationRule for StatementOptionRule {
    fn id(&self) -> &'static str {
        "statement-options"
    }

    fn check(&self, ctx: &ValidationContext<'_>, out: &mut DiagnosticCollector) {
        ctx.file
            .for_each_statement(|statement| self.check_statement(statement, out));
    }
}

fn number_word(n: usize) -> String {
    const WORDS: &[&str] = &[
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    WORDS
        .get(n)
        .map(|w| (*w).to_string())
        .unwrap_or_else(|| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::validation::test_support::validate;
    use rstest::rstest;

    #[test]
    fn test_open_invalid_options_message() {
        let diagnostics = validate("OPEN (unt,mod=\"\",time=\"\")\"path/\"+\"html.png\"\n");
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(
            &*diagnostic.message,
            "OPEN verb can have following two optional options: mode,tim. Found: mod,time."
        );
        assert_eq!(diagnostic.property, Some("options"));
        assert_eq!(diagnostic.code, Some(codes::OPTION_VIOLATION));
    }

    #[rstest]
    #[case("OPEN (unt,mode=\"12\",tim=12)\"path/\"+\"html.png\"\n")]
    #[case("OPEN (unt,mode=\"12\")\"path/\"+\"html.png\"\n")]
    #[case("OPEN (unt,tim=12)\"path/\"+\"html.png\"\n")]
    #[case("OPEN (unt)\"path/\"+\"html.png\"\n")]
    #[case("open (unt,MODE=\"x\",err=failed)\"f\"\nfailed:\n")]
    fn test_open_valid_options(#[case] source: &str) {
        let diagnostics = validate(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[test]
    fn test_one_diagnostic_per_statement() {
        let diagnostics = validate("OPEN (1,a=1,b=2,c=3)\"x\"\nOPEN (2,d=1)\"y\"\n");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.ends_with("Found: a,b,c."));
        assert!(diagnostics[1].message.ends_with("Found: d."));
    }

    #[test]
    fn test_custom_table() {
        let table = OptionTable::empty().with_verb("open", &["tim"]);
        assert_eq!(
            table.legal_options("OPEN"),
            Some([SmolStr::new("tim")].as_slice())
        );
        assert!(table.legal_options("CLOSE").is_none());
    }

    #[rstest]
    #[case(1, "one")]
    #[case(2, "two")]
    #[case(12, "12")]
    fn test_number_word(#[case] n: usize, #[case] expected: &str) {
        assert_eq!(number_word(n), expected);
    }
}

//! Validation rules seen through a full build.

use bbj::hir::codes;
use rstest::rstest;

use crate::helpers::diagnostic_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// OPEN OPTIONS
// =============================================================================

#[test]
fn test_open_with_unknown_options() {
    let diagnostics = diagnostics_for("OPEN (unt,mod=\"\",time=\"\")\"path/\"+\"html.png\"\n");
    assert_eq!(diagnostics.len(), 1, "{}", render(&diagnostics));
    assert_eq!(
        &*diagnostics[0].message,
        "OPEN verb can have following two optional options: mode,tim. Found: mod,time."
    );
    assert_eq!(diagnostics[0].property, Some("options"));
    assert_eq!(diagnostics[0].code, Some(codes::OPTION_VIOLATION));
}

#[rstest]
#[case::both("OPEN (unt,mode=\"12\",tim=12)\"path/\"+\"html.png\"\n")]
#[case::mode_only("OPEN (unt,mode=\"12\")\"path/\"+\"html.png\"\n")]
#[case::tim_only("OPEN (unt,tim=12)\"path/\"+\"html.png\"\n")]
#[case::none("OPEN (unt)\"path/\"+\"html.png\"\n")]
fn test_open_with_legal_options(#[case] source: &str) {
    assert_no_diagnostics(source);
}

#[test]
fn test_open_diagnostic_points_at_options() {
    let source = "OPEN (unt,mod=\"\")\"x\"\n";
    let diagnostics = diagnostics_for(source);
    assert_eq!(diagnostics.len(), 1);
    let range = diagnostics[0].range;
    let covered = &source[usize::from(range.start())..usize::from(range.end())];
    assert!(covered.contains("mod"), "range covers {covered:?}");
}

// =============================================================================
// KEYED FILES
// =============================================================================

#[test]
fn test_mkeyed_accepts_mode() {
    assert_no_diagnostics("MKEYED \"MYFILE\",10,80,1000,MODE=\"somemode\"\n");
}

#[test]
fn test_vkeyed_and_xkeyed_reject_mode() {
    let diagnostics = diagnostics_for(
        "VKEYED \"MYFILE\",10,80,1000,MODE=\"somemode\"\nXKEYED \"MYFILE\",10,80,1000,MODE=\"somemode\"\n",
    );
    assert_eq!(diagnostics.len(), 2, "{}", render(&diagnostics));
    for diagnostic in &diagnostics {
        assert_eq!(&*diagnostic.message, "MODE option only supported in MKEYED Verb.");
        assert_eq!(diagnostic.property, Some("mode"));
    }
    assert!(diagnostics[0].range.start() < diagnostics[1].range.start());
}

// =============================================================================
// LABELS
// =============================================================================

#[test]
fn test_forward_label_targets() {
    assert_no_diagnostics(LABEL_TARGETS);
}

#[test]
fn test_missing_label_target() {
    let diagnostics = diagnostics_for("seterr handler\nend\n");
    assert_eq!(codes_of(&diagnostics), vec![codes::UNDEFINED_LABEL]);
    assert_eq!(
        &*diagnostics[0].message,
        "Could not resolve reference to label named 'handler'."
    );
}

#[test]
fn test_duplicate_label_has_related_info() {
    let diagnostics = diagnostics_for("top:\nprint 1\ntop:\ngoto top\n");
    assert_eq!(codes_of(&diagnostics), vec![codes::DUPLICATE_LABEL]);
    let related = &diagnostics[0].related;
    assert_eq!(related.len(), 1);
    assert_eq!(&*related[0].message, "first declared here");
    assert!(related[0].range.start() < diagnostics[0].range.start());
}

#[test]
fn test_diagnostics_are_sorted_by_position() {
    let diagnostics = diagnostics_for("goto nowhere\nOPEN (1,bad=1)\"x\"\ngoto gone\n");
    assert_eq!(diagnostics.len(), 3, "{}", render(&diagnostics));
    assert!(diagnostics
        .windows(2)
        .all(|pair| pair[0].range.start() <= pair[1].range.start()));
}

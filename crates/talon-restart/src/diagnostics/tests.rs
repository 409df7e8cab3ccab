use rstest::rstest;
use serde_json::json;

use super::*;

fn error(kind: StartupErrorKind, source_file: Option<&str>, message: &str) -> StartupError {
    StartupError {
        kind,
        source_file: source_file.map(str::to_owned),
        message: message.to_owned(),
    }
}

#[rstest]
#[case::empty("")]
#[case::info_only("2025-01-01 12:00:00.000 INFO loading user scripts\n")]
#[case::lowercase_words("an error and a warning in prose\n")]
fn quiet_logs_produce_no_findings(#[case] text: &str) {
    let diagnostics = parse_startup_log(text);
    assert_eq!(diagnostics.error_count, 0);
    assert_eq!(diagnostics.warning_count, 0);
    assert!(diagnostics.errors.is_empty());
    assert!(diagnostics.warnings.is_empty());
}

#[test]
fn parse_failure_names_file_and_command() {
    let diagnostics = parse_startup_log(
        r#"ERROR Failed to parse TalonScript in "foo.py" for "go to sleep""#,
    );
    assert_eq!(
        diagnostics.errors,
        vec![error(
            StartupErrorKind::Parse,
            Some("foo.py"),
            r#"Failed to parse command "go to sleep""#
        )]
    );
    assert_eq!(diagnostics.error_count, 1);
}

#[test]
fn callback_failure_uses_following_exception_line() {
    let text = concat!(
        "2025 ERROR cb error topic=\"app_launch\" cb=<function on_launch at 0x1>\n",
        "   12:   user/apps.py:40 | on_launch()\n",
        "ValueError: unexpected window title\n",
    );
    let diagnostics = parse_startup_log(text);
    assert_eq!(
        diagnostics.errors,
        vec![error(
            StartupErrorKind::Callback,
            None,
            "ValueError: unexpected window title"
        )]
    );
}

#[test]
fn callback_failure_falls_back_without_exception() {
    let text = concat!(
        "2025 ERROR cb error topic=\"win_focus\" cb=on_focus\n",
        "   1: frame one\n",
        "   2: frame two\n",
        "   3: frame three\n",
        "   4: frame four\n",
        "KeyError: 'too far away'\n",
    );
    let diagnostics = parse_startup_log(text);
    assert_eq!(
        diagnostics.errors,
        vec![error(
            StartupErrorKind::Callback,
            None,
            "win_focus callback error in on_focus"
        )]
    );
}

#[test]
fn generic_errors_skip_frames_and_module_paths() {
    let text = concat!(
        "2025 ERROR could not load user/settings.talon\n",
        "    ERROR indented frame\n",
        "talon/scripting/rctx.py:233 ERROR internal\n",
        "2025 ERROR\n",
    );
    let diagnostics = parse_startup_log(text);
    assert_eq!(
        diagnostics.errors,
        vec![error(
            StartupErrorKind::Other,
            None,
            "could not load user/settings.talon"
        )]
    );
}

#[rstest]
#[case::longer_second(
    "ERROR module foo missing\nERROR module foo missing (while importing bar)\n"
)]
#[case::shorter_second(
    "ERROR module foo missing (while importing bar)\nERROR module foo missing\n"
)]
fn generic_errors_are_substring_deduplicated(#[case] text: &str) {
    let diagnostics = parse_startup_log(text);
    assert_eq!(diagnostics.errors.len(), 1);
    assert!(
        diagnostics
            .errors
            .first()
            .is_some_and(|first| text.starts_with(&format!("ERROR {}", first.message))),
        "first occurrence must be kept: {:?}",
        diagnostics.errors
    );
}

#[test]
fn generic_error_overlapping_parse_failure_is_dropped() {
    let text = concat!(
        "ERROR Failed to parse TalonScript in \"a.talon\" for \"hello\"\n",
        "ERROR Failed to parse command \"hello\"\n",
    );
    let diagnostics = parse_startup_log(text);
    assert_eq!(diagnostics.errors.len(), 1);
}

#[test]
fn summary_counts_are_authoritative() {
    let text = concat!(
        "ERROR first failure\n",
        "[!] 3 error(s) during startup\n",
        "[!] 5 warning(s) during startup\n",
    );
    let diagnostics = parse_startup_log(text);
    assert_eq!(diagnostics.error_count, 3);
    assert_eq!(diagnostics.errors.len(), 1);
    assert_eq!(diagnostics.warning_count, 5);
    assert!(diagnostics.warnings.is_empty());
}

#[test]
fn summary_lines_are_not_itemised() {
    let text = concat!(
        "2025 ERROR [!] 2 error(s) during startup\n",
        "2025 WARNING [!] 1 warning(s) during startup\n",
    );
    let diagnostics = parse_startup_log(text);
    assert!(diagnostics.errors.is_empty());
    assert!(diagnostics.warnings.is_empty());
    assert_eq!(diagnostics.error_count, 2);
    assert_eq!(diagnostics.warning_count, 1);
}

#[rstest]
#[case(
    "WARNING /x.py:42: DeprecationWarning: use y instead",
    StartupWarningKind::Deprecation,
    "use y instead"
)]
#[case(
    "WARNING user/a.py:7: SyntaxWarning: invalid escape sequence '\\d'",
    StartupWarningKind::Syntax,
    "invalid escape sequence '\\d'"
)]
#[case(
    "WARNING user/a.py:7: ResourceWarning: unclosed file",
    StartupWarningKind::Other,
    "ResourceWarning: unclosed file"
)]
fn located_warnings_capture_file_and_line(
    #[case] text: &str,
    #[case] kind: StartupWarningKind,
    #[case] message: &str,
) {
    let diagnostics = parse_startup_log(text);
    let warning = diagnostics.warnings.first().expect("one warning");
    assert_eq!(diagnostics.warnings.len(), 1);
    assert_eq!(warning.kind, kind);
    assert_eq!(warning.message, message);
    assert!(warning.line.is_some());
    assert!(warning.source_file.is_some());
}

#[test]
fn deprecation_warning_matches_reference_shape() {
    let diagnostics = parse_startup_log("WARNING /x.py:42: DeprecationWarning: use y instead");
    assert_eq!(
        diagnostics.warnings,
        vec![StartupWarning {
            kind: StartupWarningKind::Deprecation,
            source_file: Some(String::from("/x.py")),
            line: Some(42),
            message: String::from("use y instead"),
        }]
    );
}

#[test]
fn generic_warnings_are_deduplicated() {
    let text = concat!(
        "2025 WARNING slow import of user/big.py\n",
        "2025 WARNING slow import of user/big.py took 3s\n",
        "2025 WARNING another thing\n",
    );
    let diagnostics = parse_startup_log(text);
    let messages: Vec<&str> = diagnostics
        .warnings
        .iter()
        .map(|warning| warning.message.as_str())
        .collect();
    assert_eq!(messages, vec!["slow import of user/big.py", "another thing"]);
    assert_eq!(diagnostics.warning_count, 2);
}

#[test]
fn error_lines_are_never_warnings() {
    let diagnostics = parse_startup_log("ERROR WARNING both markers\n");
    assert_eq!(diagnostics.errors.len(), 1);
    assert!(diagnostics.warnings.is_empty());
}

#[rstest]
#[case("", false, false)]
#[case("INFO Activating speech engine: w2l\n", true, false)]
#[case("INFO Activating Microphone: \"System Default\"\n", false, true)]
#[case("Activating speech engine\nActivating Microphone\n", true, true)]
fn activation_markers_set_flags(
    #[case] text: &str,
    #[case] speech_engine: bool,
    #[case] microphone: bool,
) {
    let diagnostics = parse_startup_log(text);
    assert_eq!(diagnostics.speech_engine_active, speech_engine);
    assert_eq!(diagnostics.microphone_active, microphone);
}

#[test]
fn parsing_is_idempotent() {
    let text = concat!(
        "ERROR Failed to parse TalonScript in \"a.talon\" for \"x\"\n",
        "WARNING b.py:1: DeprecationWarning: old\n",
        "[!] 1 error(s) during startup\n",
        "Activating speech engine\n",
    );
    assert_eq!(parse_startup_log(text), parse_startup_log(text));
}

#[test]
fn serialises_camel_case_and_skips_absent_fields() {
    let diagnostics = parse_startup_log(concat!(
        "ERROR lost\n",
        "WARNING b.py:1: DeprecationWarning: old\n",
    ));
    let value = serde_json::to_value(&diagnostics).expect("serialise diagnostics");
    assert_eq!(
        value,
        json!({
            "errorCount": 1,
            "warningCount": 1,
            "errors": [{"kind": "other", "message": "lost"}],
            "warnings": [{
                "kind": "deprecation",
                "sourceFile": "b.py",
                "line": 1,
                "message": "old"
            }],
            "speechEngineActive": false,
            "microphoneActive": false
        })
    );
}

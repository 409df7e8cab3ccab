use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{
    StartupDiagnostics, StartupError, StartupErrorKind, StartupWarning, StartupWarningKind,
};

const SPEECH_ENGINE_MARKER: &str = "Activating speech engine";
const MICROPHONE_MARKER: &str = "Activating Microphone";
const HOST_MODULE_PREFIX: &str = "talon/";
const CALLBACK_LOOKAHEAD: usize = 4;

static PATTERNS: Lazy<Patterns> = Lazy::new(Patterns::compile);

struct Patterns {
    parse_failure: Regex,
    callback_failure: Regex,
    exception: Regex,
    located_warning: Regex,
    error_summary: Regex,
    warning_summary: Regex,
}

impl Patterns {
    fn compile() -> Self {
        Self {
            parse_failure: compile(r#"Failed to parse TalonScript in "([^"]*)" for "([^"]*)""#),
            callback_failure: compile(r#"cb error topic="([^"]*)" cb=(.+)$"#),
            exception: compile(r"^\s*[A-Za-z_][\w.]*Error:"),
            located_warning: compile(r"WARNING\s+(.+?):(\d+):\s*(\w*Warning):\s*(.*)$"),
            error_summary: compile(r"\[!\]\s*(\d+)\s+error\(s\)\s+during startup"),
            warning_summary: compile(r"\[!\]\s*(\d+)\s+warning\(s\)\s+during startup"),
        }
    }

    fn is_summary(&self, line: &str) -> bool {
        self.error_summary.is_match(line) || self.warning_summary.is_match(line)
    }
}

#[expect(clippy::expect_used, reason = "patterns are string literals covered by tests")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("startup log pattern must compile")
}

/// Outcome of matching one line against a family of patterns.
enum Verdict<T> {
    /// The line produced a new item.
    Record(T),
    /// The line belongs to this family but adds nothing new.
    Discard,
    /// The line does not belong to this family.
    Unmatched,
}

/// Parses the log text appended during one startup.
///
/// Lines are classified independently, first matching rule wins, and a line
/// that belongs to the error family is never reconsidered as a warning. Lines
/// that match nothing are ignored.
#[must_use]
pub fn parse_startup_log(text: &str) -> StartupDiagnostics {
    let patterns = &*PATTERNS;
    let lines: Vec<&str> = text.lines().collect();
    let mut errors: Vec<StartupError> = Vec::new();
    let mut warnings: Vec<StartupWarning> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let following = lines.get(index + 1..).unwrap_or_default();
        match classify_error(patterns, line, following, &errors) {
            Verdict::Record(error) => {
                errors.push(error);
                continue;
            }
            Verdict::Discard => continue,
            Verdict::Unmatched => {}
        }
        if let Verdict::Record(warning) = classify_warning(patterns, line, &warnings) {
            warnings.push(warning);
        }
    }

    StartupDiagnostics {
        error_count: last_count(&patterns.error_summary, text).unwrap_or(errors.len()),
        warning_count: last_count(&patterns.warning_summary, text).unwrap_or(warnings.len()),
        errors,
        warnings,
        speech_engine_active: text.contains(SPEECH_ENGINE_MARKER),
        microphone_active: text.contains(MICROPHONE_MARKER),
    }
}

fn classify_error(
    patterns: &Patterns,
    line: &str,
    following: &[&str],
    recorded: &[StartupError],
) -> Verdict<StartupError> {
    if let Some(captures) = patterns.parse_failure.captures(line) {
        return Verdict::Record(StartupError {
            kind: StartupErrorKind::Parse,
            source_file: Some(group(&captures, 1).to_owned()),
            message: format!("Failed to parse command \"{}\"", group(&captures, 2)),
        });
    }

    if let Some(captures) = patterns.callback_failure.captures(line) {
        let message = following
            .iter()
            .take(CALLBACK_LOOKAHEAD)
            .find(|candidate| patterns.exception.is_match(candidate))
            .map_or_else(
                || {
                    format!(
                        "{} callback error in {}",
                        group(&captures, 1),
                        group(&captures, 2).trim()
                    )
                },
                |exception| exception.trim().to_owned(),
            );
        return Verdict::Record(StartupError {
            kind: StartupErrorKind::Callback,
            source_file: None,
            message,
        });
    }

    let Some((_, rest)) = line.split_once("ERROR") else {
        return Verdict::Unmatched;
    };
    if patterns.is_summary(line) || is_stack_frame(line) {
        return Verdict::Discard;
    }
    let message = marker_text(rest);
    if message.is_empty() || overlaps(recorded.iter().map(|error| error.message.as_str()), message)
    {
        return Verdict::Discard;
    }
    Verdict::Record(StartupError {
        kind: StartupErrorKind::Other,
        source_file: None,
        message: message.to_owned(),
    })
}

fn classify_warning(
    patterns: &Patterns,
    line: &str,
    recorded: &[StartupWarning],
) -> Verdict<StartupWarning> {
    if let Some(captures) = patterns.located_warning.captures(line) {
        let name = group(&captures, 3);
        let text = group(&captures, 4).trim();
        let (kind, message) = match name {
            "SyntaxWarning" => (StartupWarningKind::Syntax, text.to_owned()),
            "DeprecationWarning" => (StartupWarningKind::Deprecation, text.to_owned()),
            _ => (StartupWarningKind::Other, format!("{name}: {text}")),
        };
        return Verdict::Record(StartupWarning {
            kind,
            source_file: Some(group(&captures, 1).to_owned()),
            line: group(&captures, 2).parse().ok(),
            message,
        });
    }

    let Some((_, rest)) = line.split_once("WARNING") else {
        return Verdict::Unmatched;
    };
    if patterns.is_summary(line) {
        return Verdict::Discard;
    }
    let message = marker_text(rest);
    if message.is_empty()
        || overlaps(recorded.iter().map(|warning| warning.message.as_str()), message)
    {
        return Verdict::Discard;
    }
    Verdict::Record(StartupWarning {
        kind: StartupWarningKind::Other,
        source_file: None,
        line: None,
        message: message.to_owned(),
    })
}

fn group<'t>(captures: &Captures<'t>, index: usize) -> &'t str {
    captures.get(index).map_or("", |found| found.as_str())
}

fn is_stack_frame(line: &str) -> bool {
    line.starts_with([' ', '\t']) || line.starts_with(HOST_MODULE_PREFIX)
}

fn marker_text(rest: &str) -> &str {
    rest.trim_start().trim_start_matches(':').trim()
}

/// Whether `candidate` contains, or is contained by, any recorded message.
fn overlaps<'a>(mut recorded: impl Iterator<Item = &'a str>, candidate: &str) -> bool {
    recorded.any(|existing| existing.contains(candidate) || candidate.contains(existing))
}

/// Count from the last summary line matching `pattern`.
fn last_count(pattern: &Regex, text: &str) -> Option<usize> {
    pattern
        .captures_iter(text)
        .filter_map(|captures| group(&captures, 1).parse().ok())
        .last()
}

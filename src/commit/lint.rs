//! Advisory checks on a generated commit message.
//!
//! Backends do not always follow the formatting instructions. These checks
//! are shown to the user before confirmation and never block a commit.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Subject lines longer than this are flagged.
pub const MAX_SUBJECT_CHARS: usize = 50;

const KNOWN_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci", "chore", "revert",
];

// Pattern: type(scope)!: description
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]+)\))?(!)?:\s+\S").expect("header pattern is valid")
});

/// Something worth pointing out about a generated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    Empty,
    NotConventional,
    UnknownType(String),
    SubjectTooLong(usize),
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintWarning::Empty => write!(f, "message is empty"),
            LintWarning::NotConventional => {
                write!(f, "subject does not follow `type(scope): description`")
            }
            LintWarning::UnknownType(ty) => write!(f, "unknown commit type '{}'", ty),
            LintWarning::SubjectTooLong(len) => write!(
                f,
                "subject is {} characters (limit {})",
                len, MAX_SUBJECT_CHARS
            ),
        }
    }
}

/// Check the subject line of `message`.
pub fn lint_message(message: &str) -> Vec<LintWarning> {
    let subject = message.lines().next().unwrap_or("").trim();
    if subject.is_empty() {
        return vec![LintWarning::Empty];
    }

    let mut warnings = Vec::new();

    match HEADER.captures(subject) {
        Some(caps) => {
            let ty = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            if !KNOWN_TYPES.contains(&ty) {
                warnings.push(LintWarning::UnknownType(ty.to_string()));
            }
        }
        None => warnings.push(LintWarning::NotConventional),
    }

    let len = subject.chars().count();
    if len > MAX_SUBJECT_CHARS {
        warnings.push(LintWarning::SubjectTooLong(len));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_messages() {
        assert!(lint_message("feat: add login").is_empty());
        assert!(lint_message("fix(auth): correct null check").is_empty());
        assert!(lint_message("feat(api)!: drop v1 endpoints").is_empty());
        assert!(lint_message("docs: update readme\n\nLonger body text that may well exceed fifty characters.").is_empty());
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(lint_message("   \n"), vec![LintWarning::Empty]);
    }

    #[test]
    fn test_not_conventional() {
        assert_eq!(
            lint_message("Updated some files"),
            vec![LintWarning::NotConventional]
        );
        assert_eq!(
            lint_message("feat:missing space"),
            vec![LintWarning::NotConventional]
        );
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            lint_message("feature: add login"),
            vec![LintWarning::UnknownType("feature".to_string())]
        );
    }

    #[test]
    fn test_long_subject() {
        let subject = "feat(auth): add two-factor authentication support for users";
        let warnings = lint_message(subject);
        assert_eq!(
            warnings,
            vec![LintWarning::SubjectTooLong(subject.chars().count())]
        );
        assert!(warnings[0].to_string().contains("limit 50"));
    }

    #[test]
    fn test_subject_of_exactly_fifty_chars_passes() {
        let subject = format!("fix: {}", "a".repeat(45));
        assert_eq!(subject.len(), 50);
        assert!(lint_message(&subject).is_empty());
    }
}

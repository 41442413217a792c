//! Prompt construction for AI-generated commit messages.

/// Instructions placed before the diff.
const PREAMBLE: &str = r#"You are an expert at writing clear, concise git commit messages. Based on the git diff provided, generate a commit message that follows these guidelines:

1. Use the conventional commit format: type(scope): description
2. Types: feat, fix, docs, style, refactor, test, chore
3. Keep the first line under 50 characters
4. Use imperative mood ("add" not "added")
5. Be specific about what changed and why

Git diff:
"#;

/// Label introducing user-supplied context.
pub const CONTEXT_LABEL: &str = "Additional context from user: ";

/// Closing instruction placed after the diff and context.
const TRAILER: &str = "Generate only the commit message, no additional text or explanation.";

/// Build the LLM prompt for generating a commit message.
///
/// The diff is included verbatim. `context` is appended under its own label
/// only when it is non-empty.
pub fn build_commit_prompt(diff: &str, context: Option<&str>) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + diff.len() + TRAILER.len() + 64);
    prompt.push_str(PREAMBLE);
    prompt.push_str(diff);

    if let Some(context) = context.filter(|c| !c.is_empty()) {
        prompt.push_str("\n\n");
        prompt.push_str(CONTEXT_LABEL);
        prompt.push_str(context);
    }

    prompt.push_str("\n\n");
    prompt.push_str(TRAILER);
    prompt
}

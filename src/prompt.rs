/// Instructions placed ahead of the diff in every request
pub const SYSTEM_PROMPT: &str = r#"
You write git commit messages. Read the diff below, which lists only the lines that were added (+) or removed (-) in the working tree, and describe what the change does.

Guidelines:
1. Use clear, concise language.
2. State the purpose and effect of the change (bug fix, new feature, optimization, refactor, ...).
3. Follow common commit conventions: imperative mood, subject line under 50 characters.
4. Leave out unnecessary detail and jargon.

Return the commit message as a JSON object of this form:
{
    "commitMessage": "Your commit message here"
}
"#;

/// Build the prompt sent to the completion endpoint.
///
/// No escaping or truncation is applied to `diffs`.
pub fn build_prompt(diffs: &str) -> String {
   format!("{SYSTEM_PROMPT}\n\n{diffs}")
}

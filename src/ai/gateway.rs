//! Solver gateway contract.

use futures::future::BoxFuture;

/// Shown when the service answers with no text.
pub const EMPTY_ANSWER: &str = "Sorry, I couldn't solve that.";

/// Shown when the service cannot be reached, errors, or times out.
pub const CONNECTION_ERROR: &str = "Error connecting to AI. Check your connection.";

/// Shown when no API key is configured.
pub const NOT_CONFIGURED: &str = "AI solver is not configured.";

/// Answers free-text math questions.
///
/// Never fails: every outcome, including transport errors, is reported as
/// text suitable for the display.
pub trait SolverGateway: Send + Sync {
    fn solve<'a>(&'a self, query: &'a str) -> BoxFuture<'a, String>;
}

/// Build the prompt sent for `query`.
pub fn build_prompt(query: &str) -> String {
    format!(
        "Solve this math problem or explain this expression: \"{}\". Keep the answer concise and clear, ideally just the result if it's a simple calculation, or a brief explanation if it's a word problem.",
        query
    )
}

/// Normalize a raw answer: trimmed text, or [`EMPTY_ANSWER`] when blank.
pub fn answer_or_fallback(text: Option<String>) -> String {
    match text.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => EMPTY_ANSWER.to_string(),
    }
}

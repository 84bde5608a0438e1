#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use async_openai::types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs};
use tracing::warn;

use crate::error::PromptError;

/// A single-turn prompt for the completion service: the grading criteria and
/// the student's combined submission flattened into one user message.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// The flattened, newline-escaped message text.
    content:  String,
    /// The wire representation expected by the chat completion endpoint.
    messages: Vec<ChatCompletionRequestMessage>,
}

impl Prompt {
    /// Returns the flattened message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the chat messages for this prompt.
    pub fn messages(&self) -> &[ChatCompletionRequestMessage] {
        &self.messages
    }

    /// Consumes the prompt and returns the chat messages.
    pub fn into_messages(self) -> Vec<ChatCompletionRequestMessage> {
        self.messages
    }
}

/// Escapes literal newlines so the payload flattens to one transportable
/// line, then trims surrounding whitespace.
pub fn flatten(criteria: &str, content: &str) -> String {
    let combined = format!("{criteria}\n{content}");
    combined.replace('\n', "\\n").trim().to_string()
}

/// Reverses [`flatten`]'s newline escaping.
pub fn unflatten(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Truncates content to at most `max_chars` characters, on a char boundary.
///
/// The original tool put no bound on submission size; oversized content is
/// truncated with a warning rather than failing the student.
fn clamp_content(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            warn!("Submission content exceeds {max_chars} characters, truncating");
            &content[..idx]
        }
        None => content,
    }
}

/// Builds the single-turn prompt sent to the completion service.
///
/// Deterministic for a given criteria/content pair. A failure here is
/// recoverable at the student boundary: the orchestrator logs it, records a
/// failure note, and continues with the next student.
///
/// `EmptyMessage` can only occur when both inputs flatten to nothing, which
/// requires criteria and content to be empty or whitespace without any
/// newlines (escaped newlines survive the trim). The orchestrator records
/// empty combined content as "no submission" before building a prompt, so
/// this error is reachable only by direct callers of this function.
pub fn build_prompt(
    criteria: &str,
    content: &str,
    max_content_chars: usize,
) -> Result<Prompt, PromptError> {
    let content = clamp_content(content, max_content_chars);
    let flattened = flatten(criteria, content);
    if flattened.is_empty() {
        return Err(PromptError::EmptyMessage);
    }

    let message = ChatCompletionRequestUserMessageArgs::default()
        .content(flattened.as_str())
        .build()
        .map_err(|err| PromptError::Message(err.to_string()))?
        .into();

    Ok(Prompt {
        content:  flattened,
        messages: vec![message],
    })
}

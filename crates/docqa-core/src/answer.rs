//! Prompt assembly and answer generation

use crate::embeddings::Embedder;
use crate::error::{BackendError, RetrievalError};
use crate::index::EmbeddingIndex;
use crate::llm::LlmClient;
use crate::models::Chunk;
use crate::retrieval::{join_context, VectorRetriever};
use tracing::info;

/// Characters of context or document text placed in a prompt
pub const MAX_PROMPT_CHARS: usize = 18_000;
/// Characters of joined chunk text handed to [`summarize`]
pub const MAX_SUMMARY_INPUT_CHARS: usize = 30_000;

/// Longest prefix of `text` with at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn qa_prompt(question: &str, context: &str) -> String {
    format!(
        r#"Answer the question **only** using the provided context. Start with a short answer,
then show 2-4 quoted snippets as evidence (with page/chunk cues if available).
If the answer isn't in the context, say you can't find it.

Question:
{}

Context:
"""{}"""
"#,
        question,
        truncate_chars(context, MAX_PROMPT_CHARS)
    )
}

pub fn summary_prompt(document: &str) -> String {
    format!(
        r#"You are a financial analyst. Summarize the following document into crisp bullet points.
Be specific with numbers, trends, and risks. Keep to 6-10 bullets.

Document:
"""{}"""
"#,
        truncate_chars(document, MAX_PROMPT_CHARS)
    )
}

/// Chunk contents joined by newlines, capped for summarisation
pub fn summary_input(chunks: &[Chunk]) -> String {
    let joined = chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    truncate_chars(&joined, MAX_SUMMARY_INPUT_CHARS).to_string()
}

pub fn answer(llm: &dyn LlmClient, question: &str, context: &str) -> Result<String, BackendError> {
    Ok(llm.generate(&qa_prompt(question, context))?.trim().to_string())
}

pub fn summarize(llm: &dyn LlmClient, chunks: &[Chunk]) -> Result<String, BackendError> {
    let document = summary_input(chunks);
    info!("summarizing {} chars from {} chunks", document.chars().count(), chunks.len());
    Ok(llm.generate(&summary_prompt(&document))?.trim().to_string())
}

/// Retrieve `k` chunks from `index` for `query`, then answer from them.
pub fn ask_with_retrieval(
    query: &str,
    index: &EmbeddingIndex,
    embedder: &dyn Embedder,
    llm: &dyn LlmClient,
    k: usize,
) -> Result<String, RetrievalError> {
    let top = VectorRetriever::new(index, embedder).retrieve(query, k)?;
    let context = join_context(&top);
    Ok(answer(llm, query, &context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashingEmbedder;
    use std::sync::Mutex;

    /// Records prompts and replies with a fixed answer
    struct RecordingLlm {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingLlm {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    impl LlmClient for RecordingLlm {
        fn generate(&self, prompt: &str) -> Result<String, BackendError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn qa_prompt_caps_context() {
        let context = "§".repeat(MAX_PROMPT_CHARS + 500);
        let prompt = qa_prompt("What grew?", &context);
        assert!(prompt.contains("Question:\nWhat grew?"));
        assert_eq!(prompt.matches('§').count(), MAX_PROMPT_CHARS);
    }

    #[test]
    fn summary_input_is_capped() {
        let chunks: Vec<Chunk> = (0..400).map(|_| Chunk::from("y".repeat(100))).collect();
        assert_eq!(summary_input(&chunks).chars().count(), MAX_SUMMARY_INPUT_CHARS);
    }

    #[test]
    fn answer_trims_reply() {
        let llm = RecordingLlm::new("  Twelve percent.  \n");
        assert_eq!(answer(&llm, "q", "ctx").unwrap(), "Twelve percent.");
        assert!(llm.last_prompt().contains("\"\"\"ctx\"\"\""));
    }

    #[test]
    fn summarize_uses_analyst_prompt() {
        let llm = RecordingLlm::new("- bullet");
        let chunks = vec![Chunk::from("Revenue grew."), Chunk::from("Costs fell.")];
        assert_eq!(summarize(&llm, &chunks).unwrap(), "- bullet");
        let prompt = llm.last_prompt();
        assert!(prompt.starts_with("You are a financial analyst."));
        assert!(prompt.contains("Revenue grew.\nCosts fell."));
    }

    #[test]
    fn ask_with_retrieval_grounds_on_index() {
        let chunks: Vec<Chunk> = ["Revenue grew 12% in Q3.", "The weather was mild."]
            .into_iter()
            .map(Chunk::from)
            .collect();
        let embedder = HashingEmbedder::new(64);
        let index = EmbeddingIndex::build(&chunks, &embedder, 8).unwrap();
        let llm = RecordingLlm::new("12%");

        let reply = ask_with_retrieval("Revenue grew 12% in Q3.", &index, &embedder, &llm, 1).unwrap();
        assert_eq!(reply, "12%");
        let prompt = llm.last_prompt();
        assert!(prompt.contains("Revenue grew 12% in Q3."));
        assert!(!prompt.contains("weather"));
    }
}

//! Question-to-context retrieval
//!
//! Two independent strategies produce the same shape of result: a context
//! string for the prompt plus the chunks behind it, best first.
//! [`lexical`] ranks an in-memory chunk list by keyword overlap;
//! [`vector`] queries a persisted [`EmbeddingIndex`](crate::index::EmbeddingIndex).

pub mod lexical;
pub mod vector;

pub use lexical::{pick_context, score_chunk, LexicalRetriever, ScoredChunk};
pub use vector::{get_top_k_docs, VectorRetriever};

use crate::models::Chunk;

/// Separator placed between chunks in a prompt context
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Join already-selected texts into one context string
pub fn join_context<I, S>(texts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, text) in texts.into_iter().enumerate() {
        if i > 0 {
            joined.push_str(CONTEXT_SEPARATOR);
        }
        joined.push_str(text.as_ref());
    }
    joined
}

/// Result of a retrieval: prompt context and the chunks it was built from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetrievedContext<'a> {
    pub context: String,
    pub selected: Vec<&'a Chunk>,
}

impl<'a> RetrievedContext<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_uses_separator() {
        assert_eq!(join_context(["a", "b"]), "a\n\n---\n\nb");
        assert_eq!(join_context(Vec::<String>::new()), "");
    }
}

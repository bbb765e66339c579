use super::{join_context, RetrievedContext};
use crate::models::Chunk;
use docqa_config::RetrievalConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Characters of text that earn the full length prior
const LENGTH_PRIOR_SCALE: f64 = 8000.0;
const MAX_LENGTH_PRIOR: f64 = 0.5;

pub const DEFAULT_TOP_K: usize = 4;

/// Lowercase word tokens, with repetition
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn question_terms(question: &str) -> HashSet<String> {
    tokenize(question).into_iter().collect()
}

/// Keyword hits plus a small length prior, so that short fragments do not
/// outrank fuller passages when hits tie.
pub fn score_chunk(text: &str, terms: &HashSet<String>) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let lower = text.to_lowercase();
    let hits = WORD
        .find_iter(&lower)
        .filter(|m| terms.contains(m.as_str()))
        .count();
    let length_prior = (text.chars().count() as f64 / LENGTH_PRIOR_SCALE).min(MAX_LENGTH_PRIOR);
    hits as f64 + length_prior
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredChunk<'a> {
    pub score: f64,
    pub chunk: &'a Chunk,
}

/// Score every non-blank chunk, best first. Equal scores keep input order.
pub fn rank<'a>(chunks: &'a [Chunk], question: &str) -> Vec<ScoredChunk<'a>> {
    let terms = question_terms(question);
    let mut scored: Vec<ScoredChunk<'a>> = chunks
        .iter()
        .filter(|c| !c.text().is_empty())
        .map(|chunk| ScoredChunk {
            score: score_chunk(chunk.text(), &terms),
            chunk,
        })
        .collect();
    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Pick the `top_k` best chunks for `question` and join them into a context.
///
/// A `top_k` of zero still selects one chunk. When no chunk has text the
/// result is empty rather than an error.
pub fn pick_context<'a>(chunks: &'a [Chunk], question: &str, top_k: usize) -> RetrievedContext<'a> {
    let scored = rank(chunks, question);
    if scored.is_empty() {
        return RetrievedContext::empty();
    }

    let selected: Vec<&Chunk> = scored
        .iter()
        .take(top_k.max(1))
        .map(|s| s.chunk)
        .collect();
    debug!(
        "selected {} of {} chunks (best score {:.3})",
        selected.len(),
        scored.len(),
        scored[0].score
    );

    RetrievedContext {
        context: join_context(selected.iter().map(|c| c.text())),
        selected,
    }
}

/// Keyword-overlap retriever over an in-memory chunk list
#[derive(Debug, Clone, Copy)]
pub struct LexicalRetriever {
    top_k: usize,
}

impl Default for LexicalRetriever {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl LexicalRetriever {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.top_k)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn retrieve<'a>(&self, chunks: &'a [Chunk], question: &str) -> RetrievedContext<'a> {
        pick_context(chunks, question, self.top_k)
    }
}

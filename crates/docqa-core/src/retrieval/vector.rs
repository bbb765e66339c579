use super::{join_context, RetrievedContext};
use crate::embeddings::Embedder;
use crate::error::RetrievalError;
use crate::index::{EmbeddingIndex, SearchHit};
use tracing::{debug, warn};

pub const DEFAULT_VECTOR_TOP_K: usize = 3;

/// Dense retrieval over a loaded [`EmbeddingIndex`]
pub struct VectorRetriever<'a> {
    index: &'a EmbeddingIndex,
    embedder: &'a dyn Embedder,
}

impl<'a> VectorRetriever<'a> {
    /// `embedder` should be the one the index was built with; a different
    /// model id is only warned about.
    pub fn new(index: &'a EmbeddingIndex, embedder: &'a dyn Embedder) -> Self {
        if index.model_id() != embedder.model_id() {
            warn!(
                "index was built with '{}' but queries use '{}'; similarities may be meaningless",
                index.model_id(),
                embedder.model_id()
            );
        }
        Self { index, embedder }
    }

    pub fn retrieve_hits(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit<'a>>, RetrievalError> {
        let vector = self.embedder.embed_query(query)?;
        let hits = self.index.search(&vector, top_k)?;
        debug!("vector search returned {} hits", hits.len());
        Ok(hits)
    }

    /// Contents of the `top_k` nearest chunks, best first
    pub fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, RetrievalError> {
        Ok(self
            .retrieve_hits(query, top_k)?
            .into_iter()
            .map(|hit| hit.chunk.content.clone())
            .collect())
    }

    pub fn retrieve_context(&self, query: &str, top_k: usize) -> Result<RetrievedContext<'a>, RetrievalError> {
        let selected: Vec<_> = self
            .retrieve_hits(query, top_k)?
            .into_iter()
            .map(|hit| hit.chunk)
            .collect();
        Ok(RetrievedContext {
            context: join_context(selected.iter().map(|c| c.content.as_str())),
            selected,
        })
    }
}

/// Page contents of the `k` chunks closest to `query`
pub fn get_top_k_docs(
    query: &str,
    index: &EmbeddingIndex,
    embedder: &dyn Embedder,
    k: usize,
) -> Result<Vec<String>, RetrievalError> {
    VectorRetriever::new(index, embedder).retrieve(query, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::HashingEmbedder;
    use crate::error::{BackendError, IndexError};
    use crate::models::Chunk;

    struct FailingEmbedder;

    impl Embedder for FailingEmbedder {
        fn model_id(&self) -> &str {
            "hashing-64"
        }

        fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
            Err(BackendError::configuration("test", "offline"))
        }
    }

    fn index() -> EmbeddingIndex {
        let chunks: Vec<Chunk> = [
            "Revenue grew 12% in Q3.",
            "The weather was mild.",
            "Headcount stayed flat.",
        ]
        .into_iter()
        .map(Chunk::from)
        .collect();
        EmbeddingIndex::build(&chunks, &HashingEmbedder::new(64), 8).unwrap()
    }

    #[test]
    fn exact_content_is_top_hit() {
        let index = index();
        let embedder = HashingEmbedder::new(64);
        let docs = get_top_k_docs("The weather was mild.", &index, &embedder, 3).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0], "The weather was mild.");
    }

    #[test]
    fn context_joins_hits() {
        let index = index();
        let embedder = HashingEmbedder::new(64);
        let ctx = VectorRetriever::new(&index, &embedder)
            .retrieve_context("Headcount stayed flat.", 1)
            .unwrap();
        assert_eq!(ctx.context, "Headcount stayed flat.");
        assert_eq!(ctx.selected.len(), 1);
    }

    #[test]
    fn backend_errors_pass_through() {
        let index = index();
        let err = get_top_k_docs("q", &index, &FailingEmbedder, 3).unwrap_err();
        assert!(matches!(err, RetrievalError::Backend(BackendError::Configuration { .. })));
    }

    #[test]
    fn dimension_mismatch_surfaces() {
        let index = index();
        let err = get_top_k_docs("q", &index, &HashingEmbedder::new(32), 3).unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::Index(IndexError::DimensionMismatch { .. })
        ));
    }
}

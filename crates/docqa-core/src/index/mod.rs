//! Persisted embedding index
//!
//! An index directory holds two artifacts:
//! - `index.vectors`: bincode-encoded model id, dimension, corpus fingerprint and vectors
//! - `index.docstore`: JSON array of the indexed chunks, in vector order
//!
//! Both are plain data. Indexes are expected to come from locations the
//! operator controls; nothing executable is ever decoded.

use crate::embeddings::{cosine_similarity, Embedder};
use crate::error::{BackendError, IndexError, RetrievalError};
use crate::models::Chunk;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const VECTORS_FILE: &str = "index.vectors";
pub const DOCSTORE_FILE: &str = "index.docstore";
pub const ARTIFACTS: [&str; 2] = [VECTORS_FILE, DOCSTORE_FILE];

const DEFAULT_BATCH_SIZE: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct VectorArtifact {
    model_id: String,
    dimension: usize,
    corpus_hash: String,
    vectors: Vec<Vec<f32>>,
}

/// One search result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub score: f32,
    pub chunk: &'a Chunk,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingIndex {
    model_id: String,
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    documents: Vec<Chunk>,
}

impl EmbeddingIndex {
    /// Embed every chunk with `embedder`, `batch_size` texts per call.
    /// Blank chunks are not indexed.
    pub fn build(
        chunks: &[Chunk],
        embedder: &dyn Embedder,
        batch_size: usize,
    ) -> Result<Self, RetrievalError> {
        let documents: Vec<Chunk> = chunks
            .iter()
            .filter(|c| !c.text().is_empty())
            .cloned()
            .collect();
        if documents.is_empty() {
            return Err(IndexError::EmptyCorpus.into());
        }

        let batch_size = if batch_size == 0 {
            DEFAULT_BATCH_SIZE
        } else {
            batch_size
        };

        let mut vectors = Vec::with_capacity(documents.len());
        for batch in documents.chunks(batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
            let embedded = embedder.embed(&texts)?;
            if embedded.len() != texts.len() {
                return Err(BackendError::malformed(
                    "embedder",
                    format!("got {} vectors for {} texts", embedded.len(), texts.len()),
                )
                .into());
            }
            vectors.extend(embedded);
            debug!("embedded {}/{} chunks", vectors.len(), documents.len());
        }

        let dimension = vectors[0].len();
        if dimension == 0 {
            return Err(BackendError::malformed("embedder", "zero-length vector").into());
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            }
            .into());
        }

        info!(
            "built index of {} chunks ({} dims, model {})",
            documents.len(),
            dimension,
            embedder.model_id()
        );
        Ok(Self {
            model_id: embedder.model_id().to_string(),
            dimension,
            vectors,
            documents,
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Chunk] {
        &self.documents
    }

    /// Top `k` chunks by cosine similarity to `query`, best first.
    /// Equal similarities keep insertion order.
    ///
    /// `k` is clamped to at least one, as the lexical retriever clamps `top_k`,
    /// so a zero from config or the CLI still yields the best match instead of
    /// an empty evidence list.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit<'_>>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .vectors
            .iter()
            .zip(&self.documents)
            .map(|(vector, chunk)| SearchHit {
                score: cosine_similarity(query, vector),
                chunk,
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k.max(1));
        Ok(hits)
    }

    pub fn save(&self, dir: &Path) -> Result<(), IndexError> {
        fs::create_dir_all(dir).map_err(|source| IndexError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let artifact = VectorArtifact {
            model_id: self.model_id.clone(),
            dimension: self.dimension,
            corpus_hash: corpus_hash(&self.documents),
            vectors: self.vectors.clone(),
        };
        let vectors = bincode::serialize(&artifact).map_err(|e| IndexError::Encode {
            artifact: VECTORS_FILE.to_string(),
            message: e.to_string(),
        })?;
        let docstore = serde_json::to_vec_pretty(&self.documents).map_err(|e| IndexError::Encode {
            artifact: DOCSTORE_FILE.to_string(),
            message: e.to_string(),
        })?;

        write_artifact(dir, VECTORS_FILE, &vectors)?;
        write_artifact(dir, DOCSTORE_FILE, &docstore)?;
        info!("saved index of {} chunks to {}", self.len(), dir.display());
        Ok(())
    }

    /// Load an index saved by [`EmbeddingIndex::save`]. Both artifacts must
    /// be present before anything is read.
    pub fn load(dir: &Path) -> Result<Self, IndexError> {
        if !dir.is_dir() {
            return Err(IndexError::NotFound(dir.to_path_buf()));
        }
        let missing: Vec<String> = ARTIFACTS
            .iter()
            .filter(|name| !dir.join(name).is_file())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IndexError::MissingArtifacts {
                dir: dir.to_path_buf(),
                missing,
            });
        }

        let corrupt = |message: String| IndexError::Corrupt {
            dir: dir.to_path_buf(),
            message,
        };

        let vector_bytes = read_artifact(dir, VECTORS_FILE)?;
        let artifact: VectorArtifact = bincode::deserialize(&vector_bytes)
            .map_err(|e| corrupt(format!("{}: {}", VECTORS_FILE, e)))?;
        let docstore_bytes = read_artifact(dir, DOCSTORE_FILE)?;
        let documents: Vec<Chunk> = serde_json::from_slice(&docstore_bytes)
            .map_err(|e| corrupt(format!("{}: {}", DOCSTORE_FILE, e)))?;

        if artifact.vectors.len() != documents.len() {
            return Err(corrupt(format!(
                "{} vectors but {} documents",
                artifact.vectors.len(),
                documents.len()
            )));
        }
        if artifact.vectors.iter().any(|v| v.len() != artifact.dimension) {
            return Err(corrupt(format!(
                "vector dimension differs from recorded {}",
                artifact.dimension
            )));
        }
        if artifact.corpus_hash != corpus_hash(&documents) {
            return Err(corrupt("docstore does not match vectors".to_string()));
        }

        info!(
            "loaded index of {} chunks from {}",
            documents.len(),
            dir.display()
        );
        Ok(Self {
            model_id: artifact.model_id,
            dimension: artifact.dimension,
            vectors: artifact.vectors,
            documents,
        })
    }
}

fn corpus_hash(documents: &[Chunk]) -> String {
    let mut hasher = Sha256::new();
    for doc in documents {
        hasher.update(doc.content.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> Result<(), IndexError> {
    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|source| IndexError::Io { path, source })
}

fn read_artifact(dir: &Path, name: &str) -> Result<Vec<u8>, IndexError> {
    let path = dir.join(name);
    fs::read(&path).map_err(|source| IndexError::Io { path, source })
}

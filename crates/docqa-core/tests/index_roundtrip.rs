use docqa_core::embeddings::{Embedder, HashingEmbedder};
use docqa_core::error::IndexError;
use docqa_core::index::{EmbeddingIndex, DOCSTORE_FILE, VECTORS_FILE};
use docqa_core::models::{Chunk, ChunkMetadata};
use docqa_core::retrieval::{get_top_k_docs, VectorRetriever};
use std::fs;
use tempfile::tempdir;

fn chunks() -> Vec<Chunk> {
    [
        ("Revenue grew 12% in Q3.", 1, 0),
        ("The weather was mild.", 1, 1),
        ("Operating margin improved to 18%.", 2, 0),
        ("Headcount stayed flat year over year.", 3, 0),
    ]
    .into_iter()
    .map(|(text, page, idx)| {
        Chunk::new(
            text,
            ChunkMetadata {
                source: Some("budget.pdf".into()),
                page_number: Some(page),
                chunk_index: Some(idx),
                ..Default::default()
            },
        )
    })
    .collect()
}

#[test]
fn save_load_keeps_top_hit() {
    let dir = tempdir().unwrap();
    let embedder = HashingEmbedder::new(128);
    let index = EmbeddingIndex::build(&chunks(), &embedder, 2).unwrap();

    let query = "Operating margin improved to 18%.";
    let before = get_top_k_docs(query, &index, &embedder, 3).unwrap();

    index.save(dir.path()).unwrap();
    let loaded = EmbeddingIndex::load(dir.path()).unwrap();
    assert_eq!(loaded, index);

    let after = get_top_k_docs(query, &loaded, &embedder, 3).unwrap();
    assert_eq!(after[0], query);
    assert_eq!(before, after);
}

#[test]
fn metadata_survives_persistence() {
    let dir = tempdir().unwrap();
    let embedder = HashingEmbedder::new(64);
    EmbeddingIndex::build(&chunks(), &embedder, 8)
        .unwrap()
        .save(dir.path())
        .unwrap();

    let loaded = EmbeddingIndex::load(dir.path()).unwrap();
    let hits = VectorRetriever::new(&loaded, &embedder)
        .retrieve_hits("Headcount stayed flat year over year.", 1)
        .unwrap();
    let meta = &hits[0].chunk.metadata;
    assert_eq!(meta.source.as_deref(), Some("budget.pdf"));
    assert_eq!(meta.page_number, Some(3));
    assert_eq!(meta.chunk_index, Some(0));
}

#[test]
fn missing_docstore_is_named() {
    let dir = tempdir().unwrap();
    EmbeddingIndex::build(&chunks(), &HashingEmbedder::new(32), 8)
        .unwrap()
        .save(dir.path())
        .unwrap();
    fs::remove_file(dir.path().join(DOCSTORE_FILE)).unwrap();

    let err = EmbeddingIndex::load(dir.path()).unwrap_err();
    match &err {
        IndexError::MissingArtifacts { missing, .. } => {
            assert_eq!(missing, &vec![DOCSTORE_FILE.to_string()])
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains(DOCSTORE_FILE));
}

#[test]
fn empty_dir_names_both_artifacts() {
    let dir = tempdir().unwrap();
    let err = EmbeddingIndex::load(dir.path()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains(VECTORS_FILE));
    assert!(msg.contains(DOCSTORE_FILE));
}

#[test]
fn model_id_is_persisted() {
    let dir = tempdir().unwrap();
    let embedder = HashingEmbedder::new(48);
    EmbeddingIndex::build(&chunks(), &embedder, 8)
        .unwrap()
        .save(dir.path())
        .unwrap();
    let loaded = EmbeddingIndex::load(dir.path()).unwrap();
    assert_eq!(loaded.model_id(), embedder.model_id());
    assert_eq!(loaded.dimension(), 48);
    assert_eq!(loaded.len(), 4);
}

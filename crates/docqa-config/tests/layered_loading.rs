use docqa_config::{
    Config, ConfigBuilder, ConfigError, EmbeddingBackend, ErrorFormatter, LlmProvider,
    RetrievalMode,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn toml_file_overrides_defaults() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("docqa.toml");
    fs::write(
        &path,
        r#"
[retrieval]
mode = "vector"
vector_top_k = 5

[embedding]
backend = "hashing"
dimensions = 256

[llm]
provider = "ollama"
model = "llama3"

[storage]
index_dir = "/tmp/docqa-index"
"#,
    )?;

    let config = ConfigBuilder::new().with_file(&path).build()?;

    assert_eq!(config.retrieval.mode, RetrievalMode::Vector);
    assert_eq!(config.retrieval.vector_top_k, 5);
    assert_eq!(config.retrieval.top_k, 4);
    assert_eq!(config.embedding.backend, EmbeddingBackend::Hashing);
    assert_eq!(config.embedding.dimensions, 256);
    assert_eq!(config.llm.provider, LlmProvider::Ollama);
    assert_eq!(config.llm.model, "llama3");
    assert_eq!(config.chunking, Config::default().chunking);
    assert_eq!(
        config.storage.index_dir,
        std::path::PathBuf::from("/tmp/docqa-index")
    );
    Ok(())
}

#[test]
fn yaml_and_json_agree() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let yaml = dir.path().join("docqa.yaml");
    let json = dir.path().join("docqa.json");
    fs::write(&yaml, "chunking:\n  chunk_size: 800\n  chunk_overlap: 80\n")?;
    fs::write(&json, r#"{"chunking": {"chunk_size": 800, "chunk_overlap": 80}}"#)?;

    let from_yaml = ConfigBuilder::new().with_file(&yaml).build()?;
    let from_json = ConfigBuilder::new().with_file(&json).build()?;
    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.chunking.chunk_size, 800);
    Ok(())
}

#[test]
fn invalid_overlap_fails_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docqa.toml");
    fs::write(&path, "[chunking]\nchunk_size = 100\nchunk_overlap = 100\n").unwrap();

    let err = ConfigBuilder::new().with_file(&path).build().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));

    let rendered = ErrorFormatter::new(err).to_string();
    assert!(rendered.contains("chunk_overlap"));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let err = ConfigBuilder::new()
        .with_file(dir.path().join("absent.toml"))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

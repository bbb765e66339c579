use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a PDF into pages and chunks
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("PDF not found: {}", .0.display())]
    PdfNotFound(PathBuf),

    #[error("PDF extractor '{program}' could not be started (is poppler installed?)")]
    ExtractorUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to extract text from {document}: {message}")]
    Extraction { document: String, message: String },

    #[error("invalid chunking settings: {0}")]
    InvalidChunking(String),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of the persisted embedding index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("index directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("index at {} is missing {}", .dir.display(), .missing.join(", "))]
    MissingArtifacts { dir: PathBuf, missing: Vec<String> },

    #[error("index at {} is corrupt: {message}", .dir.display())]
    Corrupt { dir: PathBuf, message: String },

    #[error("vector has dimension {actual}, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("cannot build an index from an empty corpus")]
    EmptyCorpus,

    #[error("failed to encode {artifact}: {message}")]
    Encode { artifact: String, message: String },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures of an embedding or generation backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{backend} is not configured: {message}")]
    Configuration {
        backend: &'static str,
        message: String,
    },

    #[error("{backend} request failed")]
    Request {
        backend: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{backend} returned HTTP {status}: {body}")]
    Status {
        backend: &'static str,
        status: u16,
        body: String,
    },

    #[error("{backend} returned a malformed response: {message}")]
    MalformedResponse {
        backend: &'static str,
        message: String,
    },
}

impl BackendError {
    pub fn configuration(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            backend,
            message: message.into(),
        }
    }

    pub fn malformed(backend: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            backend,
            message: message.into(),
        }
    }
}

/// Anything the vector path can fail with
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifacts_lists_every_name() {
        let err = IndexError::MissingArtifacts {
            dir: PathBuf::from("vectorstore/index"),
            missing: vec!["index.vectors".into(), "index.docstore".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("vectorstore/index"));
        assert!(msg.contains("index.vectors, index.docstore"));
    }

    #[test]
    fn retrieval_error_is_transparent() {
        let err: RetrievalError = BackendError::configuration("gemini", "no key").into();
        assert_eq!(err.to_string(), "gemini is not configured: no key");
    }
}

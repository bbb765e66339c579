use crate::error::IngestError;
use crate::models::{Page, PageMetadata};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

static INLINE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\x0C\x0B]+").expect("valid regex"));
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Turns a PDF into one [`Page`] per physical page with text
pub trait PageExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<Page>, IngestError>;

    /// `filename` only labels the pages' `source`
    fn extract_bytes(&self, bytes: &[u8], filename: &str) -> Result<Vec<Page>, IngestError>;
}

/// Extracts text with poppler's `pdftotext`, which separates pages with form feeds
#[derive(Debug, Clone)]
pub struct PdfToTextExtractor {
    program: PathBuf,
}

impl Default for PdfToTextExtractor {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pdftotext"),
        }
    }
}

impl PdfToTextExtractor {
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, path: &Path, document: &str) -> Result<String, IngestError> {
        debug!("running {} on {}", self.program.display(), path.display());
        let output = Command::new(&self.program)
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(path)
            .arg("-")
            .output()
            .map_err(|source| IngestError::ExtractorUnavailable {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(IngestError::Extraction {
                document: document.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PageExtractor for PdfToTextExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<Page>, IngestError> {
        if !path.exists() {
            return Err(IngestError::PdfNotFound(path.to_path_buf()));
        }
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let raw = self.run(path, &source)?;
        let pages = pages_from_text(&raw, &source);
        info!("extracted {} pages from {}", pages.len(), source);
        Ok(pages)
    }

    fn extract_bytes(&self, bytes: &[u8], filename: &str) -> Result<Vec<Page>, IngestError> {
        let io_err = |path: &Path, source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut tmp = tempfile::Builder::new()
            .prefix("docqa_")
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| io_err(&std::env::temp_dir(), e))?;
        tmp.write_all(bytes).map_err(|e| io_err(tmp.path(), e))?;
        tmp.flush().map_err(|e| io_err(tmp.path(), e))?;

        let raw = self.run(tmp.path(), filename)?;
        let pages = pages_from_text(&raw, filename);
        info!("extracted {} pages from {}", pages.len(), filename);
        Ok(pages)
    }
}

/// Split extractor output on form feeds and keep the pages with text.
pub fn pages_from_text(raw: &str, source: &str) -> Vec<Page> {
    raw.split('\x0C')
        .enumerate()
        .filter_map(|(i, page)| {
            let content = normalize_text(page);
            if content.is_empty() {
                return None;
            }
            Some(Page {
                content,
                metadata: PageMetadata {
                    source: source.to_string(),
                    page_number: i as u32 + 1,
                },
            })
        })
        .collect()
}

/// Collapse inline whitespace runs to one space and 3+ newlines to a blank line, then trim.
pub fn normalize_text(text: &str) -> String {
    let collapsed = INLINE_WHITESPACE.replace_all(text, " ");
    BLANK_LINES
        .replace_all(&collapsed, "\n\n")
        .trim()
        .to_string()
}

pub fn join_pages(pages: &[Page]) -> String {
    pages
        .iter()
        .filter(|p| !p.content.is_empty())
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

//! PDF ingestion: page extraction and chunk splitting

pub mod pdf;
pub mod split;

pub use pdf::{join_pages, normalize_text, PageExtractor, PdfToTextExtractor};
pub use split::split_pages;

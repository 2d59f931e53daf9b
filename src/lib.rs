//! # pdf2md
//!
//! PDF to Markdown conversion with structure detection.
//!
//! Text is pulled from the PDF as font-sized fragments, classified into
//! headings, list items and paragraphs, and rendered as CommonMark-style
//! Markdown.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> pdf2md::Result<()> {
//!     let markdown = pdf2md::file_to_markdown("document.pdf")?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! The structure pass works on any fragment source:
//!
//! ```
//! use pdf2md::{fragments_to_markdown, Fragment};
//!
//! let fragments = vec![
//!     Fragment::new("Title", 24.0, 1, 0),
//!     Fragment::new("1. First\n2. Second", 12.0, 1, 1),
//!     Fragment::new("Intro paragraph text.", 12.0, 1, 2),
//! ];
//! let markdown = fragments_to_markdown(&fragments).unwrap();
//! assert_eq!(markdown, "# Title\n\n1. First\n2. Second\n\nIntro paragraph text.\n");
//! ```
//!
//! ## Pipeline
//!
//! - [`extract`]: PDF pages to [`Fragment`]s (text, font size, page, order)
//! - [`structure`]: font-size profiling and block classification
//! - [`render`]: Markdown (or JSON) output
//! - [`convert`]: file-level orchestration with validation

pub mod convert;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod structure;
pub mod validate;

// Re-export commonly used types
pub use convert::{ConversionSummary, ConvertOptions, Converter, OutputFormat};
pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, Extraction, PageSelection, PdfExtractor};
pub use model::{Block, Fragment};
pub use render::{ExtractionStats, JsonFormat, RenderOptions};
pub use structure::{build_structure, StructureBuilder, StructureOptions};

use std::path::Path;

/// Convert fragments to Markdown with default options.
///
/// # Example
///
/// ```
/// use pdf2md::{fragments_to_markdown, Fragment};
///
/// let md = fragments_to_markdown(&[Fragment::new("- a\n- b", 12.0, 1, 0)]).unwrap();
/// assert_eq!(md, "- a\n- b\n");
/// ```
pub fn fragments_to_markdown(fragments: &[Fragment]) -> Result<String> {
    let blocks = build_structure(fragments)?;
    Ok(render::render(&blocks))
}

/// Extract a PDF file and convert it to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// let markdown = pdf2md::file_to_markdown("document.pdf").unwrap();
/// std::fs::write("document.md", markdown).unwrap();
/// ```
pub fn file_to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    validate::validate_input_file(&path)?;
    let extraction = PdfExtractor::open(path)?.extract()?;
    fragments_to_markdown(&extraction.fragments)
}

/// Extract a PDF held in memory and convert it to Markdown.
pub fn bytes_to_markdown(data: &[u8]) -> Result<String> {
    validate::pdf_version(data)?;
    let extraction = PdfExtractor::from_bytes(data)?.extract()?;
    fragments_to_markdown(&extraction.fragments)
}

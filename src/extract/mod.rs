//! Text fragment extraction from PDF files.
//!
//! This is the adapter between `lopdf` and the structure pass: it reads the
//! text operators of each selected page and hands back [`Fragment`]s in
//! reading order. Everything layout related (line grouping, indentation,
//! bullet glyphs) is settled here so that structure detection only sees
//! text, a font size and an order.

mod content;
mod lines;
mod options;

pub use options::{ErrorMode, ExtractOptions, PageSelection};

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};
use crate::model::Fragment;

use lines::FragmentAssembler;

/// Fragments pulled from a document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Fragments in reading order, orders increasing from 0
    pub fragments: Vec<Fragment>,

    /// Number of pages that were read
    pub page_count: u32,
}

impl Extraction {
    /// True if no text was found.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// PDF text extractor.
pub struct PdfExtractor {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl PdfExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path.as_ref())?;
        Ok(Self::with_document(doc))
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::with_document(doc))
    }

    fn with_document(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::debug!("document is encrypted, relying on empty user password");
        }
        Self {
            doc,
            options: ExtractOptions::default(),
        }
    }

    /// Set extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Total number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract fragments from the selected pages.
    pub fn extract(&self) -> Result<Extraction> {
        let pages = self.doc.get_pages();
        let total = pages.len() as u32;

        if let Some(last) = self.options.pages.last_page() {
            if last > total {
                return Err(Error::PageOutOfRange(last, total));
            }
        }

        let mut assembler = FragmentAssembler::new(self.options.normalize_bullets);
        let mut page_count = 0;

        for (&page_num, &page_id) in &pages {
            if !self.options.pages.includes(page_num) {
                continue;
            }

            let spans = match content::page_spans(&self.doc, page_id) {
                Ok(spans) => spans,
                Err(e) => {
                    page_failure(self.options.error_mode, page_num, e)?;
                    continue;
                }
            };

            let lines = lines::group_into_lines(spans);
            log::debug!("page {}: {} lines", page_num, lines.len());
            assembler.push_page(page_num, &lines);
            page_count += 1;
        }

        let fragments = assembler.finish();
        log::debug!(
            "extracted {} fragments from {} pages",
            fragments.len(),
            page_count
        );

        Ok(Extraction {
            fragments,
            page_count,
        })
    }
}

/// Apply the error mode to a page that could not be read.
fn page_failure(mode: ErrorMode, page: u32, err: lopdf::Error) -> Result<()> {
    match mode {
        ErrorMode::Strict => Err(Error::PageExtraction {
            page,
            reason: err.to_string(),
        }),
        ErrorMode::Lenient => {
            log::warn!("skipping page {}: {}", page, err);
            Ok(())
        }
    }
}

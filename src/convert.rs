//! End-to-end conversion: PDF file in, Markdown file out.
//!
//! # Example
//!
//! ```no_run
//! use pdf2md::convert::{ConvertOptions, Converter};
//!
//! fn main() -> pdf2md::Result<()> {
//!     let summary = Converter::new("report.pdf", "report.md")
//!         .with_options(ConvertOptions::new().with_force(true))
//!         .convert()?;
//!     println!("{} pages", summary.pages_converted);
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::extract::{ExtractOptions, PdfExtractor};
use crate::model::Fragment;
use crate::render::{
    to_json, to_markdown_with_stats, ExtractionStats, JsonFormat, RenderOptions, RenderResult,
};
use crate::structure::{StructureBuilder, StructureOptions};
use crate::validate::{validate_input_file, validate_output_path};

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// JSON dump of the block structure
    Json,
}

impl OutputFormat {
    /// Conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options
    pub extract: ExtractOptions,

    /// Structure detection thresholds
    pub structure: StructureOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub format: OutputFormat,

    /// Overwrite an existing output file
    pub force: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set structure detection options.
    pub fn with_structure_options(mut self, options: StructureOptions) -> Self {
        self.structure = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Allow overwriting an existing output file.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// Where the output was written
    pub output_path: PathBuf,

    /// Number of pages read
    pub pages_converted: u32,

    /// Extraction and structure statistics
    pub stats: ExtractionStats,
}

impl ConversionSummary {
    /// True if the document had no extractable text.
    pub fn is_empty(&self) -> bool {
        self.stats.fragment_count == 0
    }
}

/// Converts one PDF file into one output file.
#[derive(Debug, Clone)]
pub struct Converter {
    input: PathBuf,
    output: PathBuf,
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter for `input`, writing to `output`.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options: ConvertOptions::default(),
        }
    }

    /// Set conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Input path.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Output path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run the conversion.
    ///
    /// A document without extractable text is not an error: an empty output
    /// file is written and the summary reports zero fragments.
    pub fn convert(&self) -> Result<ConversionSummary> {
        let version = validate_input_file(&self.input)?;
        log::debug!("{}: PDF {}", self.input.display(), version);
        validate_output_path(&self.output, self.options.force)?;

        let extraction = PdfExtractor::open(&self.input)?
            .with_options(self.options.extract.clone())
            .extract()?;

        let result = render_fragments(&extraction.fragments, &self.options)?;
        let stats = result.stats.with_pages(extraction.page_count);

        fs::write(&self.output, &result.content).map_err(|source| Error::OutputWrite {
            path: self.output.clone(),
            source,
        })?;

        log::info!(
            "converted {} -> {}: {} pages, {} headings, {} list items, {} paragraphs",
            self.input.display(),
            self.output.display(),
            stats.page_count,
            stats.heading_count,
            stats.list_item_count,
            stats.paragraph_count
        );

        Ok(ConversionSummary {
            output_path: self.output.clone(),
            pages_converted: extraction.page_count,
            stats,
        })
    }
}

/// Build structure from fragments and render it in the configured format.
///
/// The returned statistics cover fragments and blocks; the page count is
/// left for the caller to fill in.
pub fn render_fragments(fragments: &[Fragment], options: &ConvertOptions) -> Result<RenderResult> {
    let blocks = StructureBuilder::new(options.structure.clone()).build(fragments)?;

    let mut result = match options.format {
        OutputFormat::Markdown => to_markdown_with_stats(&blocks, &options.render),
        OutputFormat::Json => {
            let content = to_json(&blocks, JsonFormat::Pretty)?;
            RenderResult::new(content, ExtractionStats::from_blocks(&blocks))
        }
    };
    result.stats.count_fragments(fragments);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_format(OutputFormat::Json)
            .with_force(true)
            .with_render_options(RenderOptions::new().with_max_heading(3));
        assert_eq!(options.format, OutputFormat::Json);
        assert!(options.force);
        assert_eq!(options.render.max_heading_level, 3);
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_render_fragments_markdown() {
        let fragments = vec![
            Fragment::new("Title", 24.0, 1, 0),
            Fragment::new("Some body text here.", 12.0, 1, 1),
        ];
        let result = render_fragments(&fragments, &ConvertOptions::default()).unwrap();
        assert_eq!(result.content, "# Title\n\nSome body text here.\n");
        assert_eq!(result.stats.fragment_count, 2);
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.paragraph_count, 1);
    }

    #[test]
    fn test_render_fragments_json() {
        let fragments = vec![Fragment::new("Only body.", 12.0, 1, 0)];
        let options = ConvertOptions::new().with_format(OutputFormat::Json);
        let result = render_fragments(&fragments, &options).unwrap();
        assert!(result.content.contains("\"type\": \"paragraph\""));
        assert_eq!(result.stats.paragraph_count, 1);
    }

    #[test]
    fn test_render_fragments_empty() {
        let result = render_fragments(&[], &ConvertOptions::default()).unwrap();
        assert_eq!(result.content, "");
        assert_eq!(result.stats.fragment_count, 0);
    }

    #[test]
    fn test_render_fragments_rejects_bad_size() {
        let fragments = vec![Fragment::new("x", f32::NAN, 1, 0)];
        let err = render_fragments(&fragments, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidFragment { order: 0, .. }));
    }
}

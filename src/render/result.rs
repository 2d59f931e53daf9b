//! Rendering result and document statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Block, Fragment};

/// Result of rendering a block sequence, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Document statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self { content, stats }
    }
}

/// Summary statistics for user-facing reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of pages processed
    pub page_count: u32,

    /// Number of fragments received from extraction
    pub fragment_count: u32,

    /// Character count of fragment text (excluding whitespace)
    pub char_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Approximate word count of the rendered output
    pub word_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count blocks by kind.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut stats = Self::new();
        for block in blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Tally one block.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.heading_count += 1,
            Block::ListItem { .. } => self.list_item_count += 1,
            Block::Paragraph { .. } => self.paragraph_count += 1,
        }
    }

    /// Add fragment and character counts.
    pub fn count_fragments(&mut self, fragments: &[Fragment]) {
        self.fragment_count += fragments.len() as u32;
        self.char_count += fragments.iter().map(|f| f.char_count() as u32).sum::<u32>();
    }

    /// Add the word count of rendered text.
    pub fn count_words(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Set the number of pages processed.
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.page_count = pages;
        self
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> u32 {
        self.heading_count + self.list_item_count + self.paragraph_count
    }
}

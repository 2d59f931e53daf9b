//! Structure detection: fragments in, classified blocks out.
//!
//! Detection runs in two passes. The first pass builds a [`FontProfile`]
//! over the whole document, because heading levels are relative to the
//! document's own size distribution. The second pass walks fragments in
//! reading order and classifies each one:
//!
//! 1. heading, if the [`HeadingClassifier`] says so;
//! 2. otherwise every line goes through the [`ListMatcher`];
//! 3. lines that are not list content accumulate in the
//!    [`ParagraphAssembler`].
//!
//! Blank lines, headings and list items end the open paragraph. Page
//! boundaries end nothing: a paragraph may run across pages.

mod heading;
mod list;
mod options;
mod paragraph;
mod profile;

pub use heading::HeadingClassifier;
pub use list::{parse_marker, LineOutcome, ListMarker, ListMatcher};
pub use options::{
    StructureOptions, DEFAULT_LIST_INDENT_STEP, DEFAULT_PARAGRAPH_INDENT, DEFAULT_TAB_WIDTH,
};
pub use paragraph::{ends_sentence, ParagraphAssembler};
pub use profile::{FontProfile, SizeKey, MAX_HEADING_LEVELS};

use crate::error::Result;
use crate::model::{Block, Fragment};

/// Build the block sequence for a document with default options.
///
/// An empty fragment slice yields an empty block sequence. A fragment with
/// a non-positive or non-finite font size is rejected.
pub fn build_structure(fragments: &[Fragment]) -> Result<Vec<Block>> {
    StructureBuilder::new(StructureOptions::default()).build(fragments)
}

/// Orchestrates profiling and classification for one document.
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    options: StructureOptions,
}

impl StructureBuilder {
    /// Create a builder with the given thresholds.
    pub fn new(options: StructureOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    /// Build the profile and the block sequence.
    pub fn build(&self, fragments: &[Fragment]) -> Result<Vec<Block>> {
        Ok(self.build_with_profile(fragments)?.1)
    }

    /// Like [`build`](Self::build), also returning the font profile.
    pub fn build_with_profile(&self, fragments: &[Fragment]) -> Result<(FontProfile, Vec<Block>)> {
        let mut ordered: Vec<&Fragment> = fragments.iter().collect();
        ordered.sort_by_key(|f| f.order);

        let profile = FontProfile::from_fragments(ordered.iter().copied())?;
        if profile.is_empty() {
            return Ok((profile, Vec::new()));
        }

        let blocks = self.classify(&profile, &ordered);
        log::debug!(
            "Built {} blocks from {} fragments",
            blocks.len(),
            fragments.len()
        );
        Ok((profile, blocks))
    }

    fn classify(&self, profile: &FontProfile, fragments: &[&Fragment]) -> Vec<Block> {
        let headings = HeadingClassifier::new(profile);
        let mut walker = BlockWalker::new(&self.options);

        for fragment in fragments {
            if let Some(level) = headings.classify(fragment) {
                walker.heading(level, fragment);
                continue;
            }
            for line in fragment.lines() {
                walker.body_line(line, fragment.order);
            }
        }

        walker.finish()
    }
}

/// Second-pass state: the open list and the open paragraph.
struct BlockWalker {
    lists: ListMatcher,
    paragraph: ParagraphAssembler,
    blocks: Vec<Block>,
}

impl BlockWalker {
    fn new(options: &StructureOptions) -> Self {
        Self {
            lists: ListMatcher::new(options),
            paragraph: ParagraphAssembler::new(options),
            blocks: Vec::new(),
        }
    }

    fn heading(&mut self, level: u8, fragment: &Fragment) {
        self.flush_all();
        self.blocks.push(Block::Heading {
            level,
            text: fragment.text.trim().to_string(),
            order: fragment.order,
        });
    }

    fn body_line(&mut self, line: &str, order: u64) {
        if line.trim().is_empty() {
            self.flush_all();
            return;
        }

        match self.lists.feed(line, order) {
            LineOutcome::Item { finished } => {
                self.flush_paragraph();
                self.blocks.extend(finished);
            }
            LineOutcome::Continued => {}
            LineOutcome::NotList { finished } => {
                self.blocks.extend(finished);
                self.paragraph.push_line(line, order);
            }
        }
    }

    fn flush_paragraph(&mut self) {
        if let Some(block) = self.paragraph.flush() {
            self.blocks.push(block);
        }
    }

    fn flush_all(&mut self) {
        self.flush_paragraph();
        if let Some(block) = self.lists.close() {
            self.blocks.push(block);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_all();
        self.blocks
    }
}

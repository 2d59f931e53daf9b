//! Structural blocks produced by the structure builder.

use serde::{Deserialize, Serialize};

/// A classified structural unit, ready for rendering.
///
/// Font metadata has been resolved into the variant; `order` is the order
/// of the first fragment the block was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-6)
    Heading {
        /// Heading level, 1 is the largest
        level: u8,
        /// Heading text
        text: String,
        /// Order of the source fragment
        order: u64,
    },

    /// A bullet or numbered list item
    ListItem {
        /// Numbered (`true`) or bulleted (`false`)
        ordered: bool,
        /// Literal number text for ordered items (e.g. "12")
        marker: Option<String>,
        /// Nesting depth, 0 is top level
        depth: u8,
        /// Item text, continuation lines included
        text: String,
        /// Order of the fragment holding the item's first line
        order: u64,
    },

    /// A paragraph of body text
    Paragraph {
        /// Paragraph text; may contain embedded line breaks
        text: String,
        /// Order of the first fragment in the paragraph
        order: u64,
    },
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>, order: u64) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
            order,
        }
    }

    /// Create a numbered list item.
    pub fn ordered_item(
        marker: impl Into<String>,
        depth: u8,
        text: impl Into<String>,
        order: u64,
    ) -> Self {
        Block::ListItem {
            ordered: true,
            marker: Some(marker.into()),
            depth,
            text: text.into(),
            order,
        }
    }

    /// Create a bulleted list item.
    pub fn unordered_item(depth: u8, text: impl Into<String>, order: u64) -> Self {
        Block::ListItem {
            ordered: false,
            marker: None,
            depth,
            text: text.into(),
            order,
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>, order: u64) -> Self {
        Block::Paragraph {
            text: text.into(),
            order,
        }
    }

    /// Order of the first constituent fragment.
    pub fn order(&self) -> u64 {
        match self {
            Block::Heading { order, .. }
            | Block::ListItem { order, .. }
            | Block::Paragraph { order, .. } => *order,
        }
    }

    /// Text content of the block.
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. }
            | Block::ListItem { text, .. }
            | Block::Paragraph { text, .. } => text,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Block::ListItem { .. })
    }

    /// Check if the block has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// Short lowercase name of the variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::ListItem { .. } => "list_item",
            Block::Paragraph { .. } => "paragraph",
        }
    }
}

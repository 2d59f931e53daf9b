//! Thresholds for structure detection.

/// Columns a tab character counts for when measuring indentation.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Columns of indentation per list nesting level.
pub const DEFAULT_LIST_INDENT_STEP: usize = 2;

/// Minimum indentation that keeps a line break after a sentence end.
pub const DEFAULT_PARAGRAPH_INDENT: usize = 2;

/// Options for structure detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureOptions {
    /// Width of a tab character in columns
    pub tab_width: usize,

    /// Indentation columns per list depth level
    pub list_indent_step: usize,

    /// Indentation (columns) that, following sentence-terminal punctuation,
    /// marks a new line inside a paragraph instead of a wrapped line
    pub paragraph_indent: usize,
}

impl StructureOptions {
    /// Create new structure options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tab width.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Set the list indentation step (at least 1).
    pub fn with_list_indent_step(mut self, step: usize) -> Self {
        self.list_indent_step = step.max(1);
        self
    }

    /// Set the paragraph indentation threshold.
    pub fn with_paragraph_indent(mut self, indent: usize) -> Self {
        self.paragraph_indent = indent;
        self
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            list_indent_step: DEFAULT_LIST_INDENT_STEP,
            paragraph_indent: DEFAULT_PARAGRAPH_INDENT,
        }
    }
}

//! Paragraph reconstruction from wrapped body lines.

use crate::model::{indent_width, Block};

use super::StructureOptions;

/// Characters that may trail a sentence end (closing quotes and brackets).
const SENTENCE_CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

/// Characters that end a sentence or clause.
const SENTENCE_TERMINALS: &[char] = &['.', '!', '?', ':', ';'];

/// Check if a line ends with sentence-terminal punctuation.
pub fn ends_sentence(line: &str) -> bool {
    line.trim_end()
        .trim_end_matches(SENTENCE_CLOSERS)
        .ends_with(SENTENCE_TERMINALS)
}

/// Accumulates consecutive body lines into one paragraph.
///
/// Wrapped lines are joined with a single space. When a line follows one
/// that ends a sentence and is indented by at least `paragraph_indent`
/// columns, the break is kept as an embedded `\n` instead.
#[derive(Debug, Clone)]
pub struct ParagraphAssembler {
    tab_width: usize,
    paragraph_indent: usize,
    text: String,
    order: Option<u64>,
}

impl ParagraphAssembler {
    /// Create an empty assembler.
    pub fn new(options: &StructureOptions) -> Self {
        Self {
            tab_width: options.tab_width,
            paragraph_indent: options.paragraph_indent,
            text: String::new(),
            order: None,
        }
    }

    /// Check if no text has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a line from the fragment with the given order.
    pub fn push_line(&mut self, line: &str, order: u64) {
        let content = line.trim();
        if content.is_empty() {
            return;
        }

        if self.text.is_empty() {
            self.order = Some(order);
        } else if ends_sentence(&self.text)
            && self.paragraph_indent > 0
            && indent_width(line, self.tab_width) >= self.paragraph_indent
        {
            self.text.push('\n');
        } else {
            self.text.push(' ');
        }
        self.text.push_str(content);
    }

    /// Finish the current paragraph, if any text was accumulated.
    pub fn flush(&mut self) -> Option<Block> {
        let order = self.order.take()?;
        let text = std::mem::take(&mut self.text);
        if text.is_empty() {
            return None;
        }
        Some(Block::Paragraph { text, order })
    }
}

//! Text fragments handed over by the extraction stage.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One contiguous run of text sharing a font size.
///
/// Fragments are produced once by the extractor and never mutated. `order`
/// is globally unique and defines the reading order across the whole
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Text content, possibly spanning several lines
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// 1-indexed page number
    pub page: u32,
    /// Position in the document-wide reading order
    pub order: u64,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32, order: u64) -> Self {
        Self {
            text: text.into(),
            font_size,
            page,
            order,
        }
    }

    /// Check the extractor contract: the font size must be a finite positive number.
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::InvalidFragment {
                order: self.order,
                reason: format!("font size must be positive, got {}", self.font_size),
            });
        }
        Ok(())
    }

    /// Number of non-whitespace characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    /// Check if the fragment carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Split the text into lines.
    ///
    /// Line endings are normalized to `\n`. The boundary between two
    /// fragments already counts as one line break, so a single trailing
    /// terminator is dropped; any further breaks are kept and show up as
    /// empty lines.
    pub fn lines(&self) -> Vec<&str> {
        let text = self.text.strip_suffix("\r\n").unwrap_or(&self.text);
        let text = text
            .strip_suffix('\n')
            .or_else(|| text.strip_suffix('\r'))
            .unwrap_or(text);

        let mut lines = Vec::new();
        for chunk in text.split('\n') {
            // `\r\n` leaves a trailing `\r`; a lone `\r` is a break of its own
            let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
            lines.extend(chunk.split('\r'));
        }
        lines
    }
}

/// Width of a line's leading whitespace in columns.
///
/// Spaces count one column, tabs count `tab_width`. Other whitespace
/// (non-breaking spaces included) counts one column.
pub fn indent_width(line: &str, tab_width: usize) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { tab_width } else { 1 })
        .sum()
}

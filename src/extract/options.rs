//! Extraction options and page selection.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for pulling text fragments out of a PDF.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Which pages to extract
    pub pages: PageSelection,

    /// Error handling mode for per-page failures
    pub error_mode: ErrorMode,

    /// Rewrite leading bullet glyphs (`•`, `▪`, ...) to `-`
    pub normalize_bullets: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable or disable bullet glyph normalization.
    pub fn with_bullet_normalization(mut self, enabled: bool) -> Self {
        self.normalize_bullets = enabled;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: PageSelection::All,
            error_mode: ErrorMode::Lenient,
            normalize_bullets: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first page that cannot be read
    Strict,
    /// Log and skip unreadable pages
    #[default]
    Lenient,
}

/// Page selection (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// An inclusive page range
    Range(RangeInclusive<u32>),
    /// Several ranges, sorted by start with overlaps merged
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Highest page number the selection asks for, if bounded.
    pub fn last_page(&self) -> Option<u32> {
        match self {
            PageSelection::All => None,
            PageSelection::Range(range) => Some(*range.end()),
            PageSelection::Ranges(ranges) => ranges.last().map(|r| *r.end()),
        }
    }

    /// Parse a page selection such as `all`, `3-7` or `1,3,5-9`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let invalid = || Error::InvalidPageRange(s.to_string());

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = parse_bounds(start, end).ok_or_else(invalid)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut bounds = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let range = match part.split_once('-') {
                Some((start, end)) => parse_bounds(start, end).ok_or_else(invalid)?,
                None => {
                    let page = parse_page(part).ok_or_else(invalid)?;
                    (page, page)
                }
            };
            bounds.push(range);
        }

        bounds.sort_unstable();
        let mut ranges: Vec<RangeInclusive<u32>> = Vec::with_capacity(bounds.len());
        for (start, end) in bounds {
            match ranges.last_mut() {
                Some(last) if start <= last.end().saturating_add(1) => {
                    if end > *last.end() {
                        *last = *last.start()..=end;
                    }
                }
                _ => ranges.push(start..=end),
            }
        }
        Ok(PageSelection::Ranges(ranges))
    }
}

fn parse_page(s: &str) -> Option<u32> {
    s.trim().parse().ok().filter(|&p| p > 0)
}

fn parse_bounds(start: &str, end: &str) -> Option<(u32, u32)> {
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.pages, PageSelection::All);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.normalize_bullets);
    }

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new()
            .with_pages(PageSelection::Range(2..=4))
            .with_error_mode(ErrorMode::Strict)
            .with_bullet_normalization(false);
        assert!(options.pages.includes(3));
        assert!(!options.pages.includes(5));
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(!options.normalize_bullets);
    }

    #[test]
    fn test_parse_page_selection() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("").unwrap(), PageSelection::All);
        assert_eq!(
            PageSelection::parse("3-7").unwrap(),
            PageSelection::Range(3..=7)
        );
        assert_eq!(
            PageSelection::parse("5, 1,3-4,3").unwrap(),
            PageSelection::Ranges(vec![1..=1, 3..=5])
        );
    }

    #[test]
    fn test_parse_page_selection_rejects_garbage() {
        for bad in ["x", "0", "7-3", "1,,2", "1-"] {
            let err = PageSelection::parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidPageRange(_)), "{}", bad);
        }
    }

    #[test]
    fn test_huge_range_list_stays_compact() {
        let selection = PageSelection::parse("1,1-4294967295").unwrap();
        assert_eq!(selection, PageSelection::Ranges(vec![1..=u32::MAX]));
        assert!(selection.includes(123_456));
        assert_eq!(selection.last_page(), Some(u32::MAX));

        let gaps = PageSelection::parse("9,2-3,7-8").unwrap();
        assert_eq!(gaps, PageSelection::Ranges(vec![2..=3, 7..=9]));
        assert!(!gaps.includes(5));
    }

    #[test]
    fn test_last_page() {
        assert_eq!(PageSelection::All.last_page(), None);
        assert_eq!(PageSelection::Range(1..=9).last_page(), Some(9));
        assert_eq!(
            PageSelection::Ranges(vec![2..=2, 8..=8]).last_page(),
            Some(8)
        );
    }
}

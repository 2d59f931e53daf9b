//! Line grouping and fragment assembly.
//!
//! Spans from one page are grouped into lines by baseline, then consecutive
//! lines with the same font size are merged into fragments. Horizontal
//! offsets are turned into leading spaces so that list nesting and indented
//! paragraph lines survive as text.

use unicode_normalization::UnicodeNormalization;

use crate::model::Fragment;
use crate::structure::SizeKey;

use super::content::{is_spaceless_script_char, TextSpan};

/// Baseline tolerance as a fraction of the font size.
const LINE_TOLERANCE: f32 = 0.3;

/// Vertical gap, relative to the font size, that marks a paragraph break.
const PARAGRAPH_GAP: f32 = 1.6;

/// One synthesized space per this fraction of the font size.
const INDENT_UNIT: f32 = 0.5;

/// Upper bound on synthesized indentation.
const MAX_INDENT: usize = 16;

/// Horizontal gap, relative to the font size, that separates two words.
const WORD_GAP: f32 = 0.1;

const BULLET_GLYPHS: &[char] = &['•', '●', '○', '◦', '▪', '■', '‣', '►'];

/// A line of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Group spans into lines, top to bottom and left to right.
pub(crate) fn group_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut groups: Vec<Vec<TextSpan>> = Vec::new();
    for span in spans {
        match groups.last_mut() {
            Some(group) if same_line(&group[0], &span) => group.push(span),
            _ => groups.push(vec![span]),
        }
    }

    groups.into_iter().map(build_line).collect()
}

fn same_line(first: &TextSpan, span: &TextSpan) -> bool {
    let tolerance = first.font_size.max(span.font_size) * LINE_TOLERANCE;
    (first.y - span.y).abs() <= tolerance
}

fn build_line(mut spans: Vec<TextSpan>) -> TextLine {
    spans.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut text = String::new();
    let mut prev_end: Option<f32> = None;
    for span in &spans {
        if let Some(end) = prev_end {
            let gap = span.x - end;
            let joins_words = !text.ends_with(char::is_whitespace)
                && !span.text.starts_with(char::is_whitespace)
                && !text.chars().last().is_some_and(is_spaceless_script_char);
            if joins_words && gap > span.font_size * WORD_GAP {
                text.push(' ');
            }
        }
        text.push_str(&span.text);
        prev_end = Some(span.x + span.width);
    }

    TextLine {
        text,
        x: spans.first().map_or(0.0, |s| s.x),
        y: spans.first().map_or(0.0, |s| s.y),
        font_size: dominant_size(&spans),
    }
}

/// Size carrying the most visible characters on the line.
fn dominant_size(spans: &[TextSpan]) -> f32 {
    let mut best: Option<(usize, f32)> = None;
    for span in spans {
        let key = SizeKey::from_size(span.font_size);
        let chars: usize = spans
            .iter()
            .filter(|s| SizeKey::from_size(s.font_size) == key)
            .map(|s| s.text.chars().filter(|c| !c.is_whitespace()).count())
            .sum();
        if best.map_or(true, |(n, size)| chars > n || (chars == n && span.font_size > size)) {
            best = Some((chars, span.font_size));
        }
    }
    best.map_or(0.0, |(_, size)| size)
}

/// Turns page lines into fragments with globally increasing order.
#[derive(Debug)]
pub(crate) struct FragmentAssembler {
    normalize_bullets: bool,
    next_order: u64,
    fragments: Vec<Fragment>,
}

impl FragmentAssembler {
    pub fn new(normalize_bullets: bool) -> Self {
        Self {
            normalize_bullets,
            next_order: 0,
            fragments: Vec::new(),
        }
    }

    /// Add the lines of one page.
    pub fn push_page(&mut self, page: u32, lines: &[TextLine]) {
        let margin = lines.iter().map(|l| l.x).fold(f32::INFINITY, f32::min);

        let mut current: Option<(SizeKey, Fragment)> = None;
        let mut prev: Option<&TextLine> = None;

        for line in lines {
            let body = self.line_text(line);
            if body.is_empty() {
                continue;
            }

            let indent = indent_spaces(line.x - margin, line.font_size);
            let gap = prev.is_some_and(|p| {
                p.y - line.y > PARAGRAPH_GAP * p.font_size.max(line.font_size)
            });
            let key = SizeKey::from_size(line.font_size);

            let mut text = String::new();
            if gap {
                text.push('\n');
            }
            text.push_str(&" ".repeat(indent));
            text.push_str(&body);

            match current.as_mut() {
                Some((k, fragment)) if *k == key => {
                    fragment.text.push('\n');
                    fragment.text.push_str(&text);
                }
                _ => {
                    let fragment = Fragment::new(text, line.font_size, page, self.next_order);
                    self.next_order += 1;
                    self.fragments.extend(current.replace((key, fragment)).map(|(_, f)| f));
                }
            }
            prev = Some(line);
        }

        if let Some((_, done)) = current {
            self.fragments.push(done);
        }
    }

    pub fn finish(self) -> Vec<Fragment> {
        self.fragments
    }

    fn line_text(&self, line: &TextLine) -> String {
        let text: String = line.text.nfc().collect();
        let text = text.trim();
        if self.normalize_bullets {
            normalize_bullet(text)
        } else {
            text.to_string()
        }
    }
}

fn indent_spaces(offset: f32, font_size: f32) -> usize {
    if offset <= 0.0 || font_size <= 0.0 {
        return 0;
    }
    ((offset / (font_size * INDENT_UNIT)).round() as usize).min(MAX_INDENT)
}

/// Rewrite a leading bullet glyph to the `-` list marker.
fn normalize_bullet(text: &str) -> String {
    match text.strip_prefix(BULLET_GLYPHS) {
        Some(rest) => {
            let rest = rest.trim_start();
            if rest.is_empty() {
                text.to_string()
            } else {
                format!("- {}", rest)
            }
        }
        None => text.to_string(),
    }
}

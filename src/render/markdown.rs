//! Markdown rendering for block sequences.

use crate::model::Block;

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Render blocks to Markdown with default options.
pub fn render(blocks: &[Block]) -> String {
    to_markdown(blocks, &RenderOptions::default())
}

/// Convert blocks to Markdown.
pub fn to_markdown(blocks: &[Block], options: &RenderOptions) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(blocks)
}

/// Convert blocks to Markdown with statistics.
pub fn to_markdown_with_stats(blocks: &[Block], options: &RenderOptions) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(blocks)
}

/// Markdown renderer.
///
/// Output rules:
/// - headings are `#` x level, a space and the text;
/// - list items are indented two spaces per depth; numbered items are
///   renumbered from 1 in every contiguous run at the same depth;
/// - paragraphs are emitted as-is, minus blank lines;
/// - consecutive list items sit on adjacent lines, every other pair of
///   blocks is separated by exactly one blank line;
/// - non-empty output ends with a single `\n`, and `\n` is the only line
///   ending.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render blocks to Markdown.
    pub fn render(mut self, blocks: &[Block]) -> String {
        self.render_internal(blocks)
    }

    /// Render blocks to Markdown with statistics.
    pub fn render_with_stats(mut self, blocks: &[Block]) -> RenderResult {
        self.options.collect_stats = true;
        let content = self.render_internal(blocks);

        self.stats.count_words(&content);

        RenderResult::new(content, self.stats)
    }

    fn render_internal(&mut self, blocks: &[Block]) -> String {
        let mut output = String::new();
        let mut numbering = Numbering::default();
        let mut prev_was_item = false;

        for block in blocks {
            let Some(rendered) = self.render_block(block, &mut numbering) else {
                continue;
            };

            if self.options.collect_stats {
                self.stats.add_block(block);
            }

            let is_item = block.is_list_item();
            if !output.is_empty() {
                if prev_was_item && is_item {
                    output.push('\n');
                } else {
                    output.push_str("\n\n");
                }
            }
            output.push_str(&rendered);
            prev_was_item = is_item;
        }

        if !output.is_empty() {
            output.push('\n');
        }
        output
    }

    fn render_block(&self, block: &Block, numbering: &mut Numbering) -> Option<String> {
        match block {
            Block::Heading { level, text, .. } => {
                let text = single_line(text);
                if text.is_empty() {
                    return None;
                }
                numbering.reset();
                let level = (*level).clamp(1, self.options.max_heading_level.clamp(1, 6));
                Some(format!(
                    "{} {}",
                    "#".repeat(level as usize),
                    self.escape(&text)
                ))
            }
            Block::ListItem {
                ordered,
                depth,
                text,
                ..
            } => {
                let text = single_line(text);
                if text.is_empty() {
                    return None;
                }
                let indent = "  ".repeat(*depth as usize);
                let marker = match numbering.next(*depth as usize, *ordered) {
                    Some(n) => format!("{}.", n),
                    None => self.options.list_marker.to_string(),
                };
                Some(format!("{}{} {}", indent, marker, self.escape(&text)))
            }
            Block::Paragraph { text, .. } => {
                let text = paragraph_text(text);
                if text.is_empty() {
                    return None;
                }
                numbering.reset();
                Some(self.escape(&text))
            }
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Per-depth counters for numbered list runs.
#[derive(Debug, Default)]
struct Numbering {
    counters: Vec<Option<u32>>,
}

impl Numbering {
    /// Next number for an item at `depth`, or `None` for a bulleted item.
    fn next(&mut self, depth: usize, ordered: bool) -> Option<u32> {
        // Returning to a shallower depth ends the deeper runs
        self.counters.truncate(depth + 1);
        self.counters.resize(depth + 1, None);

        if ordered {
            let n = self.counters[depth].map_or(1, |n| n + 1);
            self.counters[depth] = Some(n);
            Some(n)
        } else {
            self.counters[depth] = None;
            None
        }
    }

    fn reset(&mut self) {
        self.counters.clear();
    }
}

/// Collapse text onto one line.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize line endings and drop blank lines inside a paragraph.
fn paragraph_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

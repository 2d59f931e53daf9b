//! List item recognition and nesting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{indent_width, Block};

use super::StructureOptions;

static RE_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+][ \t]+(.+)$").expect("static regex"));

static RE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)[.)][ \t]+(.+)$").expect("static regex"));

/// A list lead-in recognized at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarker {
    /// Numbered (`true`) or bulleted (`false`)
    pub ordered: bool,
    /// Literal number text for numbered items
    pub number: Option<String>,
    /// Text after the marker
    pub text: String,
}

/// Recognize a bullet (`-`, `*`, `+`) or number (`1.`, `12)`) lead-in.
///
/// Leading whitespace is ignored; the marker must be followed by at least
/// one space or tab and some text.
pub fn parse_marker(line: &str) -> Option<ListMarker> {
    let content = line.trim();

    if let Some(caps) = RE_BULLET.captures(content) {
        return Some(ListMarker {
            ordered: false,
            number: None,
            text: caps[1].trim().to_string(),
        });
    }

    if let Some(caps) = RE_NUMBER.captures(content) {
        return Some(ListMarker {
            ordered: true,
            number: Some(caps[1].to_string()),
            text: caps[2].trim().to_string(),
        });
    }

    None
}

/// What the matcher did with a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line opened a new item; the item it replaced is returned finished.
    Item {
        /// Previously open item, now complete
        finished: Option<Block>,
    },
    /// The line was appended to the open item.
    Continued,
    /// The line is not list content. Any open list was closed.
    NotList {
        /// Last item of the closed list
        finished: Option<Block>,
    },
}

#[derive(Debug, Clone)]
struct PendingItem {
    ordered: bool,
    marker: Option<String>,
    depth: u8,
    indent: usize,
    text: String,
    order: u64,
}

impl PendingItem {
    fn into_block(self) -> Block {
        Block::ListItem {
            ordered: self.ordered,
            marker: self.marker,
            depth: self.depth,
            text: self.text,
            order: self.order,
        }
    }
}

#[derive(Debug, Clone)]
struct ListScope {
    /// `(indent, depth)` of each enclosing level, outermost first
    levels: Vec<(usize, u8)>,
    item: PendingItem,
}

/// Stateful list matcher fed one body line at a time.
///
/// Each open list keeps a stack of indentation levels. An item at least
/// `list_indent_step` columns deeper than the innermost level opens a child
/// one level down; a shallower item pops back to the level it fits under.
/// A line shallower than the list's first item starts a fresh list.
#[derive(Debug, Clone)]
pub struct ListMatcher {
    tab_width: usize,
    indent_step: usize,
    scope: Option<ListScope>,
}

impl ListMatcher {
    /// Create a matcher with no open list.
    pub fn new(options: &StructureOptions) -> Self {
        Self {
            tab_width: options.tab_width,
            indent_step: options.list_indent_step.max(1),
            scope: None,
        }
    }

    /// Check if a list item is currently open.
    pub fn is_open(&self) -> bool {
        self.scope.is_some()
    }

    /// Feed a non-blank line from the fragment with the given order.
    pub fn feed(&mut self, line: &str, order: u64) -> LineOutcome {
        let indent = indent_width(line, self.tab_width);

        if let Some(marker) = parse_marker(line) {
            return LineOutcome::Item {
                finished: self.open_item(marker, indent, order),
            };
        }

        if let Some(scope) = self.scope.as_mut() {
            // Continuation: indented at least as deep as the open item
            if indent > 0 && indent >= scope.item.indent {
                let text = line.trim();
                if !scope.item.text.is_empty() {
                    scope.item.text.push(' ');
                }
                scope.item.text.push_str(text);
                return LineOutcome::Continued;
            }
        }

        LineOutcome::NotList {
            finished: self.close(),
        }
    }

    /// Close all open list scopes, returning the last open item.
    pub fn close(&mut self) -> Option<Block> {
        self.scope.take().map(|scope| scope.item.into_block())
    }

    fn open_item(&mut self, marker: ListMarker, indent: usize, order: u64) -> Option<Block> {
        let mut item = PendingItem {
            ordered: marker.ordered,
            marker: marker.number,
            depth: 0,
            indent,
            text: marker.text,
            order,
        };

        if let Some(scope) = self.scope.as_mut() {
            while scope.levels.last().is_some_and(|&(level, _)| level > indent) {
                scope.levels.pop();
            }
            if let Some(&(level, depth)) = scope.levels.last() {
                if indent - level < self.indent_step {
                    item.depth = depth;
                } else {
                    item.depth = depth.saturating_add(1);
                    scope.levels.push((indent, item.depth));
                }
                let finished = std::mem::replace(&mut scope.item, item);
                return Some(finished.into_block());
            }
        }

        let finished = self.close();
        self.scope = Some(ListScope {
            levels: vec![(indent, 0)],
            item,
        });
        finished
    }
}

//! Content stream interpretation.
//!
//! Walks the text operators of a page content stream and produces positioned
//! text spans. Only the state needed for reading order and font size is
//! tracked; graphics state (`cm`, clipping, colors) is ignored.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};


/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Approximate glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Font size assumed before the first `Tf`.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A run of text shown by one text operator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
}

/// Extract positioned text spans from one page.
pub(crate) fn page_spans(doc: &LopdfDocument, page_id: ObjectId) -> lopdf::Result<Vec<TextSpan>> {
    let fonts = doc.get_page_fonts(page_id)?;
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut state = TextState::new(doc, &fonts);
    for op in &content.operations {
        state.apply(op);
    }
    Ok(state.spans)
}

/// Text state while walking a content stream.
struct TextState<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
    in_text: bool,
    spans: Vec<TextSpan>,
}

impl<'a> TextState<'a> {
    fn new(doc: &'a LopdfDocument, fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            font: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: 0.0,
            matrix: TextMatrix::default(),
            in_text: false,
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                self.in_text = true;
                self.matrix = TextMatrix::default();
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let [Object::Name(name), size, ..] = operands.as_slice() {
                    self.font = name.clone();
                    self.font_size = number(size).unwrap_or(DEFAULT_FONT_SIZE);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let [tx, ty, ..] = operands.as_slice() {
                    let tx = number(tx).unwrap_or(0.0);
                    let ty = number(ty).unwrap_or(0.0);
                    if op.operator == "TD" {
                        self.leading = -ty;
                    }
                    self.matrix.move_line(tx, ty);
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let v: Vec<f32> = operands.iter().map(|o| number(o).unwrap_or(0.0)).collect();
                    self.matrix.set([v[0], v[1], v[2], v[3], v[4], v[5]]);
                }
            }
            "T*" => self.matrix.move_line(0.0, -self.leading),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "'" => {
                self.matrix.move_line(0.0, -self.leading);
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "\"" => {
                self.matrix.move_line(0.0, -self.leading);
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    /// Record a span at the current position and advance past it.
    fn show(&mut self, text: String) {
        if !self.in_text || text.is_empty() {
            return;
        }

        let size = (self.font_size * self.matrix.scale()).abs();
        let width = text.chars().count() as f32 * size * AVG_GLYPH_WIDTH;
        let (x, y) = self.matrix.position();
        self.matrix.advance(width);

        // Invisible or degenerate text cannot be placed in the size profile
        if text.trim().is_empty() || !size.is_finite() || size <= 0.0 {
            return;
        }
        self.spans.push(TextSpan {
            text,
            x,
            y,
            width,
            font_size: size,
        });
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(&self.font)
            .and_then(|f| f.get_font_encoding(self.doc).ok());
        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    /// Decode a TJ array; large negative adjustments become word spaces.
    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                other => {
                    let adjustment = -number(other).unwrap_or(0.0);
                    let needs_space = adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if needs_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Text matrix and text line matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextMatrix {
    tm: [f32; 6],
    line: [f32; 6],
}

impl Default for TextMatrix {
    fn default() -> Self {
        let identity = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        Self {
            tm: identity,
            line: identity,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        self.tm = m;
        self.line = m;
    }

    /// Start a new line offset from the start of the current one.
    fn move_line(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, e, f] = self.line;
        self.line[4] = e + tx * a + ty * c;
        self.line[5] = f + tx * b + ty * d;
        self.tm = self.line;
    }

    /// Move along the baseline by a distance in user space.
    fn advance(&mut self, distance: f32) {
        let scale = self.scale();
        if scale > 0.0 {
            self.tm[4] += distance * self.tm[0] / scale;
            self.tm[5] += distance * self.tm[1] / scale;
        }
    }

    fn position(&self) -> (f32, f32) {
        (self.tm[4], self.tm[5])
    }

    fn scale(&self) -> f32 {
        let [a, _, c, ..] = self.tm;
        (a * a + c * c).sqrt()
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words (Han, kana, CJK punctuation).
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0x20000..=0x2EBEF)
}

/// Fallback decoding when the font has no usable encoding.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

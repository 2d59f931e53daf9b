//! Document-wide font size statistics.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::Fragment;

/// Number of distinct sizes that can become headings (Markdown has six levels).
pub const MAX_HEADING_LEVELS: usize = 6;

/// A font size bucketed to 0.1pt so it can be used as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeKey(i32);

impl SizeKey {
    /// Bucket a font size.
    pub fn from_size(size: f32) -> Self {
        SizeKey((size * 10.0).round() as i32)
    }

    /// The bucket's font size in points.
    pub fn size(self) -> f32 {
        self.0 as f32 / 10.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SizeTally {
    chars: usize,
    fragments: usize,
}

/// Font size distribution of one document.
///
/// Built once from the full fragment stream before classification starts
/// and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct FontProfile {
    tallies: BTreeMap<SizeKey, SizeTally>,
    body: Option<SizeKey>,
    /// Sizes above body, largest first; index + 1 is the heading level
    ranked: Vec<SizeKey>,
}

impl FontProfile {
    /// Profile with no fragments: no body size and no heading sizes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the profile from every fragment of a document.
    ///
    /// Fails on the first fragment with an invalid font size.
    pub fn from_fragments<'a, I>(fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Fragment>,
    {
        let mut tallies: BTreeMap<SizeKey, SizeTally> = BTreeMap::new();
        for fragment in fragments {
            fragment.validate()?;
            let tally = tallies
                .entry(SizeKey::from_size(fragment.font_size))
                .or_default();
            tally.chars += fragment.char_count();
            tally.fragments += 1;
        }

        // Most characters wins; ties go to the larger size (keys ascend).
        let mut body: Option<(SizeKey, usize)> = None;
        for (&key, tally) in &tallies {
            match body {
                Some((_, best)) if tally.chars < best => {}
                _ => body = Some((key, tally.chars)),
            }
        }
        let body = body.map(|(key, _)| key);

        let ranked: Vec<SizeKey> = match body {
            Some(body) => tallies
                .range(body..)
                .rev()
                .filter(|&(&key, tally)| key > body && tally.chars > 0)
                .map(|(&key, _)| key)
                .take(MAX_HEADING_LEVELS)
                .collect(),
            None => Vec::new(),
        };

        if let Some(body) = body {
            log::debug!(
                "Font profile: body={:.1}pt, heading sizes={:?}",
                body.size(),
                ranked.iter().map(|k| k.size()).collect::<Vec<_>>()
            );
        }

        Ok(Self {
            tallies,
            body,
            ranked,
        })
    }

    /// Check if the profile was built from zero fragments.
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Body text font size, if any fragment exists.
    pub fn body_size(&self) -> Option<f32> {
        self.body.map(SizeKey::size)
    }

    /// Heading sizes in level order (level 1 first).
    pub fn ranked_sizes(&self) -> Vec<f32> {
        self.ranked.iter().map(|k| k.size()).collect()
    }

    /// Heading level for a font size, or `None` for body treatment.
    pub fn level_for(&self, font_size: f32) -> Option<u8> {
        let key = SizeKey::from_size(font_size);
        self.ranked
            .iter()
            .position(|&ranked| ranked == key)
            .map(|i| (i + 1) as u8)
    }

    /// Number of fragments seen at a font size.
    pub fn occurrences(&self, font_size: f32) -> usize {
        self.tallies
            .get(&SizeKey::from_size(font_size))
            .map_or(0, |t| t.fragments)
    }

    /// Total non-whitespace characters seen at a font size.
    pub fn char_total(&self, font_size: f32) -> usize {
        self.tallies
            .get(&SizeKey::from_size(font_size))
            .map_or(0, |t| t.chars)
    }

    /// Number of distinct font sizes.
    pub fn distinct_sizes(&self) -> usize {
        self.tallies.len()
    }
}

//! # Segment Module - Reference Text Layout
//!
//! A lesson's reference text is an ordered run of [`Segment`]s. Each one is either typed by the
//! user or auto-filled by the engine. This module stores that layout and answers the one
//! question the engine asks on every edit: which segment holds a given character offset?
//!
//! ## Data Structure
//!
#![doc = simple_mermaid::mermaid!("../diagrams/reference_structure.mmd")]
//!
//! Data layout example: `[auto("ab"), typed("cd"), auto("e")]`
//! ```text
//! Characters: [a][b][c][d][e]
//! Segments:   [auto][type][a]
//! Boundaries: 0     2     4  5
//! ```
//!
//! The reference keeps four synchronized views:
//! - `segments`: the merged segment list, no two neighbours sharing a kind
//! - `text` and `chars`: the concatenated reference text
//! - `boundaries`: prefix sums of segment lengths, searched in O(log n) per lookup
//!
//! All offsets and lengths are counted in `char`s.

use std::fmt;

use crate::ConfigurationError;

/// Whether a segment is typed by the user or filled in by the engine
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// Text the user has to key in. Counts towards speed and accuracy.
    #[default]
    #[strum(to_string = "type", serialize = "typed")]
    #[cfg_attr(feature = "serde", serde(rename = "type", alias = "typed"))]
    Typed,
    /// Scaffolding the engine inserts once the cursor reaches it. Cannot be deleted.
    #[strum(to_string = "auto", serialize = "boilerplate")]
    #[cfg_attr(feature = "serde", serde(rename = "auto", alias = "boilerplate"))]
    AutoFilled,
}

impl SegmentKind {
    /// Parse a segment tag, rejecting anything unknown
    ///
    /// ```rust
    /// use stencil::SegmentKind;
    ///
    /// assert_eq!(SegmentKind::from_tag("auto").unwrap(), SegmentKind::AutoFilled);
    /// assert_eq!(SegmentKind::from_tag("boilerplate").unwrap(), SegmentKind::AutoFilled);
    /// assert_eq!(SegmentKind::from_tag("type").unwrap(), SegmentKind::Typed);
    /// assert!(SegmentKind::from_tag("bogus").is_err());
    /// ```
    pub fn from_tag(tag: &str) -> Result<Self, ConfigurationError> {
        tag.parse()
            .map_err(|_| ConfigurationError::UnknownSegmentKind(tag.to_string()))
    }

    pub const fn is_auto(self) -> bool {
        matches!(self, Self::AutoFilled)
    }
}

/// A contiguous run of reference text with a single [`SegmentKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub text: String,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// A segment the user has to type
    pub fn typed(text: impl Into<String>) -> Self {
        Self::new(text, SegmentKind::Typed)
    }

    /// A segment filled in by the engine
    pub fn auto(text: impl Into<String>) -> Self {
        Self::new(text, SegmentKind::AutoFilled)
    }

    /// Length of the segment in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A segment described by absolute character offsets, `start..end`
///
/// Used by [`Reference::from_spans`] when the layout comes from an editor or an
/// annotation format instead of a list of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    pub start: usize,
    pub end: usize,
    pub kind: SegmentKind,
}

impl SegmentSpan {
    pub const fn new(start: usize, end: usize, kind: SegmentKind) -> Self {
        Self { start, end, kind }
    }
}

/// Location of a segment inside a [`Reference`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRef {
    /// Position of the segment in [`Reference::segments`]
    pub index: usize,
    /// Offset of the segment's first character
    pub start: usize,
    /// Offset one past the segment's last character
    pub end: usize,
    pub kind: SegmentKind,
}

impl SegmentRef {
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// An immutable reference text and its segment layout
///
/// Built once per lesson file. Neighbouring segments of the same kind are merged on
/// construction, so two layouts that only differ in how same-kind runs are split compare equal.
///
/// # Performance
///
/// - Construction: O(n) where n is text length
/// - Segment lookup by offset: O(log s) where s is the number of segments
/// - Character access: O(1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    segments: Vec<Segment>,
    text: String,
    chars: Vec<char>,
    /// `boundaries[i]` is the start of segment `i`; the last entry is the text length
    boundaries: Vec<usize>,
    typed_len: usize,
}

impl Default for Reference {
    fn default() -> Self {
        Self::from_merged(Vec::new())
    }
}

impl Reference {
    /// Build a reference from an ordered list of segments
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::EmptySegment`] if any segment has no text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stencil::{Reference, Segment};
    ///
    /// let reference = Reference::new([
    ///     Segment::auto("// header\n"),
    ///     Segment::typed("let a = 1;\n"),
    ///     Segment::typed("let b = 2;\n"),
    /// ])
    /// .unwrap();
    ///
    /// // The two typed segments were merged
    /// assert_eq!(reference.segments().len(), 2);
    /// assert_eq!(reference.typed_len(), 22);
    /// ```
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Result<Self, ConfigurationError> {
        let mut merged = Vec::new();

        for (index, segment) in segments.into_iter().enumerate() {
            if segment.text.is_empty() {
                return Err(ConfigurationError::EmptySegment { index });
            }
            push_merged(&mut merged, segment);
        }

        Ok(Self::from_merged(merged))
    }

    /// Build a reference from a text and absolute spans over it
    ///
    /// Spans must be given in order and cover the text exactly once.
    ///
    /// # Errors
    ///
    /// Fails fast on the first span that leaves a gap, overlaps its predecessor, runs past
    /// the end of the text or is empty, and when the spans stop short of the end.
    pub fn from_spans(text: &str, spans: &[SegmentSpan]) -> Result<Self, ConfigurationError> {
        let chars: Vec<char> = text.chars().collect();
        let mut expected = 0;
        let mut segments = Vec::with_capacity(spans.len());

        for (index, span) in spans.iter().enumerate() {
            if span.start < expected {
                return Err(ConfigurationError::Overlap {
                    previous_end: expected,
                    start: span.start,
                });
            }
            if span.start > expected {
                return Err(ConfigurationError::Gap {
                    expected,
                    found: span.start,
                });
            }
            if span.end > chars.len() {
                return Err(ConfigurationError::OutOfBounds {
                    end: span.end,
                    len: chars.len(),
                });
            }
            if span.end <= span.start {
                return Err(ConfigurationError::EmptySegment { index });
            }

            let text: String = chars[span.start..span.end].iter().collect();
            segments.push(Segment::new(text, span.kind));
            expected = span.end;
        }

        if expected != chars.len() {
            return Err(ConfigurationError::IncompleteCoverage {
                covered: expected,
                len: chars.len(),
            });
        }

        Self::new(segments)
    }

    /// Build a reference from raw content and one kind per line
    ///
    /// Every line but the last keeps its trailing `\n`. Lines without a kind default to
    /// [`SegmentKind::Typed`], and consecutive lines of the same kind become one segment.
    ///
    /// ```rust
    /// use stencil::{Reference, SegmentKind};
    ///
    /// let reference = Reference::from_lines(
    ///     "// setup\nlet x = 1;\nlet y = 2;",
    ///     &[SegmentKind::AutoFilled, SegmentKind::Typed],
    /// );
    ///
    /// assert_eq!(reference.segments().len(), 2);
    /// assert_eq!(reference.segments()[0].text, "// setup\n");
    /// assert_eq!(reference.segments()[1].text, "let x = 1;\nlet y = 2;");
    /// ```
    pub fn from_lines(content: &str, line_kinds: &[SegmentKind]) -> Self {
        if content.is_empty() {
            return Self::default();
        }

        let lines: Vec<&str> = content.split('\n').collect();
        let last_line = lines.len() - 1;
        let mut merged = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            let text = if index < last_line {
                format!("{line}\n")
            } else {
                line.to_string()
            };

            // A trailing newline leaves an empty last line behind
            if text.is_empty() {
                continue;
            }

            let kind = line_kinds.get(index).copied().unwrap_or_default();
            push_merged(&mut merged, Segment::new(text, kind));
        }

        Self::from_merged(merged)
    }

    /// Split the reference back into content and one kind per line
    ///
    /// Each line takes the kind of its first character. A trailing empty line, left by a
    /// final `\n`, is reported as [`SegmentKind::Typed`].
    pub fn to_lines(&self) -> (String, Vec<SegmentKind>) {
        let mut kinds = Vec::new();
        let mut at_line_start = true;

        for segment in &self.segments {
            for char in segment.text.chars() {
                if at_line_start {
                    kinds.push(segment.kind);
                    at_line_start = false;
                }
                if char == '\n' {
                    at_line_start = true;
                }
            }
        }

        if self.text.ends_with('\n') {
            kinds.push(SegmentKind::Typed);
        }

        (self.text.clone(), kinds)
    }

    fn from_merged(segments: Vec<Segment>) -> Self {
        let mut boundaries = Vec::with_capacity(segments.len() + 1);
        let mut text = String::new();
        let mut offset = 0;
        let mut typed_len = 0;

        boundaries.push(0);
        for segment in &segments {
            let len = segment.char_len();
            offset += len;
            if segment.kind == SegmentKind::Typed {
                typed_len += len;
            }
            text.push_str(&segment.text);
            boundaries.push(offset);
        }

        let chars = text.chars().collect();

        Self {
            segments,
            text,
            chars,
            boundaries,
            typed_len,
        }
    }

    /// The full reference text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The reference text as characters
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of characters in the reference text
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of characters the user has to type by hand
    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Find the segment containing the character at `offset`
    ///
    /// Returns `None` when `offset` is at or past the end of the text.
    pub fn segment_at(&self, offset: usize) -> Option<SegmentRef> {
        if offset >= self.len() {
            return None;
        }

        // boundaries[0] is 0, so at least one entry is <= offset
        let index = self.boundaries.partition_point(|&start| start <= offset) - 1;
        self.segment_ref(index)
    }

    /// Kind of the segment containing the character at `offset`
    pub fn kind_at(&self, offset: usize) -> Option<SegmentKind> {
        self.segment_at(offset).map(|segment| segment.kind)
    }

    /// Location of the segment at position `index` in [`Reference::segments`]
    pub fn segment_ref(&self, index: usize) -> Option<SegmentRef> {
        let kind = self.segments.get(index)?.kind;

        Some(SegmentRef {
            index,
            start: self.boundaries[index],
            end: self.boundaries[index + 1],
            kind,
        })
    }

    /// Iterate over the segments with their offsets
    pub fn segment_refs(&self) -> impl Iterator<Item = SegmentRef> + '_ {
        (0..self.segments.len()).filter_map(|index| self.segment_ref(index))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// Append a segment, extending the previous one when the kinds match
fn push_merged(segments: &mut Vec<Segment>, segment: Segment) {
    match segments.last_mut() {
        Some(last) if last.kind == segment.kind => last.text.push_str(&segment.text),
        _ => segments.push(segment),
    }
}

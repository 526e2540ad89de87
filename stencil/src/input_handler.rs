//! # Input Handler Module - Edit Legality and Mistake Accounting
//!
//! This module owns the user's input buffer and decides what happens to it. Hosts do not send
//! keystrokes; they send the input they would like to have (a "proposed" input) and the handler
//! works out whether that is a growth, a shrink or nothing at all.
//!
//! ## Key Responsibilities
//!
//! - **Growth**: count a mistake for every newly entered character that differs from the reference
//! - **Shrink**: refuse deletions whose new boundary lands inside auto-filled text
//! - **Rewrite**: accept changes to already entered characters unless they are auto-filled
//! - **Auto-fill**: carry the boundary through auto-filled segments without mistake accounting
//!
//! ## Input Processing Flow
//!
#![doc = simple_mermaid::mermaid!("../diagrams/input_handler_flow.mmd")]
//!
//! ## Usage Example
//!
//! ```rust
//! use stencil::input_handler::{Edit, InputHandler};
//! use stencil::{Reference, Segment};
//!
//! let reference = Reference::new([Segment::typed("ab"), Segment::auto("cd")]).unwrap();
//! let mut handler = InputHandler::new();
//!
//! let proposed: Vec<char> = "ax".chars().collect();
//! let edit = handler.process_edit(&proposed, &reference).unwrap();
//! assert_eq!(edit, Edit::Grow { from: 0, to: 2, mistakes: 1 });
//!
//! // The boundary now sits at the start of "cd"
//! assert_eq!(handler.auto_fill(&reference), 2);
//! assert_eq!(handler.input_string(), "axcd");
//! ```

use std::cmp::Ordering;

use thiserror::Error;

use crate::{Reference, SegmentKind};

/// An accepted change to the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Characters were appended. `mistakes` counts the ones that did not match the reference.
    Grow {
        from: usize,
        to: usize,
        mistakes: usize,
    },
    /// Characters were removed from the end
    Shrink { from: usize, to: usize },
    /// Entered characters were rewritten without changing the length, starting at `from`
    Replace { from: usize },
    /// The proposed input equals the current input
    Unchanged,
}

/// Why a proposed input was turned down
///
/// A rejection leaves the input buffer untouched. It is an answer, not a failure: the host is
/// expected to drop the keystroke and keep showing the engine's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the session is already completed")]
    Completed,

    #[error("deleting to offset {boundary} would erase auto-filled text")]
    ProtectedRegion { boundary: usize },

    #[error("the proposed input rewrites auto-filled text at offset {index}")]
    ProtectedRewrite { index: usize },
}

/// The user's input buffer for one session
///
/// # Performance
///
/// - Growth: O(k) where k is the number of appended characters
/// - Shrink: O(log s) segment lookup where s is the number of segments
/// - Auto-fill: O(k) per filled segment
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    /// Everything entered so far, correct or not
    input: Vec<char>,
}

impl InputHandler {
    /// Create a new input handler for a typing session
    pub const fn new() -> Self {
        Self { input: Vec::new() }
    }

    /// Check if nothing has been entered yet
    pub const fn is_input_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Get the number of characters entered so far. This is the boundary.
    pub const fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Check if the input covers the whole reference
    pub const fn is_fully_typed(&self, text_len: usize) -> bool {
        self.input.len() == text_len
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn input_string(&self) -> String {
        self.input.iter().collect()
    }

    /// The character entered at `index`, if any
    pub fn entered_at(&self, index: usize) -> Option<char> {
        self.input.get(index).copied()
    }

    /// Evaluate a proposed input against the current one and apply it if legal
    ///
    /// The proposal is clipped to the reference length first. Mistakes are only counted for
    /// characters past the current boundary. Already entered characters may be rewritten, except
    /// where they are auto-filled text.
    ///
    /// # Errors
    ///
    /// - [`Rejection::ProtectedRegion`] when a shrink would land inside auto-filled text
    /// - [`Rejection::ProtectedRewrite`] when the proposal changes an auto-filled character
    pub fn process_edit(
        &mut self,
        proposed: &[char],
        reference: &Reference,
    ) -> Result<Edit, Rejection> {
        let proposed = &proposed[..proposed.len().min(reference.len())];
        let current = self.input.len();
        let rewrite = self.first_rewrite(proposed, reference)?;

        match proposed.len().cmp(&current) {
            Ordering::Greater => {
                let (kept, appended) = proposed.split_at(current);
                self.input.copy_from_slice(kept);
                Ok(self.append(appended, reference))
            }
            Ordering::Less => {
                let edit = self.truncate(proposed.len(), reference)?;
                self.input.copy_from_slice(proposed);
                Ok(edit)
            }
            Ordering::Equal => Ok(rewrite.map_or(Edit::Unchanged, |from| {
                self.input.copy_from_slice(proposed);
                Edit::Replace { from }
            })),
        }
    }

    /// The first index where `proposed` differs from the entered text, if any
    ///
    /// # Errors
    ///
    /// [`Rejection::ProtectedRewrite`] if any differing character is auto-filled text.
    fn first_rewrite(
        &self,
        proposed: &[char],
        reference: &Reference,
    ) -> Result<Option<usize>, Rejection> {
        let mut first = None;

        for (index, (proposed, entered)) in proposed.iter().zip(&self.input).enumerate() {
            if proposed == entered {
                continue;
            }
            if reference.kind_at(index) == Some(SegmentKind::AutoFilled) {
                return Err(Rejection::ProtectedRewrite { index });
            }
            first.get_or_insert(index);
        }

        Ok(first)
    }

    /// Append characters at the boundary, counting every one that differs from the reference
    ///
    /// Characters past the end of the reference are dropped.
    pub fn append(&mut self, appended: &[char], reference: &Reference) -> Edit {
        let from = self.input.len();
        let expected = reference.chars().get(from..).unwrap_or_default();
        let appended = &appended[..appended.len().min(expected.len())];

        if appended.is_empty() {
            return Edit::Unchanged;
        }

        let mistakes = appended
            .iter()
            .zip(expected)
            .filter(|(entered, expected)| entered != expected)
            .count();

        self.input.extend_from_slice(appended);

        Edit::Grow {
            from,
            to: self.input.len(),
            mistakes,
        }
    }

    /// Remove characters from the end down to `boundary`
    ///
    /// # Errors
    ///
    /// [`Rejection::ProtectedRegion`] if the first removed character is auto-filled text.
    pub fn truncate(&mut self, boundary: usize, reference: &Reference) -> Result<Edit, Rejection> {
        let from = self.input.len();
        if boundary >= from {
            return Ok(Edit::Unchanged);
        }

        // The first character that would become untyped decides
        if reference.kind_at(boundary) == Some(SegmentKind::AutoFilled) {
            return Err(Rejection::ProtectedRegion { boundary });
        }

        self.input.truncate(boundary);

        Ok(Edit::Shrink { from, to: boundary })
    }

    /// Carry the boundary through any auto-filled segment it sits in
    ///
    /// Repeats until the boundary is no longer inside an auto-filled segment, which ends because
    /// every round strictly moves the boundary forward. Returns the number of characters added.
    pub fn auto_fill(&mut self, reference: &Reference) -> usize {
        let mut filled = 0;

        while let Some(segment) = reference
            .segment_at(self.input.len())
            .filter(|segment| segment.kind.is_auto())
        {
            let boundary = self.input.len();
            self.input
                .extend_from_slice(&reference.chars()[boundary..segment.end]);
            filled += segment.end - boundary;
        }

        filled
    }

    /// Forget everything entered so far
    pub fn reset(&mut self) {
        self.input.clear();
    }
}

use crate::{Reference, SegmentKind};

/// How a reference character looks against the current input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterStatus {
    /// Not entered yet
    Pending,
    /// Entered and matching the reference
    Correct,
    /// Entered as something else
    Wrong,
}

/// One reference character as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterContext {
    pub index: usize,
    /// The reference character
    pub char: char,
    /// What was entered at this index, if anything
    pub entered: Option<char>,
    pub kind: SegmentKind,
    pub status: CharacterStatus,
    pub has_cursor: bool,
}

/// Iterator for rendering contexts
pub struct RenderingIterator<'a> {
    reference: &'a Reference,
    input: &'a [char],
    segment: usize,
    index: usize,
}

impl<'a> RenderingIterator<'a> {
    pub(crate) const fn new(reference: &'a Reference, input: &'a [char]) -> Self {
        Self {
            reference,
            input,
            segment: 0,
            index: 0,
        }
    }

    // Walks the segments alongside the characters instead of searching for every index
    fn kind_at(&mut self, index: usize) -> Option<SegmentKind> {
        let mut segment = self.reference.segment_ref(self.segment)?;
        while !segment.contains(index) {
            self.segment += 1;
            segment = self.reference.segment_ref(self.segment)?;
        }
        Some(segment.kind)
    }
}

impl ExactSizeIterator for RenderingIterator<'_> {}

impl std::iter::FusedIterator for RenderingIterator<'_> {}

impl Iterator for RenderingIterator<'_> {
    type Item = CharacterContext;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let char = self.reference.char_at(index)?;
        let kind = self.kind_at(index)?;
        let entered = self.input.get(index).copied();

        let status = match entered {
            None => CharacterStatus::Pending,
            Some(entered) if entered == char => CharacterStatus::Correct,
            Some(_) => CharacterStatus::Wrong,
        };

        self.index += 1;

        Some(CharacterContext {
            index,
            char,
            entered,
            kind,
            status,
            has_cursor: index == self.input.len(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.reference.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

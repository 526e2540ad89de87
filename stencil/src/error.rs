use thiserror::Error;

/// A segment layout that cannot describe a reference text
///
/// These point at bad lesson data rather than anything the user did, so they are
/// raised when a [`Reference`](crate::Reference) is built and never during typing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Segment {index} has no text")]
    EmptySegment { index: usize },

    #[error("Segments leave a gap: expected a segment starting at {expected}, found {found}")]
    Gap { expected: usize, found: usize },

    #[error("Segments overlap: a segment starts at {start} before the previous one ends at {previous_end}")]
    Overlap { previous_end: usize, start: usize },

    #[error("Segment ends at {end}, beyond the reference length {len}")]
    OutOfBounds { end: usize, len: usize },

    #[error("Segments only cover {covered} of {len} characters")]
    IncompleteCoverage { covered: usize, len: usize },

    #[error("Unknown segment kind '{0}'")]
    UnknownSegmentKind(String),
}

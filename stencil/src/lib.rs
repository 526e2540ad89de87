//! # Stencil - Input Matching and Scoring for Code Typing Trainers
//!
//! Stencil is the engine behind a code typing trainer. A lesson is a reference text split into
//! segments: some must be typed by hand, others are scaffolding that the engine fills in by
//! itself once the cursor reaches them. The engine consumes the user's growing input, counts
//! mistakes as they are made, protects auto-filled text from deletion, lets the user skip
//! insignificant whitespace with Tab and Enter, and produces a final report on completion.
//!
//! ## Quick Start
//!
//! ```rust
//! use stencil::{ManualClock, Reference, Segment, TypingSession};
//!
//! let reference = Reference::new([
//!     Segment::typed("let x"),
//!     Segment::auto(" = "),
//!     Segment::typed("1;"),
//! ])
//! .unwrap();
//!
//! let clock = ManualClock::new(0);
//! let mut session = TypingSession::with_clock(reference, clock.clone());
//!
//! session.type_str("let x");
//! // The auto-filled " = " was appended for us
//! assert_eq!(session.input(), "let x = ");
//!
//! clock.advance(60_000);
//! let outcome = session.type_str("1;");
//! let result = outcome.result.unwrap();
//! assert_eq!(result.accuracy, 100);
//! assert_eq!(result.wpm, 1);
//! ```
//!
//! ## Modules
//!
//! - [`segment`]: the reference text and its typed/auto-filled layout
//! - [`input_handler`]: edit legality, mistake accounting and auto-fill
//! - [`whitespace`]: Tab and Enter shortcuts over indentation and blank line ends
//! - [`session`]: the session that ties everything together
//! - [`statistics`]: the final report and live progress

pub mod clock;
pub mod config;
pub mod error;
pub mod input_handler;
pub mod render;
pub mod segment;
pub mod session;
pub mod statistics;
pub mod statistics_tracker;
pub mod whitespace;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{Configuration, EnterFallback};
pub use error::ConfigurationError;
pub use input_handler::Rejection;
pub use segment::{Reference, Segment, SegmentKind, SegmentRef, SegmentSpan};
pub use session::{EditOutcome, EditStatus, TypingSession};
pub use statistics::{LiveStats, SessionResult};

const AVERAGE_WORD_LENGTH: usize = 5;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

type Minutes = f64;

// Get the minutes covered by a span of milliseconds
pub(crate) fn minutes(millis: u64) -> Minutes {
    millis as f64 / MILLIS_PER_MINUTE
}

//! # Session Module - Complete Typing Session Management
//!
//! This module provides the high-level interface for a typing session over one reference text.
//! It coordinates the input handler, the auto-fill driver, the whitespace shortcuts and the
//! statistics tracker behind a single entry point: [`TypingSession::apply_edit`].
//!
//! ## Key Features
//!
//! - **Proposal-based input**: hosts hand over the input they want, the session decides
//! - **Protected scaffolding**: auto-filled text is inserted for the user and cannot be deleted
//! - **Whitespace shortcuts**: Tab and Enter jump over indentation and blank line ends
//! - **Injected time**: every timestamp comes from a [`Clock`], so sessions replay deterministically
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! ## Usage Examples
//!
//! ### Basic Session
//!
//! ```rust
//! use stencil::{ManualClock, Reference, Segment, TypingSession};
//!
//! let reference = Reference::new([
//!     Segment::auto("fn main() {\n"),
//!     Segment::typed("    run();\n"),
//!     Segment::auto("}\n"),
//! ])
//! .unwrap();
//!
//! let clock = ManualClock::new(0);
//! let mut session = TypingSession::with_clock(reference, clock.clone());
//!
//! // The opening line was filled in on load
//! assert_eq!(session.input(), "fn main() {\n");
//!
//! session.press_tab();
//! session.type_str("rux");
//! assert_eq!(session.mistakes(), 1);
//!
//! // Fix the typo
//! session.backspace();
//! clock.advance(30_000);
//! let outcome = session.type_str("n();\n");
//!
//! assert!(outcome.completed);
//! let result = outcome.result.unwrap();
//! assert_eq!(result.mistakes, 1);
//! assert_eq!(result.accuracy, 91);
//! ```

use crate::input_handler::{Edit, InputHandler, Rejection};
use crate::render::{CharacterContext, RenderingIterator};
use crate::statistics_tracker::StatisticsTracker;
use crate::whitespace;
use crate::{
    Clock, Configuration, EnterFallback, LiveStats, Reference, SegmentKind, SessionResult,
    SystemClock, Timestamp,
};

/// What happened to a proposed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStatus {
    /// The input changed
    Applied,
    /// The proposal matched the current input
    Unchanged,
    /// The proposal was refused and the input left as it was
    Rejected(Rejection),
}

/// Everything a host needs to re-render after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub status: EditStatus,
    /// Mistakes added by this edit
    pub mistakes_delta: usize,
    /// Characters appended by the auto-fill driver after the edit
    pub auto_filled: usize,
    /// Whether the session is completed after this edit
    pub completed: bool,
    /// The final report, present only on the edit that completed the session
    pub result: Option<SessionResult>,
}

impl EditOutcome {
    const fn settled(status: EditStatus, completed: bool) -> Self {
        Self {
            status,
            mistakes_delta: 0,
            auto_filled: 0,
            completed,
            result: None,
        }
    }

    /// Check if the input was changed by the edit
    pub const fn is_accepted(&self) -> bool {
        matches!(self.status, EditStatus::Applied)
    }

    pub const fn rejection(&self) -> Option<Rejection> {
        match self.status {
            EditStatus::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// A typing session over one reference text
///
/// Owns the input state for its reference: the entered text, the mistake counter, the start
/// time and the completion flag. Loading a new reference discards all of it.
///
/// # Architecture
///
/// The TypingSession coordinates four components:
/// - **Reference**: the immutable segment layout
/// - **InputHandler**: edit legality, mistake accounting and auto-fill
/// - **StatisticsTracker**: mistakes, timing and the final report
/// - **Clock**: where timestamps come from
///
/// # Thread Safety
///
/// Every operation is synchronous and takes `&mut self`. Hosts that touch a session from more
/// than one thread put it behind a `Mutex`.
///
/// # Examples
///
/// ```rust
/// use stencil::{Reference, Segment, TypingSession};
///
/// let reference = Reference::new([Segment::typed("hi")]).unwrap();
/// let mut session = TypingSession::new(reference);
///
/// session.apply_edit("h");
/// let outcome = session.apply_edit("hi");
/// assert!(outcome.completed);
/// assert_eq!(session.result().unwrap().accuracy, 100);
/// ```
#[derive(Debug, Clone)]
pub struct TypingSession<C: Clock = SystemClock> {
    reference: Reference,
    input_handler: InputHandler,
    statistics: StatisticsTracker,
    config: Configuration,
    clock: C,
}

impl TypingSession<SystemClock> {
    /// Create a session timed by the wall clock
    pub fn new(reference: Reference) -> Self {
        Self::with_clock(reference, SystemClock)
    }
}

impl<C: Clock> TypingSession<C> {
    /// Create a session timed by `clock`
    ///
    /// Auto-filled text at the start of the reference is entered right away. A reference made
    /// only of auto-filled text is therefore completed on creation.
    pub fn with_clock(reference: Reference, clock: C) -> Self {
        let mut session = Self {
            reference,
            input_handler: InputHandler::new(),
            statistics: StatisticsTracker::new(),
            config: Configuration::default(),
            clock,
        };
        session.settle();
        session
    }

    /// Configure the session with custom settings (builder pattern)
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    /// Replace the reference and start over
    ///
    /// Nothing carries over from the previous reference: input, mistakes, start time and
    /// completion are all reset.
    pub fn load_reference(&mut self, reference: Reference) {
        log::debug!(
            "Loading reference: {} characters, {} typed, {} segments",
            reference.len(),
            reference.typed_len(),
            reference.segments().len()
        );
        self.reference = reference;
        self.reset();
    }

    /// Start over on the same reference
    pub fn reset(&mut self) {
        self.input_handler.reset();
        self.statistics = StatisticsTracker::new();
        self.settle();
    }

    /// Explicitly begin the session
    ///
    /// An empty reference has nothing to type and is never completed by itself. Beginning it
    /// completes it with an empty report. Non-empty references return `None`.
    ///
    /// ```rust
    /// use stencil::{Reference, TypingSession};
    ///
    /// let mut session = TypingSession::new(Reference::default());
    /// assert!(!session.is_completed());
    ///
    /// let result = session.begin().unwrap();
    /// assert_eq!(result.wpm, 0);
    /// assert_eq!(result.accuracy, 100);
    /// assert!(session.is_completed());
    /// ```
    pub fn begin(&mut self) -> Option<SessionResult> {
        if !self.reference.is_empty() {
            return None;
        }

        let now = self.clock.now();
        Some(
            self.statistics
                .mark_completed(now, self.reference.typed_len()),
        )
    }

    /// Propose a new input for the session
    ///
    /// This is the main method for handling user input. The proposal is compared with the
    /// current input:
    ///
    /// - **Longer**: every newly entered character that differs from the reference is a mistake.
    ///   The first growth starts the clock.
    /// - **Shorter**: a deletion. Refused if the first removed character is auto-filled text.
    /// - **Equal**: nothing happens, unless the content differs.
    ///
    /// Characters before the boundary may be rewritten without counting mistakes. Rewriting an
    /// auto-filled character is refused.
    ///
    /// Accepted edits are followed by auto-fill and the completion check. Once completed, the
    /// session refuses every edit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stencil::{EditStatus, Reference, Rejection, Segment, TypingSession};
    ///
    /// let reference = Reference::new([Segment::auto("xy"), Segment::typed("z")]).unwrap();
    /// let mut session = TypingSession::new(reference);
    /// assert_eq!(session.input(), "xy");
    ///
    /// let outcome = session.apply_edit("x");
    /// assert_eq!(
    ///     outcome.status,
    ///     EditStatus::Rejected(Rejection::ProtectedRegion { boundary: 1 })
    /// );
    /// assert_eq!(session.input(), "xy");
    /// ```
    pub fn apply_edit(&mut self, proposed: &str) -> EditOutcome {
        let proposed: Vec<char> = proposed.chars().collect();
        self.apply_with(|handler, reference| handler.process_edit(&proposed, reference))
    }

    // Keystroke helpers edit the buffer in place instead of building a full proposal
    fn apply_with<F>(&mut self, edit: F) -> EditOutcome
    where
        F: FnOnce(&mut InputHandler, &Reference) -> Result<Edit, Rejection>,
    {
        if self.is_completed() {
            log::trace!("Ignoring edit on a completed session");
            return EditOutcome::settled(EditStatus::Rejected(Rejection::Completed), true);
        }

        let edit = match edit(&mut self.input_handler, &self.reference) {
            Ok(edit) => edit,
            Err(rejection) => {
                log::debug!("Rejected edit: {rejection}");
                return EditOutcome::settled(EditStatus::Rejected(rejection), false);
            }
        };

        let mistakes_delta = match edit {
            Edit::Unchanged => return EditOutcome::settled(EditStatus::Unchanged, false),
            Edit::Grow { mistakes, .. } => {
                if !self.statistics.has_started() {
                    self.statistics.start(self.clock.now());
                }
                self.statistics.record_mistakes(mistakes);
                mistakes
            }
            Edit::Shrink { .. } | Edit::Replace { .. } => 0,
        };

        let (auto_filled, result) = self.settle();

        EditOutcome {
            status: EditStatus::Applied,
            mistakes_delta,
            auto_filled,
            completed: self.is_completed(),
            result,
        }
    }

    /// Run the auto-fill driver and the completion check
    fn settle(&mut self) -> (usize, Option<SessionResult>) {
        let auto_filled = self.input_handler.auto_fill(&self.reference);
        if auto_filled > 0 {
            log::trace!(
                "Auto-filled {auto_filled} characters up to offset {}",
                self.input_len()
            );
        }

        let text_len = self.reference.len();
        let done = text_len > 0 && self.input_handler.is_fully_typed(text_len);

        let result = (done && !self.statistics.is_completed()).then(|| {
            let result = self
                .statistics
                .mark_completed(self.clock.now(), self.reference.typed_len());
            log::debug!(
                "Session completed: {} wpm, {}% accuracy, {} mistakes",
                result.wpm,
                result.accuracy,
                result.mistakes
            );
            result
        });

        (auto_filled, result)
    }

    /// Type a single character at the boundary
    pub fn type_char(&mut self, char: char) -> EditOutcome {
        self.apply_with(|handler, reference| Ok(handler.append(&[char], reference)))
    }

    /// Type several characters at the boundary in one edit
    pub fn type_str(&mut self, string: &str) -> EditOutcome {
        let appended: Vec<char> = string.chars().collect();
        self.apply_with(|handler, reference| Ok(handler.append(&appended, reference)))
    }

    /// Delete the character before the boundary
    pub fn backspace(&mut self) -> EditOutcome {
        match self.input_len().checked_sub(1) {
            Some(boundary) => {
                self.apply_with(|handler, reference| handler.truncate(boundary, reference))
            }
            None => EditOutcome::settled(EditStatus::Unchanged, self.is_completed()),
        }
    }

    /// Handle a Tab keystroke
    ///
    /// At the start of a line this enters the reference's indentation. Anywhere else it enters
    /// [`Configuration::indent_width`] spaces, clipped to the end of the reference.
    pub fn press_tab(&mut self) -> EditOutcome {
        match whitespace::tab_text(&self.reference, self.input_len(), &self.config) {
            Some(text) => self.type_str(&text),
            None => EditOutcome::settled(EditStatus::Unchanged, self.is_completed()),
        }
    }

    /// Handle an Enter keystroke
    ///
    /// When only blank space remains before the next newline, this enters it along with the
    /// newline. Otherwise the keystroke follows [`Configuration::enter_fallback`].
    pub fn press_enter(&mut self) -> EditOutcome {
        match whitespace::enter_text(&self.reference, self.input_len()) {
            Some(text) => self.type_str(&text),
            None => match self.config.enter_fallback {
                EnterFallback::InsertNewline => self.type_char('\n'),
                EnterFallback::Ignore => {
                    EditOutcome::settled(EditStatus::Unchanged, self.is_completed())
                }
            },
        }
    }

    pub const fn reference(&self) -> &Reference {
        &self.reference
    }

    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// The current input as a string
    pub fn input(&self) -> String {
        self.input_handler.input_string()
    }

    pub fn input_chars(&self) -> &[char] {
        self.input_handler.input()
    }

    /// Number of characters entered so far. This is the boundary.
    pub const fn input_len(&self) -> usize {
        self.input_handler.input_len()
    }

    pub fn text_len(&self) -> usize {
        self.reference.len()
    }

    /// The reference character awaiting input
    pub fn current_character(&self) -> Option<char> {
        self.reference.char_at(self.input_len())
    }

    /// Kind of the segment awaiting input
    pub fn current_kind(&self) -> Option<SegmentKind> {
        self.reference.kind_at(self.input_len())
    }

    pub const fn mistakes(&self) -> usize {
        self.statistics.mistakes()
    }

    /// When the first character was entered
    pub const fn started_at(&self) -> Option<Timestamp> {
        self.statistics.started_at()
    }

    /// Milliseconds since the first character was entered, frozen at completion
    pub fn time_elapsed(&self) -> Option<u64> {
        self.statistics.elapsed(self.clock.now())
    }

    pub const fn is_completed(&self) -> bool {
        self.statistics.is_completed()
    }

    /// The final report, once completed
    pub const fn result(&self) -> Option<&SessionResult> {
        self.statistics.result()
    }

    /// Progress and mistakes of the running session
    pub fn live_stats(&self) -> LiveStats {
        LiveStats::calculate(self.input_len(), self.text_len(), self.mistakes())
    }

    /// Render the text using a generic renderer function
    pub fn render<T, F: FnMut(CharacterContext) -> T>(&self, renderer: F) -> Vec<T> {
        self.render_iter().map(renderer).collect()
    }

    /// Create an iterator over the per-character rendering contexts
    pub fn render_iter(&self) -> RenderingIterator<'_> {
        RenderingIterator::new(&self.reference, self.input_handler.input())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, Segment};

    fn session(segments: Vec<Segment>) -> (TypingSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new(0);
        let reference = Reference::new(segments).unwrap();
        (TypingSession::with_clock(reference, clock.clone()), clock)
    }

    #[test]
    fn test_session_new() {
        let (session, _) = session(vec![Segment::typed("hello world")]);

        assert_eq!(session.text_len(), 11);
        assert_eq!(session.input_len(), 0);
        assert_eq!(session.current_character(), Some('h'));
        assert_eq!(session.current_kind(), Some(SegmentKind::Typed));
        assert!(!session.is_completed());
        assert_eq!(session.started_at(), None);
        assert_eq!(session.time_elapsed(), None);
    }

    #[test]
    fn test_growth_counts_mistakes_and_starts_clock() {
        let (mut session, clock) = session(vec![Segment::typed("abcdef")]);
        clock.set(5_000);

        let outcome = session.apply_edit("axc");
        assert!(outcome.is_accepted());
        assert_eq!(outcome.mistakes_delta, 1);
        assert_eq!(session.mistakes(), 1);
        assert_eq!(session.started_at(), Some(5_000));

        clock.advance(1_000);
        let outcome = session.apply_edit("axcyz");
        assert_eq!(outcome.mistakes_delta, 2);
        assert_eq!(session.mistakes(), 3);
        // Start time is only set once
        assert_eq!(session.started_at(), Some(5_000));
        assert_eq!(session.time_elapsed(), Some(1_000));
    }

    #[test]
    fn test_protected_deletion() {
        let (mut session, _) = session(vec![Segment::auto("ab"), Segment::typed("cd")]);
        assert_eq!(session.input(), "ab");

        session.apply_edit("abc");
        assert!(session.apply_edit("ab").is_accepted());
        assert_eq!(session.input(), "ab");

        let outcome = session.apply_edit("a");
        assert_eq!(
            outcome.rejection(),
            Some(Rejection::ProtectedRegion { boundary: 1 })
        );
        assert_eq!(session.input(), "ab");
    }

    #[test]
    fn test_rewriting_entered_text() {
        let (mut session, _) = session(vec![Segment::typed("abcd")]);
        session.apply_edit("ab");

        let outcome = session.apply_edit("xbz");
        assert!(outcome.is_accepted());
        assert_eq!(outcome.mistakes_delta, 1);
        assert_eq!(session.input(), "xbz");

        assert!(session.apply_edit("xyz").is_accepted());
        assert!(session.apply_edit("x").is_accepted());
        assert_eq!(session.input(), "x");
        assert_eq!(session.mistakes(), 1);
    }

    #[test]
    fn test_auto_filled_text_cannot_be_rewritten() {
        let (mut session, _) = session(vec![Segment::auto("> "), Segment::typed("ab")]);

        let outcome = session.apply_edit(">>a");
        assert_eq!(
            outcome.rejection(),
            Some(Rejection::ProtectedRewrite { index: 1 })
        );
        assert_eq!(session.input(), "> ");
        assert_eq!(session.started_at(), None);
    }

    #[test]
    fn test_protected_deletion_at_segment_end() {
        let (mut session, _) = session(vec![Segment::auto("xy"), Segment::typed("zw")]);
        session.apply_edit("xyz");

        // Boundary 2 sits exactly at the end of "xy", which is allowed
        assert!(session.apply_edit("xy").is_accepted());
        assert!(!session.apply_edit("x").is_accepted());
        assert!(!session.backspace().is_accepted());
        assert_eq!(session.input(), "xy");
    }

    #[test]
    fn test_multi_character_deletion_in_typed_region() {
        let (mut session, _) = session(vec![Segment::auto("> "), Segment::typed("hello")]);
        session.type_str("hel");

        let outcome = session.apply_edit("> ");
        assert_eq!(outcome.status, EditStatus::Applied);
        assert_eq!(session.input(), "> ");
    }

    #[test]
    fn test_auto_fill_cascade() {
        let (mut session, _) = session(vec![
            Segment::typed("a"),
            Segment::auto("bc"),
            Segment::typed("d"),
        ]);

        let outcome = session.apply_edit("a");
        assert_eq!(session.input(), "abc");
        assert_eq!(outcome.auto_filled, 2);
        assert_eq!(outcome.mistakes_delta, 0);
        assert_eq!(session.mistakes(), 0);
    }

    #[test]
    fn test_auto_fill_after_wrong_character() {
        let (mut session, _) = session(vec![Segment::typed("a"), Segment::auto(";\n")]);

        let outcome = session.type_char('x');
        assert_eq!(session.input(), "x;\n");
        assert_eq!(outcome.mistakes_delta, 1);
        assert!(outcome.completed);
    }

    #[test]
    fn test_leading_auto_fill_does_not_start_clock() {
        let (session, _) = session(vec![Segment::auto("// header\n"), Segment::typed("x")]);

        assert_eq!(session.input(), "// header\n");
        assert_eq!(session.started_at(), None);
        assert_eq!(session.mistakes(), 0);
    }

    #[test]
    fn test_completion_stats() {
        let (mut session, clock) = session(vec![Segment::typed("hi")]);

        session.type_char('x');
        session.backspace();
        session.type_char('h');
        clock.set(600_000);
        let outcome = session.type_char('i');

        assert!(outcome.completed);
        let result = outcome.result.unwrap();
        assert_eq!(result.wpm, 0);
        assert_eq!(result.accuracy, 50);
        assert_eq!(result.mistakes, 1);
        assert_eq!(result.start_time, Some(0));
        assert_eq!(result.end_time, 600_000);
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn test_completed_session_is_read_only() {
        let (mut session, clock) = session(vec![Segment::typed("ok")]);
        session.apply_edit("ok");
        assert!(session.is_completed());

        clock.advance(10_000);
        let outcome = session.apply_edit("o");
        assert_eq!(outcome.rejection(), Some(Rejection::Completed));
        assert!(outcome.completed);
        assert!(outcome.result.is_none());
        assert_eq!(session.input(), "ok");

        // Elapsed time stops at completion
        assert_eq!(session.time_elapsed(), Some(0));
    }

    #[test]
    fn test_result_reported_once() {
        let (mut session, _) = session(vec![Segment::typed("a"), Segment::auto("b")]);

        let outcome = session.type_char('a');
        assert!(outcome.result.is_some());
        assert!(session.type_char('b').result.is_none());
    }

    #[test]
    fn test_all_auto_reference_completes_on_load() {
        let (session, _) = session(vec![Segment::auto("fixed")]);

        assert!(session.is_completed());
        let result = session.result().unwrap();
        assert_eq!(result.wpm, 0);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.start_time, None);
    }

    #[test]
    fn test_empty_reference_needs_begin() {
        let (mut session, _) = session(vec![]);

        assert!(!session.is_completed());
        assert!(!session.apply_edit("").is_accepted());
        assert!(!session.apply_edit("abc").is_accepted());
        assert!(!session.is_completed());

        let result = session.begin().unwrap();
        assert_eq!(result.wpm, 0);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.progress, 100);
        assert_eq!(result.mistakes, 0);
        assert!(session.is_completed());
    }

    #[test]
    fn test_begin_on_non_empty_reference() {
        let (mut session, _) = session(vec![Segment::typed("a")]);
        assert_eq!(session.begin(), None);
        assert!(!session.is_completed());
    }

    #[test]
    fn test_input_never_exceeds_reference() {
        let (mut session, _) = session(vec![Segment::typed("ab")]);

        let outcome = session.apply_edit("abcdef");
        assert!(outcome.completed);
        assert_eq!(session.input(), "ab");
        assert_eq!(session.mistakes(), 0);
    }

    #[test]
    fn test_idempotent_no_op() {
        let (mut session, clock) = session(vec![Segment::typed("abc")]);

        assert_eq!(session.apply_edit("").status, EditStatus::Unchanged);
        assert_eq!(session.started_at(), None);

        session.apply_edit("ax");
        clock.advance(500);
        let outcome = session.apply_edit("ax");
        assert_eq!(outcome.status, EditStatus::Unchanged);
        assert_eq!(outcome.mistakes_delta, 0);
        assert_eq!(session.mistakes(), 1);
        assert_eq!(session.started_at(), Some(0));
        assert!(!session.is_completed());
    }

    #[test]
    fn test_mistakes_monotonic_across_retries() {
        let (mut session, _) = session(vec![Segment::typed("abc")]);
        let mut last = 0;

        for _ in 0..3 {
            session.type_char('z');
            assert!(session.mistakes() > last);
            last = session.mistakes();
            session.backspace();
            assert_eq!(session.mistakes(), last);
        }

        session.type_str("abc");
        assert_eq!(session.mistakes(), 3);
        assert_eq!(session.result().unwrap().accuracy, 0);
    }

    #[test]
    fn test_whitespace_scenario() {
        let (mut session, _) = session(vec![Segment::typed("if(x){\n    \n}")]);

        session.type_str("if(x){\n");
        assert_eq!(session.input_len(), 7);

        let outcome = session.press_tab();
        assert_eq!(session.input_len(), 11);
        assert_eq!(outcome.mistakes_delta, 0);

        session.press_enter();
        assert_eq!(session.input_len(), 12);
        assert_eq!(session.mistakes(), 0);
    }

    #[test]
    fn test_tab_mid_line_counts_mistakes() {
        let (mut session, _) = session(vec![Segment::typed("a = b;")]);
        session.type_char('a');

        let outcome = session.press_tab();
        // Reference has " = " where four spaces were entered
        assert_eq!(session.input(), "a    ");
        assert_eq!(outcome.mistakes_delta, 2);
    }

    #[test]
    fn test_enter_fallback() {
        let (mut session, _) = session(vec![Segment::typed("ab\ncd")]);

        session.type_char('a');
        let outcome = session.press_enter();
        assert_eq!(session.input(), "a\n");
        assert_eq!(outcome.mistakes_delta, 1);

        let (session, _) = self::session(vec![Segment::typed("ab\ncd")]);
        let mut session = session.with_configuration(Configuration {
            enter_fallback: EnterFallback::Ignore,
            ..Configuration::default()
        });
        session.type_char('a');
        assert_eq!(session.press_enter().status, EditStatus::Unchanged);
        assert_eq!(session.input(), "a");
    }

    #[test]
    fn test_whitespace_skips_auto_filled_neighbours() {
        let (mut session, _) = session(vec![
            Segment::typed("fn x() {\n"),
            Segment::typed("    body();\n"),
            Segment::auto("}\n"),
        ]);

        session.type_str("fn x() {");
        session.press_enter();
        session.press_tab();
        let outcome = session.type_str("body();");
        assert!(!outcome.completed);

        let outcome = session.press_enter();
        assert!(outcome.completed);
        assert_eq!(outcome.auto_filled, 2);
        assert_eq!(session.mistakes(), 0);
    }

    #[test]
    fn test_load_reference_resets_state() {
        let (mut session, clock) = session(vec![Segment::typed("abc")]);
        session.type_str("xb");
        assert_eq!(session.mistakes(), 1);

        clock.set(9_000);
        session.load_reference(
            Reference::new([Segment::auto("# "), Segment::typed("z")]).unwrap(),
        );

        assert_eq!(session.input(), "# ");
        assert_eq!(session.mistakes(), 0);
        assert_eq!(session.started_at(), None);
        assert!(!session.is_completed());

        session.type_char('z');
        assert_eq!(session.result().unwrap().start_time, Some(9_000));
    }

    #[test]
    fn test_live_stats() {
        let (mut session, _) = session(vec![Segment::auto("ab"), Segment::typed("cd")]);
        assert_eq!(session.live_stats().progress, 50);

        session.type_char('x');
        let stats = session.live_stats();
        assert_eq!(stats.progress, 75);
        assert_eq!(stats.mistakes, 1);
    }

    #[test]
    fn test_unicode_input() {
        let (mut session, _) = session(vec![Segment::typed("café 🚀")]);

        session.apply_edit("café");
        assert_eq!(session.input_len(), 4);
        assert_eq!(session.mistakes(), 0);

        let outcome = session.apply_edit("café 🚀");
        assert!(outcome.completed);
    }
}

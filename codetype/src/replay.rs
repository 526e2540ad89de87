//! Keystroke scripts
//!
//! A script is plain text typed one character at a time. Special keys are written in angle
//! brackets:
//!
//! | Token       | Effect                                  |
//! |-------------|-----------------------------------------|
//! | `<Tab>`     | Tab shortcut                            |
//! | `<Enter>`   | Enter shortcut                          |
//! | `<BS>`      | one backspace                           |
//! | `<BS*n>`    | up to `n` backspaces                    |
//! | `<Wait:ms>` | advance the replay clock by `ms`        |
//! | `<Lt>`      | a literal `<`                           |
//!
//! Line breaks in the script are ignored, so long scripts can be wrapped. A real newline is
//! typed with `<Enter>`.

use std::path::{Path, PathBuf};

use derive_more::From;
use serde::Serialize;
use stencil::{
    Clock, Configuration, EditOutcome, ManualClock, Reference, SessionResult, TypingSession,
};
use thiserror::Error;

#[derive(Debug, From, Error)]
pub enum ReplayError {
    #[error("Failed to read key script '{path}': {error}")]
    #[from(skip)]
    ReadScript {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Unknown key token '<{token}>' at offset {offset}")]
    #[from(skip)]
    UnknownToken { token: String, offset: usize },

    #[error("Unterminated key token at offset {0}")]
    #[from(skip)]
    Unterminated(usize),
}

/// One step of a key script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Char(char),
    Tab,
    Enter,
    Backspace(usize),
    Wait(u64),
}

/// Read and parse a key script from disk
pub fn read_script(path: &Path) -> Result<Vec<Token>, ReplayError> {
    let script = std::fs::read_to_string(path).map_err(|error| ReplayError::ReadScript {
        path: path.to_path_buf(),
        error,
    })?;
    parse_script(&script)
}

/// Split a key script into tokens
///
/// Offsets in errors are byte offsets into the script.
pub fn parse_script(script: &str) -> Result<Vec<Token>, ReplayError> {
    let mut tokens = Vec::new();
    let mut chars = script.char_indices();

    while let Some((offset, char)) = chars.next() {
        match char {
            '\n' | '\r' => {}
            '<' => {
                let rest = &script[offset + 1..];
                let end = rest.find('>').ok_or(ReplayError::Unterminated(offset))?;
                let name = &rest[..end];

                tokens.push(parse_token(name).ok_or_else(|| ReplayError::UnknownToken {
                    token: name.to_string(),
                    offset,
                })?);

                // Skip the name and the closing bracket
                for _ in 0..=name.chars().count() {
                    chars.next();
                }
            }
            char => tokens.push(Token::Char(char)),
        }
    }

    Ok(tokens)
}

fn parse_token(name: &str) -> Option<Token> {
    match name {
        "Tab" => Some(Token::Tab),
        "Enter" => Some(Token::Enter),
        "BS" => Some(Token::Backspace(1)),
        "Lt" => Some(Token::Char('<')),
        _ => {
            if let Some(count) = name.strip_prefix("BS*") {
                count.parse().ok().map(Token::Backspace)
            } else if let Some(millis) = name.strip_prefix("Wait:") {
                millis.parse().ok().map(Token::Wait)
            } else {
                None
            }
        }
    }
}

/// What a replay ended with
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub lesson: String,
    pub file: String,
    /// Keystrokes sent to the session
    pub keys: usize,
    /// Keystrokes the session refused
    pub rejected: usize,
    pub input: String,
    pub completed: bool,
    /// Live progress, in percent
    pub progress: u32,
    pub mistakes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<SessionResult>,
}

/// Drives a session from a key script on a manual clock
pub struct Replayer {
    session: TypingSession<ManualClock>,
    keystroke_ms: u64,
    keys: usize,
    rejected: usize,
}

impl Replayer {
    /// The clock starts at zero
    pub fn new(reference: Reference, config: Configuration, keystroke_ms: u64) -> Self {
        let session =
            TypingSession::with_clock(reference, ManualClock::new(0)).with_configuration(config);
        Self {
            session,
            keystroke_ms,
            keys: 0,
            rejected: 0,
        }
    }

    pub fn run(&mut self, tokens: &[Token]) {
        for token in tokens {
            match *token {
                Token::Char(char) => self.key(|session| session.type_char(char)),
                Token::Tab => self.key(TypingSession::press_tab),
                Token::Enter => self.key(TypingSession::press_enter),
                Token::Backspace(count) => {
                    // Nothing is left to delete past the start of the input
                    for _ in 0..count.min(self.session.input_len()) {
                        self.key(TypingSession::backspace);
                    }
                }
                Token::Wait(millis) => self.session.clock().advance(millis),
            }
        }

        log::debug!(
            "Replayed {} keys ({} rejected) at {} ms",
            self.keys,
            self.rejected,
            self.session.clock().now()
        );
    }

    fn key<F>(&mut self, press: F)
    where
        F: FnOnce(&mut TypingSession<ManualClock>) -> EditOutcome,
    {
        self.session.clock().advance(self.keystroke_ms);
        self.keys += 1;

        let outcome = press(&mut self.session);
        if let Some(rejection) = outcome.rejection() {
            log::trace!("Key {} rejected: {rejection}", self.keys);
            self.rejected += 1;
        }
    }

    pub fn report(&self, lesson: &str, file: &str) -> ReplayReport {
        let live = self.session.live_stats();
        ReplayReport {
            lesson: lesson.to_string(),
            file: file.to_string(),
            keys: self.keys,
            rejected: self.rejected,
            input: self.session.input(),
            completed: self.session.is_completed(),
            progress: live.progress,
            mistakes: live.mistakes,
            result: self.session.result().copied(),
        }
    }
}

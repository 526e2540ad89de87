//! # Configuration Module - Runtime Behavior Settings
//!
//! This module provides configuration options for customizing how a typing session
//! reacts to the Tab and Enter shortcuts.
//!
//! ## Usage
//!
//! ```rust
//! use stencil::config::{Configuration, EnterFallback};
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.indent_width, 4);
//!
//! // Custom configuration
//! let config = Configuration {
//!     indent_width: 2,
//!     enter_fallback: EnterFallback::Ignore,
//! };
//! ```

/// What a plain Enter does when the rest of the line is not blank
///
/// The Enter shortcut only skips whitespace up to and including the next newline. When
/// there is real content before that newline, the keystroke falls back to this behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EnterFallback {
    /// Type a literal newline through the normal input path
    #[default]
    InsertNewline,
    /// Swallow the keystroke
    Ignore,
}

/// Runtime configuration for a typing session
///
/// All settings have defaults matching a conventional code editor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Configuration {
    /// Number of spaces inserted by Tab when the cursor is not at the start of a line
    ///
    /// **Default**: 4
    pub indent_width: usize,

    /// Behavior of Enter when the line-skip shortcut does not apply
    ///
    /// **Default**: [`EnterFallback::InsertNewline`]
    pub enter_fallback: EnterFallback,
}

impl Default for Configuration {
    /// Create configuration with recommended default values
    ///
    /// # Default Values
    ///
    /// - `indent_width`: 4
    /// - `enter_fallback`: [`EnterFallback::InsertNewline`]
    fn default() -> Self {
        Self {
            indent_width: 4,
            enter_fallback: EnterFallback::default(),
        }
    }
}

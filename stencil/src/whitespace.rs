//! # Whitespace Module - Tab and Enter Shortcuts
//!
//! Code is full of whitespace that carries no meaning for a typing drill: indentation and the
//! stray spaces before a line break. These helpers let the user jump over it in one keystroke.
//! The skipped text is still entered through the normal growth path, so it is scored like any
//! other input and can never hide real content.
//!
//! - **Tab** at the start of a line consumes the reference's indentation. Anywhere else it
//!   inserts [`Configuration::indent_width`] spaces.
//! - **Enter** consumes blank space up to and including the next newline.
//!
//! Both work on the reference text alone; segment kinds play no part.
//!
//! ```rust
//! use stencil::whitespace::{handle_enter, handle_tab};
//! use stencil::{Configuration, Reference, Segment};
//!
//! let reference = Reference::new([Segment::typed("if(x){\n    \n}")]).unwrap();
//! let config = Configuration::default();
//!
//! let after_tab = handle_tab(&reference, "if(x){\n", &config).unwrap();
//! assert_eq!(after_tab, "if(x){\n    ");
//!
//! let after_enter = handle_enter(&reference, &after_tab).unwrap();
//! assert_eq!(after_enter, "if(x){\n    \n");
//! ```

use crate::{Configuration, Reference};

const fn is_blank(char: char) -> bool {
    matches!(char, ' ' | '\t')
}

/// Check if `boundary` sits at the start of a reference line
pub fn is_line_start(reference: &Reference, boundary: usize) -> bool {
    boundary == 0 || reference.char_at(boundary - 1) == Some('\n')
}

/// Text that Tab appends at `boundary`
///
/// Returns the indentation run when at a line start, otherwise spaces clipped to the space left
/// in the reference. `None` if there is nothing to append.
pub fn tab_text(reference: &Reference, boundary: usize, config: &Configuration) -> Option<String> {
    if boundary >= reference.len() {
        return None;
    }

    if is_line_start(reference, boundary) {
        let indent: String = reference.chars()[boundary..]
            .iter()
            .take_while(|char| is_blank(**char))
            .collect();

        if !indent.is_empty() {
            return Some(indent);
        }
    }

    let width = config.indent_width.min(reference.len() - boundary);
    (width > 0).then(|| " ".repeat(width))
}

/// Text that Enter appends at `boundary`
///
/// Returns the blank run up to the next newline plus the newline itself. `None` when real
/// content comes first or no newline follows.
pub fn enter_text(reference: &Reference, boundary: usize) -> Option<String> {
    let rest = reference.chars().get(boundary..)?;
    let blank = rest.iter().take_while(|char| is_blank(**char)).count();

    (rest.get(blank) == Some(&'\n')).then(|| rest[..=blank].iter().collect())
}

/// Pre-process a Tab keystroke
///
/// Returns the input the host should propose to the session, or `None` to let the keystroke
/// through untouched.
pub fn handle_tab(
    reference: &Reference,
    current_input: &str,
    config: &Configuration,
) -> Option<String> {
    let boundary = current_input.chars().count();
    tab_text(reference, boundary, config).map(|text| format!("{current_input}{text}"))
}

/// Pre-process an Enter keystroke
///
/// Returns the input the host should propose to the session, or `None` to let the keystroke
/// through untouched.
pub fn handle_enter(reference: &Reference, current_input: &str) -> Option<String> {
    let boundary = current_input.chars().count();
    enter_text(reference, boundary).map(|text| format!("{current_input}{text}"))
}

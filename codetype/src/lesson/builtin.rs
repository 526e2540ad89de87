use super::{Lesson, LessonError};

/// Lessons shipped with the binary, as `(id, toml)`
const BUILTIN: [(&str, &str); 2] = [
    ("basics", include_str!("../../lessons/basics.toml")),
    ("helpers", include_str!("../../lessons/helpers.toml")),
];

/// Parse the built-in lessons
pub fn lessons() -> Result<Vec<Lesson>, LessonError> {
    BUILTIN
        .iter()
        .map(|(id, content)| Lesson::parse(id, content))
        .collect()
}

use std::{collections::BTreeMap, path::PathBuf};

use derive_more::From;
use serde::{Deserialize, Serialize};
use stencil::{ConfigurationError, Reference, Segment, SegmentKind};
use thiserror::Error;

pub mod builtin;

#[derive(Debug, From, Error)]
pub enum LessonError {
    #[error("Failed to read lessons directory '{directory}': {error}")]
    #[from(skip)]
    ReadDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to create lessons directory '{directory}': {error}")]
    #[from(skip)]
    CreateDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to read file: {0}")]
    ReadFile(std::io::Error),

    #[error("Failed to parse file: {0}")]
    ParseFile(toml::de::Error),

    #[error("Invalid segments in '{lesson}/{file}': {error}")]
    #[from(skip)]
    InvalidSegments {
        lesson: String,
        file: String,
        error: ConfigurationError,
    },

    #[error("Lesson '{lesson}' is invalid: {reason}")]
    #[from(skip)]
    Invalid { lesson: String, reason: String },

    #[error("No lesson named '{0}'")]
    #[from(skip)]
    UnknownLesson(String),

    #[error("Lesson '{lesson}' has no file named '{file}'")]
    #[from(skip)]
    UnknownFile { lesson: String, file: String },
}

/// Load the built-in lessons, then every `*.toml` lesson in `from_dir`
///
/// Lessons are keyed by file stem. A file in `from_dir` replaces a built-in with the same id.
pub fn get_lessons(from_dir: &PathBuf) -> Result<BTreeMap<String, Lesson>, LessonError> {
    if !from_dir.exists() {
        std::fs::create_dir_all(from_dir).map_err(|error| LessonError::CreateDirectory {
            directory: from_dir.clone(),
            error,
        })?;
    }

    let files = from_dir
        .read_dir()
        .map_err(|error| LessonError::ReadDirectory {
            directory: from_dir.clone(),
            error,
        })?;

    let mut lessons = BTreeMap::new();
    for lesson in builtin::lessons()? {
        lessons.insert(lesson.id.clone(), lesson);
    }

    for entry in files.into_iter() {
        let dir_entry = entry?;
        let path = dir_entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "toml") {
            continue;
        }

        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            log::warn!("Skipping lesson with a non UTF-8 name: {}", path.display());
            continue;
        };

        let content = std::fs::read_to_string(&path)?;
        let lesson = Lesson::parse(id, &content)?;

        log::debug!("Loaded lesson '{id}' from {}", path.display());
        if lessons.insert(lesson.id.clone(), lesson).is_some() {
            log::info!("Lesson '{id}' replaces the built-in lesson");
        }
    }

    Ok(lessons)
}

/// Programming language of a lesson file
///
/// Unknown names fall back to [`Language::CCpp`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case")]
pub enum Language {
    #[default]
    #[serde(rename = "c_cpp")]
    #[strum(serialize = "c_cpp")]
    CCpp,
    Python,
    Java,
    Csharp,
    Javascript,
    Typescript,
}

impl From<String> for Language {
    fn from(name: String) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::debug!("Unknown language '{name}', using c_cpp");
            Self::default()
        })
    }
}

/// A lesson file as written on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonConfig {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub files: Vec<FileConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub name: String,
    #[serde(default)]
    pub language: Language,
    /// Explicit segment list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentConfig>>,
    /// Plain content tagged line by line through `line_kinds`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_kinds: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub kind: String,
    pub text: String,
}

impl FileConfig {
    /// Build the reference text for this file
    ///
    /// `content` loses its trailing whitespace before it is split into lines. Missing line
    /// kinds default to typed.
    pub fn reference(&self) -> Result<Reference, ConfigurationError> {
        if let Some(segments) = &self.segments {
            let segments = segments
                .iter()
                .map(|segment| {
                    SegmentKind::from_tag(&segment.kind)
                        .map(|kind| Segment::new(segment.text.clone(), kind))
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Reference::new(segments);
        }

        let kinds = self
            .line_kinds
            .iter()
            .map(|tag| SegmentKind::from_tag(tag))
            .collect::<Result<Vec<_>, _>>()?;
        let content = self.content.as_deref().unwrap_or_default().trim_end();

        Ok(Reference::from_lines(content, &kinds))
    }
}

/// One file of a loaded lesson, ready to be typed
#[derive(Debug, Clone)]
pub struct LessonFile {
    pub name: String,
    pub language: Language,
    pub reference: Reference,
}

/// A validated lesson
#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub files: Vec<LessonFile>,
}

impl Lesson {
    /// Parse and validate a lesson from TOML
    pub fn parse(id: &str, content: &str) -> Result<Self, LessonError> {
        let config: LessonConfig = toml::from_str(content)?;
        Self::from_config(id, config)
    }

    /// Validate a lesson and build the references of its files
    pub fn from_config(id: &str, config: LessonConfig) -> Result<Self, LessonError> {
        let invalid = |reason: String| LessonError::Invalid {
            lesson: id.to_string(),
            reason,
        };

        if config.title.trim().is_empty() {
            return Err(invalid("the title is empty".to_string()));
        }
        if config.description.trim().is_empty() {
            return Err(invalid("the description is empty".to_string()));
        }
        if config.files.is_empty() {
            return Err(invalid("there are no files".to_string()));
        }

        let mut files: Vec<LessonFile> = Vec::with_capacity(config.files.len());
        for file in config.files {
            let name = file.name.trim().to_string();
            if name.is_empty() {
                return Err(invalid("a file has no name".to_string()));
            }
            if files.iter().any(|existing| existing.name == name) {
                return Err(invalid(format!("the file name '{name}' is used twice")));
            }
            if file.segments.is_some() == file.content.is_some() {
                return Err(invalid(format!(
                    "'{name}' must give exactly one of `segments` or `content`"
                )));
            }

            let reference = file
                .reference()
                .map_err(|error| LessonError::InvalidSegments {
                    lesson: id.to_string(),
                    file: name.clone(),
                    error,
                })?;
            if reference.is_empty() {
                return Err(invalid(format!("'{name}' has no content")));
            }

            files.push(LessonFile {
                name,
                language: file.language,
                reference,
            });
        }

        Ok(Self {
            id: id.to_string(),
            title: config.title,
            description: config.description,
            tags: config.tags,
            files,
        })
    }

    /// Look up a file by name, or take the first one
    pub fn file(&self, name: Option<&str>) -> Result<&LessonFile, LessonError> {
        let found = match name {
            Some(name) => self.files.iter().find(|file| file.name == name),
            None => self.files.first(),
        };

        found.ok_or_else(|| LessonError::UnknownFile {
            lesson: self.id.clone(),
            file: name.unwrap_or_default().to_string(),
        })
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.name.as_str()).collect()
    }
}

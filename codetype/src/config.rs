use std::{collections::BTreeMap, path::PathBuf};

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use stencil::{Configuration, EnterFallback};
use thiserror::Error;

use crate::lesson::{self, Lesson, LessonError};

/// How reports are printed
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
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub lessons_dir: Option<PathBuf>,
    /// Spaces entered by Tab in the middle of a line
    pub indent_width: usize,
    pub enter_fallback: EnterFallback,
    pub output_format: OutputFormat,
    /// Replay clock step per keystroke, in milliseconds
    pub keystroke_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let session = Configuration::default();
        Self {
            lessons_dir: None,
            indent_width: session.indent_width,
            enter_fallback: session.enter_fallback,
            output_format: OutputFormat::default(),
            keystroke_ms: 200,
        }
    }
}

impl Settings {
    /// The engine configuration these settings describe
    pub const fn session_configuration(&self) -> Configuration {
        Configuration {
            indent_width: self.indent_width,
            enter_fallback: self.enter_fallback,
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to load lessons: {0}")]
    Lessons(LessonError),
}

#[derive(Debug, Default)]
pub struct Config {
    pub settings: Settings,
    pub lessons: BTreeMap<String, Lesson>,
}

impl Config {
    pub fn list_lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.values()
    }

    pub fn lesson(&self, id: &str) -> Result<&Lesson, LessonError> {
        self.lessons
            .get(id)
            .ok_or_else(|| LessonError::UnknownLesson(id.to_string()))
    }

    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Grab default configuration
        let mut settings = Figment::from(Serialized::defaults(Settings::default()));

        // Check for toml file location
        let config_dir = override_path
            .or_else(|| {
                ProjectDirs::from("com", "CodeType", "CodeType")
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        // Ensure path exists
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings_toml = config_dir.join("settings.toml");
        if settings_toml.exists() {
            log::debug!("Reading settings from {}", settings_toml.display());
            settings = settings.merge(Toml::file(settings_toml));
        }

        let mut settings: Settings = settings
            .merge(Env::prefixed("CODETYPE_"))
            .extract()
            .map_err(Box::new)?;

        let lessons_dir = settings
            .lessons_dir
            .clone()
            .unwrap_or_else(|| config_dir.join("lessons"));
        let lessons = lesson::get_lessons(&lessons_dir)?;
        log::info!(
            "Loaded {} lessons from {}",
            lessons.len(),
            lessons_dir.display()
        );
        settings.lessons_dir = Some(lessons_dir);

        Ok(Self { settings, lessons })
    }
}

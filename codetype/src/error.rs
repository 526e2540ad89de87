use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;
use crate::lesson::LessonError;
use crate::replay::ReplayError;

#[derive(Debug, From, Error)]
pub enum Error {
    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Lesson(LessonError),

    #[error(transparent)]
    Replay(ReplayError),

    #[error("Failed to write output: {0}")]
    Output(std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Toml(toml::ser::Error),

    #[error("Failed to serialize report: {0}")]
    Json(serde_json::Error),
}

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures that can happen before the first frame. All of them are fatal.
#[derive(Debug)]
pub enum LoadError {
    Sprite {
        path: PathBuf,
        source: image::ImageError,
    },
    Config {
        path: PathBuf,
        source: ConfigSource,
    },
    InvalidConfig(String),
}

#[derive(Debug)]
pub enum ConfigSource {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Sprite { path, .. } => {
                write!(f, "failed to load sprite {}", path.display())
            }
            LoadError::Config { path, source } => match source {
                ConfigSource::Io(_) => write!(f, "failed to read config {}", path.display()),
                ConfigSource::Json(_) => write!(f, "malformed config {}", path.display()),
            },
            LoadError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Sprite { source, .. } => Some(source),
            LoadError::Config { source, .. } => match source {
                ConfigSource::Io(e) => Some(e),
                ConfigSource::Json(e) => Some(e),
            },
            LoadError::InvalidConfig(_) => None,
        }
    }
}

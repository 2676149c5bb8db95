// One error type for the whole painter.
// Every variant states *where* things went wrong.
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Bad symbol file {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },
    #[error("Image size mismatch: stored {stored:?}, new {new:?}")]
    DimensionMismatch { stored: (u32, u32), new: (u32, u32) },

    #[error("Provide an appropriate symbol name!")]
    EmptyLabel,
    #[error("Set the symbol class first!")]
    LabelNotSet,
    #[error("Blank image, it will not be added")]
    EmptyStroke,

    #[error("PNG export error: {0}")]
    Export(#[from] image::ImageError),
}

impl Error {
    /// Attach the offending path to an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn format(path: &Path, reason: impl Into<String>) -> Self {
        Error::Format {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

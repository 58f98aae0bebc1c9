//! Error types for icon conversion.
//!
//! Every failure of a conversion lands in [`Error`]. Callers that only care
//! about the coarse category (decode, encode, write, config, inspect) can use
//! [`Error::kind`].
//!
//! # Example
//!
//! ```no_run
//! # use std::path::Path;
//! use png2ico::error::{ErrorExt, Result};
//!
//! fn read_logo(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path).fs_context("reading logo", path)
//! }
//! ```

use crate::utils::fs::parent_dir;
use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Errors returned by the converter.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// The source image does not exist.
    #[error("Logo file not found: {}", path.display())]
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The source image exists but could not be read or decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// Path of the source image
        path: PathBuf,
        /// The underlying decoder error
        #[source]
        source: image::ImageError,
    },

    /// The configured size list cannot be used for an icon.
    #[error("invalid icon sizes: {0}")]
    InvalidSizes(String),

    /// A resized variant or the icon directory could not be encoded.
    #[error("encoding {what}: {source}")]
    Encode {
        /// What was being encoded (e.g., "16x16 icon entry")
        what: String,
        /// The underlying encoder error
        #[source]
        source: image::ImageError,
    },

    /// The assembled container does not list the variants that went into it.
    #[error("icon directory mismatch: expected {expected:?}, found {found:?}")]
    Verify {
        /// Dimensions that were requested
        expected: Vec<(u32, u32)>,
        /// Dimensions recorded in the container
        found: Vec<(u32, u32)>,
    },

    /// The output file could not be written.
    #[error("{context} {}: {error}", path.display())]
    Write {
        /// Operation that failed (e.g., "persisting icon file")
        context: &'static str,
        /// Path that was being written
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// File system error with path context. Created by [`ErrorExt`].
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// Category the failing operation belongs to
        kind: ErrorKind,
        /// Operation that failed
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// The config file is not valid TOML or has unexpected keys.
    #[error("invalid config file {}: {source}", path.display())]
    Config {
        /// Path of the config file
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: toml::de::Error,
    },
}

/// Coarse failure category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading or decoding the source image failed.
    Decode,
    /// Building or encoding the icon container failed.
    Encode,
    /// Writing the output file failed.
    Write,
    /// The configuration was rejected or could not be read.
    Config,
    /// An existing icon file could not be read back.
    Inspect,
}

impl Error {
    /// Category of this error, looking through any added context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Context(_, inner) => inner.kind(),
            Error::Fs { kind, .. } => *kind,
            Error::InputNotFound { .. } | Error::Decode { .. } => ErrorKind::Decode,
            Error::Encode { .. } | Error::Verify { .. } => ErrorKind::Encode,
            Error::Write { .. } => ErrorKind::Write,
            Error::InvalidSizes(_) | Error::Config { .. } => ErrorKind::Config,
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Error::Context(_, inner) => inner.recovery_suggestions(),
            Error::InputNotFound { path } => vec![
                format!("Place the source logo at {}", path.display()),
                "Or pass a different input path as the first argument".to_string(),
            ],
            Error::Decode { .. } => vec![
                "Check that the input is a valid PNG (or other supported raster) image"
                    .to_string(),
            ],
            Error::InvalidSizes(_) => vec![
                "Icon sizes must be between 1 and 256 pixels, e.g. --sizes 16,32,48,256"
                    .to_string(),
            ],
            Error::Write { path, .. } => vec![
                format!(
                    "Make sure the directory {} exists and is writable",
                    parent_dir(path).display()
                ),
                "Check available disk space".to_string(),
            ],
            Error::Config { .. } => vec![
                "Supported keys: input, output, sizes, filter".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T>: Sized {
    /// Add filesystem context to an I/O error while reading the source image.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating temporary file".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.fs_context_as(ErrorKind::Decode, context, path)
    }

    /// Add filesystem context to an I/O error, classified as `kind`.
    fn fs_context_as(
        self,
        kind: ErrorKind,
        context: &'static str,
        path: impl Into<PathBuf>,
    ) -> Result<T>;

    /// Same as [`ErrorExt::fs_context`] but classified as an output write failure.
    fn write_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context_as(
        self,
        kind: ErrorKind,
        context: &'static str,
        path: impl Into<PathBuf>,
    ) -> Result<T> {
        self.map_err(|error| Error::Fs {
            kind,
            context,
            path: path.into(),
            error,
        })
    }

    fn write_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Write {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_keeps_kind() {
        let err: Result<()> = Err(Error::InvalidSizes("empty".into()));
        let err = err.context("loading config").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(err.to_string(), "loading config: invalid icon sizes: empty");
    }

    #[test]
    fn test_write_context_is_write_kind() {
        let res: std::io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = res.write_context("creating temporary file in", "missing/icon.ico").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Write);
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_fs_context_carries_kind() {
        let res: std::io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = res
            .fs_context_as(ErrorKind::Config, "reading config file", "png2ico.toml")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let res: std::io::Result<()> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = res.fs_context("opening source image", "logo.png").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_write_suggestion_names_current_dir_for_bare_file() {
        let err = Error::Write {
            context: "persisting",
            path: PathBuf::from("icon.ico"),
            error: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(err.recovery_suggestions()[0].contains("directory . exists"));
    }

    #[test]
    fn test_missing_input_message() {
        let err = Error::InputNotFound {
            path: PathBuf::from("public/logo.png"),
        };
        assert_eq!(err.to_string(), "Logo file not found: public/logo.png");
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}

//! # png2ico
//!
//! Converts a raster image (typically a PNG logo) into a multi-resolution
//! Windows icon file.
//!
//! ## Features
//!
//! - **Standard sizes**: 16, 32, 48, 64, 128 and 256 pixel frames by default
//! - **Exact frames**: every variant is resampled to its exact target size
//! - **High-quality resampling**: Lanczos3 by default, configurable
//! - **Atomic output**: the icon is assembled in memory and written through a
//!   temporary file, so a failed run never leaves a truncated icon behind
//!
//! ## Usage
//!
//! ```bash
//! png2ico                                  # public/logo.png -> public/icon.ico
//! png2ico assets/logo.png build/app.ico    # explicit paths
//! png2ico logo.png app.ico --sizes 16,32   # custom size set
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod error;
pub mod icon;
pub mod utils;

pub use config::{ConverterConfig, DEFAULT_SIZES, IconSize, ResizeFilter};
pub use error::{Error, ErrorKind, Result};
pub use icon::{ConversionReport, IconConverter, IconEntryInfo, ResizedVariant, convert, inspect};

//! PNG to ICO conversion.
//!
//! The pipeline is strictly linear:
//!
//! 1. decode the source image,
//! 2. resample it to every configured size (aspect ratio is not preserved;
//!    icon frames are forced to their exact target size),
//! 3. assemble and encode the ICO container in memory,
//! 4. write the container to disk in one atomic step.
//!
//! Nothing touches the output path until step 4, so any failure leaves the
//! previous file (if any) in place.
//!
//! # Example
//!
//! ```no_run
//! use png2ico::{ConverterConfig, IconConverter, IconSize};
//! use std::path::Path;
//!
//! # fn main() -> png2ico::Result<()> {
//! let converter = IconConverter::new(ConverterConfig::with_sizes([
//!     IconSize::square(16),
//!     IconSize::square(32),
//! ]));
//! let report = converter.convert(Path::new("logo.png"), Path::new("app.ico"))?;
//! println!("wrote {} entries", report.entries.len());
//! # Ok(())
//! # }
//! ```

mod container;
mod source;

pub use container::{IconEntryInfo, build_container, encode_container, inspect, read_entries};
pub use source::{ResizedVariant, load_source, resize_exact};

use crate::config::ConverterConfig;
use crate::error::{Error, Result};
use crate::utils::fs::write_atomic;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Path of the icon that was written
    pub output: PathBuf,
    /// Source image width
    pub source_width: u32,
    /// Source image height
    pub source_height: u32,
    /// Entries recorded in the icon directory, in order
    pub entries: Vec<IconEntryInfo>,
    /// Size of the icon file
    pub bytes_written: usize,
}

/// Converts a raster image into a multi-resolution icon.
#[derive(Debug, Clone, Default)]
pub struct IconConverter {
    config: ConverterConfig,
}

impl IconConverter {
    /// Create a converter with the given settings.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Settings this converter runs with.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert `input` into an icon at `output`, replacing any existing file.
    pub fn convert(&self, input: &Path, output: &Path) -> Result<ConversionReport> {
        self.config.validate()?;

        let img = load_source(input)?;
        source::check_source(&img, &self.config.sizes);

        let variants = self.resize_variants(&img);
        let frames = build_container(&variants)?;
        let bytes = encode_container(&frames)?;

        // The directory must describe exactly the variants we produced.
        let entries = read_entries(&bytes).map_err(|e| Error::Encode {
            what: "icon directory (re-read)".to_string(),
            source: image::ImageError::IoError(e),
        })?;
        check_entries(&self.config, &entries)?;

        write_atomic(output, &bytes)?;
        log::info!(
            "Created ICO file with {} entries: {}",
            entries.len(),
            output.display()
        );

        Ok(ConversionReport {
            output: output.to_path_buf(),
            source_width: img.width(),
            source_height: img.height(),
            entries,
            bytes_written: bytes.len(),
        })
    }

    /// Resample `img` to every configured size, in configured order.
    pub fn resize_variants(&self, img: &DynamicImage) -> Vec<ResizedVariant> {
        self.config
            .sizes
            .iter()
            .map(|&size| resize_exact(img, size, self.config.filter))
            .collect()
    }
}

/// Convert with the default sizes and filter.
pub fn convert(input: &Path, output: &Path) -> Result<ConversionReport> {
    IconConverter::default().convert(input, output)
}

/// Fails unless `entries` lists exactly the configured sizes, in order.
pub fn check_entries(config: &ConverterConfig, entries: &[IconEntryInfo]) -> Result<()> {
    let expected: Vec<_> = config.sizes.iter().map(|s| s.dimensions()).collect();
    let found: Vec<_> = entries.iter().map(IconEntryInfo::dimensions).collect();

    if expected != found {
        return Err(Error::Verify { expected, found });
    }
    Ok(())
}

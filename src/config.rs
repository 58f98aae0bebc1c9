//! Conversion settings: target sizes, resampling filter and the optional
//! TOML config file.
//!
//! # Config file
//!
//! ```toml
//! input = "assets/logo.png"
//! output = "assets/app.ico"
//! filter = "lanczos3"
//! sizes = [16, 32, [48, 48], 256]
//! ```

use crate::error::{Error, ErrorExt, ErrorKind, Result};
use clap::ValueEnum;
use image::imageops::FilterType;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Source logo used when no input path is given.
pub const DEFAULT_INPUT: &str = "public/logo.png";

/// Icon file written when no output path is given.
pub const DEFAULT_OUTPUT: &str = "public/icon.ico";

/// Largest edge an ICO directory entry can describe.
pub const MAX_ICON_DIMENSION: u32 = 256;

/// Standard Windows icon sizes:
/// - 16x16: window title bars, small icons
/// - 32x32: Windows Explorer
/// - 48x48: Explorer large view
/// - 64x64, 128x128: extra large icons
/// - 256x256: high-res icons
pub const DEFAULT_SIZES: [IconSize; 6] = [
    IconSize::square(16),
    IconSize::square(32),
    IconSize::square(48),
    IconSize::square(64),
    IconSize::square(128),
    IconSize::square(256),
];

/// Target dimensions of one icon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "SizeRepr")]
pub struct IconSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl IconSize {
    /// A `width` x `height` size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square `edge` x `edge` size.
    pub const fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// Returns whether the size fits in an ICO directory entry.
    pub fn is_valid(&self) -> bool {
        (1..=MAX_ICON_DIMENSION).contains(&self.width)
            && (1..=MAX_ICON_DIMENSION).contains(&self.height)
    }

    /// The size as a `(width, height)` pair.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for IconSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for IconSize {
    type Err = String;

    /// Parses `"32"` (square) or `"32x48"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("'{s}' is not a valid icon size"))
        };

        let size = match s.split_once(['x', 'X']) {
            Some((w, h)) => IconSize::new(parse(w)?, parse(h)?),
            None => IconSize::square(parse(s)?),
        };

        if !size.is_valid() {
            return Err(format!(
                "icon size {size} is out of range (1..={MAX_ICON_DIMENSION})"
            ));
        }
        Ok(size)
    }
}

/// Accepted TOML shapes for a size: `32` or `[32, 48]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Square(u32),
    Pair(u32, u32),
}

impl TryFrom<SizeRepr> for IconSize {
    type Error = String;

    fn try_from(repr: SizeRepr) -> std::result::Result<Self, Self::Error> {
        let size = match repr {
            SizeRepr::Square(edge) => IconSize::square(edge),
            SizeRepr::Pair(width, height) => IconSize::new(width, height),
        };
        if size.is_valid() {
            Ok(size)
        } else {
            Err(format!(
                "icon size {size} is out of range (1..={MAX_ICON_DIMENSION})"
            ))
        }
    }
}

/// Resampling filter used to scale the source image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbor
    Nearest,
    /// Linear (bilinear)
    Triangle,
    /// Cubic (Catmull-Rom)
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Icon entries to produce, in container order.
    pub sizes: Vec<IconSize>,
    /// Filter used for every resize.
    pub filter: ResizeFilter,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            filter: ResizeFilter::default(),
        }
    }
}

impl ConverterConfig {
    /// Config with the given sizes and the default filter.
    pub fn with_sizes(sizes: impl IntoIterator<Item = IconSize>) -> Self {
        Self {
            sizes: sizes.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Reject size lists that cannot produce a well-formed icon.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(Error::InvalidSizes("at least one size is required".into()));
        }

        for (i, size) in self.sizes.iter().enumerate() {
            if !size.is_valid() {
                return Err(Error::InvalidSizes(format!(
                    "{size} is out of range (1..={MAX_ICON_DIMENSION})"
                )));
            }
            if self.sizes[..i].contains(size) {
                return Err(Error::InvalidSizes(format!("{size} is listed twice")));
            }
        }

        Ok(())
    }
}

/// Contents of a TOML config file. All keys are optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Source image path
    pub input: Option<PathBuf>,
    /// Icon output path
    pub output: Option<PathBuf>,
    /// Target sizes
    pub sizes: Option<Vec<IconSize>>,
    /// Resampling filter
    pub filter: Option<ResizeFilter>,
}

impl FileConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).fs_context_as(
            ErrorKind::Config,
            "reading config file",
            path,
        )?;
        Self::parse(&contents, path)
    }

    /// Parse config file contents. `path` is only used for error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square_size() {
        assert_eq!("32".parse::<IconSize>(), Ok(IconSize::square(32)));
    }

    #[test]
    fn test_parse_rectangular_size() {
        assert_eq!("16x24".parse::<IconSize>(), Ok(IconSize::new(16, 24)));
        assert_eq!(" 48X48 ".parse::<IconSize>(), Ok(IconSize::square(48)));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("0".parse::<IconSize>().is_err());
        assert!("300".parse::<IconSize>().is_err());
        assert!("16x512".parse::<IconSize>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<IconSize>().is_err());
        assert!("16x".parse::<IconSize>().is_err());
    }

    #[test]
    fn test_default_sizes() {
        let config = ConverterConfig::default();
        let edges: Vec<u32> = config.sizes.iter().map(|s| s.width).collect();
        assert_eq!(edges, vec![16, 32, 48, 64, 128, 256]);
        assert!(config.sizes.iter().all(|s| s.width == s.height));
        assert_eq!(config.filter, ResizeFilter::Lanczos3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        let config = ConverterConfig::with_sizes(Vec::new());
        assert!(matches!(config.validate(), Err(Error::InvalidSizes(_))));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = ConverterConfig::with_sizes([IconSize::square(16), IconSize::square(16)]);
        assert!(matches!(config.validate(), Err(Error::InvalidSizes(_))));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let config = ConverterConfig::with_sizes([IconSize::square(512)]);
        assert!(matches!(config.validate(), Err(Error::InvalidSizes(_))));
    }

    #[test]
    fn test_file_config_parse() {
        let toml = r#"
            input = "assets/logo.png"
            filter = "catmull-rom"
            sizes = [16, [32, 32], 48]
        "#;
        let config = FileConfig::parse(toml, Path::new("png2ico.toml")).unwrap();
        assert_eq!(config.input, Some(PathBuf::from("assets/logo.png")));
        assert_eq!(config.output, None);
        assert_eq!(config.filter, Some(ResizeFilter::CatmullRom));
        assert_eq!(
            config.sizes,
            Some(vec![
                IconSize::square(16),
                IconSize::square(32),
                IconSize::square(48)
            ])
        );
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        let err = FileConfig::parse("colour = \"red\"", Path::new("png2ico.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_config_file_is_config_kind() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = FileConfig::load(&dir.path().join("png2ico.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_file_config_rejects_bad_size() {
        let err = FileConfig::parse("sizes = [1024]", Path::new("png2ico.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}

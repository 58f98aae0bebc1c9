//! Command line argument parsing and validation.
//!
//! With no arguments the tool converts the project logo at
//! `public/logo.png` into `public/icon.ico`.

use crate::config::{
    ConverterConfig, DEFAULT_INPUT, DEFAULT_OUTPUT, FileConfig, IconSize, ResizeFilter,
};
use crate::error::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Convert a PNG logo into a multi-resolution Windows icon
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "png2ico",
    version,
    about = "Convert a PNG logo into a multi-resolution Windows icon",
    long_about = "Resize a source image to the standard Windows icon sizes and pack them into one .ico file.

Usage:
  png2ico
  png2ico assets/logo.png
  png2ico assets/logo.png build/app.ico --sizes 16,32,256"
)]
pub struct Args {
    /// Source image [default: public/logo.png]
    #[arg(index = 1, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Icon file to write [default: public/icon.ico]
    #[arg(index = 2, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Icon sizes to embed, e.g. 16,32,48 or 32x32 [default: 16,32,48,64,128,256]
    #[arg(short, long, value_delimiter = ',', value_name = "SIZE")]
    pub sizes: Option<Vec<IconSize>>,

    /// Resampling filter [default: lanczos3]
    #[arg(short, long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// TOML file providing input, output, sizes and filter
    #[arg(short, long, value_name = "FILE", env = "PNG2ICO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Re-read the written icon and check its entries
    #[arg(long)]
    pub verify: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(sizes) = &self.sizes
            && sizes.is_empty()
        {
            return Err("--sizes needs at least one size".to_string());
        }

        Ok(())
    }

    /// Merge arguments with the config file (if any) and built-in defaults.
    ///
    /// Command line flags win over the config file.
    pub fn resolve(&self) -> Result<RuntimeConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path).context("loading settings")?,
            None => FileConfig::default(),
        };

        let defaults = ConverterConfig::default();
        Ok(RuntimeConfig {
            input: self
                .input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: self
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            converter: ConverterConfig {
                sizes: self.sizes.clone().or(file.sizes).unwrap_or(defaults.sizes),
                filter: self.filter.or(file.filter).unwrap_or(defaults.filter),
            },
            verify: self.verify,
        })
    }
}

/// Settings for one run, after merging flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Source image
    pub input: PathBuf,
    /// Icon output
    pub output: PathBuf,
    /// Sizes and filter
    pub converter: ConverterConfig,
    /// Re-read the output after writing
    pub verify: bool,
}

impl RuntimeConfig {
    /// Reject settings that would overwrite the source image.
    ///
    /// Paths that both exist are compared after canonicalization, so
    /// `./logo.png` and `logo.png` count as the same file.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if same_file(&self.input, &self.output) {
            return Err(format!(
                "Input and output must be different files (both are {})",
                self.input.display()
            ));
        }
        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_sizes_list() {
        let args = Args::try_parse_from(["png2ico", "in.png", "--sizes", "16,32x32,48"]).unwrap();
        assert_eq!(
            args.sizes,
            Some(vec![
                IconSize::square(16),
                IconSize::square(32),
                IconSize::square(48)
            ])
        );
    }

    #[test]
    fn test_parse_rejects_bad_size() {
        assert!(Args::try_parse_from(["png2ico", "--sizes", "16,1000"]).is_err());
    }

    #[test]
    fn test_validate_same_positional_paths() {
        let args = Args::try_parse_from(["png2ico", "logo.png", "logo.png"]).unwrap();
        assert!(args.resolve().unwrap().validate().is_err());
    }

    #[test]
    fn test_validate_same_path_from_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let logo = dir.path().join("logo.png");
        std::fs::write(&logo, b"png").unwrap();
        let config = dir.path().join("png2ico.toml");
        std::fs::write(&config, format!("output = {:?}\n", logo.display().to_string())).unwrap();

        // Input from the flag, output from the file, spelled differently
        let args = Args {
            input: Some(dir.path().join(".").join("logo.png")),
            config: Some(config),
            ..Args::default()
        };
        assert!(args.resolve().unwrap().validate().is_err());
    }

    #[test]
    fn test_validate_distinct_paths() {
        let runtime = Args::default().resolve().unwrap();
        assert!(runtime.validate().is_ok());
    }

    #[test]
    fn test_resolve_defaults() {
        let args = Args::default();
        let runtime = args.resolve().unwrap();
        assert_eq!(runtime.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(runtime.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(runtime.converter, ConverterConfig::default());
        assert!(!runtime.verify);
    }

    #[test]
    fn test_resolve_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input = \"from-file.png\"").unwrap();
        writeln!(file, "sizes = [16, 32]").unwrap();
        writeln!(file, "filter = \"nearest\"").unwrap();

        let args = Args {
            sizes: Some(vec![IconSize::square(64)]),
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let runtime = args.resolve().unwrap();

        assert_eq!(runtime.input, PathBuf::from("from-file.png"));
        assert_eq!(runtime.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(runtime.converter.sizes, vec![IconSize::square(64)]);
        assert_eq!(runtime.converter.filter, ResizeFilter::Nearest);
    }
}

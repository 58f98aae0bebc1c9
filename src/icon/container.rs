//! ICO container assembly and inspection.
//!
//! Every entry is stored as a 32-bit RGBA PNG, whatever the source pixels
//! look like, so readers that only accept RGBA PNG entries can load it.
//! Reading back goes through the `ico` crate.

use super::source::ResizedVariant;
use crate::error::{Error, ErrorExt, ErrorKind, Result};
use ico::{IconDir, IconDirEntry};
use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};
use std::io::Cursor;
use std::path::Path;

/// Directory metadata for one entry of an encoded icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconEntryInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Color depth
    pub bits_per_pixel: u16,
    /// Whether the image data is PNG-compressed
    pub is_png: bool,
}

impl IconEntryInfo {
    fn from_entry(entry: &IconDirEntry) -> Self {
        Self {
            width: entry.width(),
            height: entry.height(),
            bits_per_pixel: entry.bits_per_pixel(),
            is_png: entry.is_png(),
        }
    }

    /// The entry size as a `(width, height)` pair.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Builds one RGBA PNG frame per variant, in order.
pub fn build_container(variants: &[ResizedVariant]) -> Result<Vec<IcoFrame<'static>>> {
    variants
        .iter()
        .map(|variant| -> Result<IcoFrame<'static>> {
            let (width, height) = variant.pixels.dimensions();
            let frame = IcoFrame::as_png(
                variant.pixels.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )
            .map_err(|source| Error::Encode {
                what: format!("{}x{} icon entry", width, height),
                source,
            })?;
            log::debug!("Encoded {}x{} entry as RGBA png", width, height);
            Ok(frame)
        })
        .collect()
}

/// Serializes the frames into an in-memory icon file.
pub fn encode_container(frames: &[IcoFrame<'_>]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    IcoEncoder::new(&mut bytes)
        .encode_images(frames)
        .map_err(|source| Error::Encode {
            what: "icon directory".to_string(),
            source,
        })?;
    Ok(bytes)
}

/// Lists the entries of an encoded icon.
pub fn read_entries(bytes: &[u8]) -> std::io::Result<Vec<IconEntryInfo>> {
    let icon_dir = IconDir::read(Cursor::new(bytes))?;
    Ok(icon_dir
        .entries()
        .iter()
        .map(IconEntryInfo::from_entry)
        .collect())
}

/// Lists the entries of the icon file at `path`.
pub fn inspect(path: &Path) -> Result<Vec<IconEntryInfo>> {
    let bytes =
        std::fs::read(path).fs_context_as(ErrorKind::Inspect, "reading icon file", path)?;
    read_entries(&bytes).fs_context_as(ErrorKind::Inspect, "parsing icon file", path)
}

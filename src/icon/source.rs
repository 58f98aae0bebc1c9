//! Loading the source image and producing resized variants.

use crate::config::{IconSize, ResizeFilter};
use crate::error::{Error, ErrorExt, Result};
use image::{DynamicImage, ImageReader, RgbaImage};
use std::path::Path;

/// One resampled copy of the source image.
#[derive(Debug, Clone)]
pub struct ResizedVariant {
    /// Target size the variant was scaled to.
    pub size: IconSize,
    /// RGBA8 pixels, exactly `size.width * size.height`.
    pub pixels: RgbaImage,
}

/// Decodes the image at `path`.
///
/// The format is guessed from the file contents, so a PNG saved with an
/// uppercase or wrong extension still loads.
pub fn load_source(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = ImageReader::open(path)
        .fs_context("opening source image", path)?
        .with_guessed_format()
        .fs_context("reading source image", path)?;

    let img = reader.decode().map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "Loaded source image: {}x{} ({:?}) from {}",
        img.width(),
        img.height(),
        img.color(),
        path.display()
    );
    Ok(img)
}

/// Resizes `img` to exactly `size`, ignoring the aspect ratio.
pub fn resize_exact(img: &DynamicImage, size: IconSize, filter: ResizeFilter) -> ResizedVariant {
    let resized = img.resize_exact(size.width, size.height, filter.into());
    log::debug!("Resized to {} with {:?}", size, filter);

    ResizedVariant {
        size,
        pixels: resized.to_rgba8(),
    }
}

/// Warns about sources that will be distorted or blurred by the resize.
pub(crate) fn check_source(img: &DynamicImage, sizes: &[IconSize]) {
    let (width, height) = (img.width(), img.height());
    if width != height {
        log::warn!(
            "Source image is {}x{}, not square; variants will be stretched",
            width,
            height
        );
    }

    if let Some(largest) = sizes.iter().max_by_key(|s| s.width.max(s.height))
        && (largest.width > width || largest.height > height)
    {
        log::warn!(
            "Source image {}x{} is smaller than the {} target; it will be upscaled",
            width,
            height,
            largest
        );
    }
}

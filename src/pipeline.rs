//! Loading, generating, downsampling and writing glue around the distance field.
//!
//! Stages run strictly in order: `load`, `generate` (both fields and the mixer),
//! `finalize`, `save`. `run` strings them together and logs the duration of each stage.

use crate::config::SdfConfig;
use crate::distance_field::compute_fields;
use crate::error::{Result, SdfError};
use crate::mask_image::MaskImage;
use crate::mixer::mix;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;


/// Input and output files of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Joins both relative paths against `input_base`.
/// The output is resolved relative to the input directory for compatibility
/// with existing asset scripts, unless a separate `output_base` is given.
pub fn resolve_paths(
    input_base: &Path, input: &Path, output: &Path, output_base: Option<&Path>
) -> ResolvedPaths {
    ResolvedPaths {
        input: input_base.join(input),
        output: output_base.unwrap_or(input_base).join(output),
    }
}

/// Decodes an image file into RGBA pixels.
pub fn load(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();

    let image = image::open(path)
        .map_err(|source| SdfError::Io { path: path.to_path_buf(), source })?;

    Ok(image.to_rgba8())
}

/// Encodes an image into the format implied by the extension of `path`.
/// The whole file is encoded in memory first, so a failed encode writes nothing.
pub fn save(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source: image::ImageError| SdfError::Io { path: path.to_path_buf(), source };

    let format = ImageFormat::from_path(path).map_err(io_error)?;
    let encoded = encode(image, format).map_err(io_error)?;

    std::fs::write(path, encoded)
        .map_err(|error| io_error(image::ImageError::IoError(error)))
}

/// Encodes the field into `format`, dropping the alpha channel
/// for formats that cannot store it. The field is opaque, so nothing is lost.
fn encode(image: &RgbaImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8()),
        _ => DynamicImage::ImageRgba8(image.clone()),
    };

    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, format)?;
    Ok(encoded.into_inner())
}

/// Computes both distance fields of the image and mixes them
/// into a full-resolution grayscale field.
pub fn generate<I>(image: &I, config: &SdfConfig) -> Result<RgbaImage>
    where I: MaskImage + Sync + ?Sized
{
    config.validate()?;

    let (outside, inside) = compute_fields(image, config.search_radius, config.parallel)?;
    mix(&outside, &inside)
}

/// The height that keeps the aspect ratio of the source when scaled to `target_width`,
/// rounded to the nearest pixel but never zero.
pub fn target_height(source_width: u32, source_height: u32, target_width: u32) -> u32 {
    let scale = source_width as f64 / target_width as f64;
    let height = (source_height as f64 / scale).round();
    height.max(1.0) as u32
}

/// Resizes the mixed field to `target_width` with a bilinear filter.
pub fn finalize(mixed: RgbaImage, target_width: u32) -> Result<RgbaImage> {
    if target_width == 0 {
        return Err(SdfError::InvalidParameter { name: "target_width", value: target_width });
    }

    let (width, height) = mixed.dimensions();
    if width == 0 || height == 0 {
        return Err(SdfError::InvalidDimensions { width, height });
    }

    let target_height = target_height(width, height, target_width);
    if (target_width, target_height) == (width, height) {
        return Ok(mixed);
    }

    log::debug!("resizing {}x{} to {}x{}", width, height, target_width, target_height);
    Ok(image::imageops::resize(&mixed, target_width, target_height, FilterType::Triangle))
}

/// `generate` followed by `finalize`.
pub fn process<I>(image: &I, config: &SdfConfig) -> Result<RgbaImage>
    where I: MaskImage + Sync + ?Sized
{
    let mixed = generate(image, config)?;
    finalize(mixed, config.target_width)
}

/// Loads the input, computes the distance field and writes the output.
/// Nothing is written if any stage fails.
pub fn run(paths: &ResolvedPaths, config: &SdfConfig) -> Result<()> {
    config.validate()?;

    let start = Instant::now();
    let source = load(&paths.input)?;
    log::info!(
        "loaded `{}` ({}x{}) in {:.1?}",
        paths.input.display(), source.width(), source.height(), start.elapsed()
    );

    let start = Instant::now();
    log::info!("calculating fields with search radius {}", config.search_radius);
    let (outside, inside) = compute_fields(&source, config.search_radius, config.parallel)?;
    log::info!("took {:.1?}", start.elapsed());

    let start = Instant::now();
    log::info!("mixing fields");
    let mixed = mix(&outside, &inside)?;
    drop((outside, inside));
    log::info!("took {:.1?}", start.elapsed());

    let start = Instant::now();
    log::info!("resizing and saving `{}`", paths.output.display());
    let output = finalize(mixed, config.target_width)?;
    save(&output, &paths.output)?;
    log::info!("took {:.1?}", start.elapsed());

    Ok(())
}

//! Saving, loading and comparing rendered images.
//!
//! PPM output is written by hand as ASCII P3 with one pixel per line. Other
//! formats and all decoding go through the `image` crate.

use crate::renderer::{clamp_channel, color_to_rgb};
use crate::{Color, ImageBuffer, ImageIoError, ImageIoResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write an ASCII P3 PPM file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> ImageIoResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write an ASCII P3 PPM stream.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b] = color_to_rgb(image.get(x, y));
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}

/// Save in the format implied by the file extension.
///
/// `.ppm` goes through [`save_ppm`]; anything else is encoded by `image`.
pub fn save_image(buffer: &ImageBuffer, path: impl AsRef<Path>) -> ImageIoResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        return save_ppm(buffer, path);
    }

    image::save_buffer(
        path,
        &buffer.to_rgb8(),
        buffer.width,
        buffer.height,
        image::ColorType::Rgb8,
    )?;
    Ok(())
}

/// Load an image of any size.
///
/// The format is sniffed from the file contents, so fixtures with a
/// misleading extension still load.
pub fn read_image(path: impl AsRef<Path>) -> ImageIoResult<ImageBuffer> {
    let decoded = image::io::Reader::open(path.as_ref())?
        .with_guessed_format()?
        .decode()?
        .to_rgb8();

    let (width, height) = decoded.dimensions();
    let mut buffer = ImageBuffer::new(width, height);
    for (x, y, pixel) in decoded.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        buffer.set(x, y, Color::new(r as f32, g as f32, b as f32));
    }
    Ok(buffer)
}

/// Load an image and check it has the expected size.
pub fn load_image(
    path: impl AsRef<Path>,
    expected_width: u32,
    expected_height: u32,
) -> ImageIoResult<ImageBuffer> {
    let buffer = read_image(path)?;
    if (buffer.width, buffer.height) != (expected_width, expected_height) {
        return Err(ImageIoError::DimensionMismatch {
            expected_width,
            expected_height,
            actual_width: buffer.width,
            actual_height: buffer.height,
        });
    }
    Ok(buffer)
}

/// Average absolute difference per pixel, summed over the three channels.
///
/// `actual` is clamped to [0, 255] before comparing, since renders may
/// overshoot the displayable range.
pub fn average_diff(expected: &ImageBuffer, actual: &ImageBuffer) -> ImageIoResult<f64> {
    if (expected.width, expected.height) != (actual.width, actual.height) {
        return Err(ImageIoError::DimensionMismatch {
            expected_width: expected.width,
            expected_height: expected.height,
            actual_width: actual.width,
            actual_height: actual.height,
        });
    }
    if expected.pixels.is_empty() {
        return Ok(0.0);
    }

    let total: f64 = expected
        .pixels
        .iter()
        .zip(&actual.pixels)
        .map(|(e, a)| {
            let a = Color::new(clamp_channel(a.x), clamp_channel(a.y), clamp_channel(a.z));
            ((*e - a).abs().element_sum()) as f64
        })
        .sum();

    Ok(total / expected.pixels.len() as f64)
}

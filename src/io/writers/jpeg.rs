use image::RgbaImage;
use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Error, Result};

fn jpeg_dimensions(img: &RgbaImage) -> Result<(u16, u16)> {
    let (w, h) = img.dimensions();
    match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(Error::InvalidArgument {
            arg: "jpeg_dimensions",
            value: format!("{}x{}", w, h),
        }),
    }
}

/// Encodes an RGBA image as JPEG (alpha dropped) into `writer`.
pub fn encode_rgba_jpeg<W: std::io::Write>(
    writer: &mut W,
    img: &RgbaImage,
    quality: u8,
) -> Result<()> {
    let (cols, rows) = jpeg_dimensions(img)?;
    let encoder = Encoder::new(writer, quality);
    encoder.encode(img.as_raw(), cols, rows, ColorType::Rgba)?;
    Ok(())
}

pub fn write_rgba_jpeg(output: &Path, img: &RgbaImage) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    encode_rgba_jpeg(&mut writer, img, 100)
}

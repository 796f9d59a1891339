use image::{Rgba, RgbaImage};

pub const GRAY: [u8; 4] = [128, 128, 128, 255];

/// Single-colour image; every feature plane stays empty.
pub fn uniform(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Two-colour checkerboard over the whole image.
pub fn checkerboard(width: u32, height: u32, cell: u32, on: [u8; 4], off: [u8; 4]) -> RgbaImage {
    assert!(cell > 0, "cell size must be positive");
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba(on)
        } else {
            Rgba(off)
        }
    })
}

/// Gray image with a black/white checkerboard patch covering
/// `[x0, x0 + size) x [y0, y0 + size)`.
pub fn textured_block(
    width: u32,
    height: u32,
    x0: u32,
    y0: u32,
    size: u32,
    cell: u32,
) -> RgbaImage {
    assert!(cell > 0, "cell size must be positive");
    let mut img = uniform(width, height, GRAY);
    for y in y0..(y0 + size).min(height) {
        for x in x0..(x0 + size).min(width) {
            let on = ((x - x0) / cell + (y - y0) / cell) % 2 == 0;
            let v = if on { 255 } else { 0 };
            img.put_pixel(x, y, Rgba([v, v, v, 255]));
        }
    }
    img
}

/// Gray image with a solid pure-red rectangle.
pub fn saturated_patch(width: u32, height: u32, x0: u32, y0: u32, w: u32, h: u32) -> RgbaImage {
    let mut img = uniform(width, height, GRAY);
    for y in y0..(y0 + h).min(height) {
        for x in x0..(x0 + w).min(width) {
            img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }
    }
    img
}

/// Deterministic noisy gradient, busy enough to give every candidate a
/// different score.
pub fn busy(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let n = x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663);
        let r = ((x * 255) / width.max(1)) as u8;
        let g = (n % 251) as u8;
        let b = ((y * 255) / height.max(1)) as u8;
        Rgba([r, g, b, 255])
    })
}

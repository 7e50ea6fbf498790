//! Diagnostic border and label drawing for synthesized tiles.
//!
//! Cosmetic only: tiles are fully valid without either. Glyphs are a 5x7
//! bitmap font covering the characters the tile label needs, scaled by an
//! integer factor so every tile size renders the same text crisply.

use image::{Rgba, RgbaImage};

/// Alpha-blend `color` over the pixel at (x, y), bounds-checked.
fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let a = color.0[3] as u32;
    let inv = 255 - a;
    for i in 0..3 {
        dst.0[i] = ((color.0[i] as u32 * a + dst.0[i] as u32 * inv) / 255) as u8;
    }
    dst.0[3] = (a + dst.0[3] as u32 * inv / 255).min(255) as u8;
}

/// Stroke a border of the given thickness just inside the image edges.
pub fn stroke_border(img: &mut RgbaImage, thickness: u32, color: Rgba<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let t = thickness as i64;
    for y in 0..h {
        for x in 0..w {
            if x < t || y < t || x >= w - t || y >= h - t {
                blend_pixel(img, x, y, color);
            }
        }
    }
}

/// 5x7 glyph bitmap for the label character set. Each row is a u8 whose
/// low 5 bits are pixels, bit 4 leftmost.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g {
        ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
            Some([$a, $b, $c, $d, $e, $f, $g])
        };
    }

    match ch {
        '0' => g!(0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110),
        '1' => g!(0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110),
        '2' => g!(0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111),
        '3' => g!(0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110),
        '4' => g!(0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010),
        '5' => g!(0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110),
        '6' => g!(0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110),
        '7' => g!(0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000),
        '8' => g!(0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110),
        '9' => g!(0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100),

        'T' => g!(0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100),
        'I' => g!(0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110),
        'L' => g!(0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111),
        'E' => g!(0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111),
        'Z' => g!(0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111),
        'O' => g!(0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110),
        'M' => g!(0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001),

        ' ' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000),
        ':' => g!(0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00000, 0b00000),
        ',' => g!(0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000),
        '-' => g!(0b00000, 0b00000, 0b00000, 0b01110, 0b00000, 0b00000, 0b00000),

        _ => None,
    }
}

fn draw_char(img: &mut RgbaImage, x: i64, y: i64, ch: char, scale: u32, color: Rgba<u8>) {
    let Some(rows) = glyph5x7(ch) else {
        return;
    };
    let s = scale as i64;
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..5i64 {
            if bits & (1 << (4 - col)) != 0 {
                for dy in 0..s {
                    for dx in 0..s {
                        blend_pixel(img, x + col * s + dx, y + row as i64 * s + dy, color);
                    }
                }
            }
        }
    }
}

/// Draw `text` centered horizontally on `center_x`, top edge at `top_y`.
///
/// Glyphs are 5 pixels wide with 1 pixel spacing, both multiplied by
/// `scale`. Unknown characters render as blanks.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    center_x: i64,
    top_y: i64,
    text: &str,
    scale: u32,
    color: Rgba<u8>,
) {
    let advance = 6 * scale as i64;
    let width = advance * text.chars().count() as i64 - scale as i64;
    let mut x = center_x - width / 2;
    for ch in text.chars() {
        draw_char(img, x, top_y, ch, scale, color);
        x += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_covers_edges_and_leaves_interior_untouched() {
        let mut img = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
        stroke_border(&mut img, 2, Rgba([0, 0, 0, 255]));

        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(15, 15).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(8, 8).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_half_opaque_border_blends_instead_of_replacing() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([200, 200, 200, 255]));
        stroke_border(&mut img, 1, Rgba([0, 0, 0, 128]));

        let edge = img.get_pixel(0, 0).0;
        assert!(edge[0] > 0 && edge[0] < 200, "edge should darken, not black out");
    }

    #[test]
    fn test_text_draws_some_pixels_and_stays_in_bounds() {
        let mut img = RgbaImage::from_pixel(64, 32, Rgba([255, 255, 255, 255]));
        draw_text_centered(&mut img, 32, 8, "TILE 1,2", 1, Rgba([0, 0, 0, 255]));

        let dark = img.pixels().filter(|p| p.0[0] == 0).count();
        assert!(dark > 0, "label should rasterize at least one pixel");
    }

    #[test]
    fn test_offscreen_text_is_clipped_not_panicking() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        draw_text_centered(&mut img, -100, -100, "ZOOM 18", 3, Rgba([0, 0, 0, 255]));
        draw_text_centered(&mut img, 1000, 1000, "ZOOM 18", 3, Rgba([0, 0, 0, 255]));
    }
}

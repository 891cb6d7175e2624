//! Sprite decoding and half-block rendering.

use image::GenericImageView;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Pixels with alpha below this are treated as background.
const ALPHA_CUTOFF: u8 = 128;
const SILHOUETTE: Color = Color::Rgb(40, 40, 48);

/// RGBA pixels cropped to the opaque bounding box, row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl SpriteData {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    fn opaque(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixel(x, y).filter(|px| px[3] >= ALPHA_CUTOFF)
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, ApiError> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    let rgba = image.to_rgba8();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;
    for (x, y, px) in rgba.enumerate_pixels() {
        if px.0[3] >= ALPHA_CUTOFF {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x || min_y > max_y {
        return Err(ApiError::Malformed("sprite has no visible pixels".into()));
    }

    let crop_w = max_x - min_x + 1;
    let crop_h = max_y - min_y + 1;
    let mut pixels = Vec::with_capacity((crop_w * crop_h) as usize);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            pixels.push(rgba.get_pixel(x, y).0);
        }
    }
    Ok(SpriteData {
        width: crop_w,
        height: crop_h,
        pixels,
    })
}

/// Draws a sprite with upper/lower half blocks, two pixel rows per cell,
/// scaled down to fit and centered in the area.
pub struct SpriteArt<'a> {
    pub sprite: &'a SpriteData,
    pub silhouette: bool,
}

impl SpriteArt<'_> {
    fn color(&self, px: [u8; 4]) -> Color {
        if self.silhouette {
            SILHOUETTE
        } else {
            Color::Rgb(px[0], px[1], px[2])
        }
    }
}

impl Widget for SpriteArt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sprite = self.sprite;
        if area.width == 0 || area.height == 0 || sprite.width == 0 || sprite.height == 0 {
            return;
        }

        let cols = area.width as u32;
        let rows = area.height as u32 * 2;
        let scale = sprite.width.div_ceil(cols).max(sprite.height.div_ceil(rows)).max(1);
        let out_w = sprite.width.div_ceil(scale);
        let out_h = sprite.height.div_ceil(scale);
        let cells_h = out_h.div_ceil(2);
        let offset_x = area.x + ((cols - out_w.min(cols)) / 2) as u16;
        let offset_y = area.y + ((area.height as u32 - cells_h.min(area.height as u32)) / 2) as u16;

        for cy in 0..cells_h.min(area.height as u32) {
            for cx in 0..out_w.min(cols) {
                let sx = cx * scale;
                let top = sprite.opaque(sx, cy * 2 * scale);
                let bottom = sprite.opaque(sx, (cy * 2 + 1) * scale);
                let cell = &mut buf[(offset_x + cx as u16, offset_y + cy as u16)];
                match (top, bottom) {
                    (Some(top), Some(bottom)) => {
                        cell.set_symbol("▀")
                            .set_fg(self.color(top))
                            .set_bg(self.color(bottom));
                    }
                    (Some(top), None) => {
                        cell.set_symbol("▀").set_fg(self.color(top));
                    }
                    (None, Some(bottom)) => {
                        cell.set_symbol("▄").set_fg(self.color(bottom));
                    }
                    (None, None) => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_crops_transparent_border() {
        let mut image = RgbaImage::new(8, 8);
        for (x, y) in [(2, 3), (5, 3), (3, 6)] {
            image.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }

        let sprite = decode_sprite(&png_bytes(&image)).unwrap();
        assert_eq!((sprite.width, sprite.height), (4, 4));
        assert_eq!(sprite.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(sprite.pixel(1, 3), Some([255, 0, 0, 255]));
        assert_eq!(sprite.pixel(4, 0), None);
    }

    #[test]
    fn test_decode_rejects_blank_image() {
        let image = RgbaImage::new(4, 4);
        assert!(matches!(
            decode_sprite(&png_bytes(&image)),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_sprite(b"not an image"),
            Err(ApiError::Image(_))
        ));
    }

    #[test]
    fn test_render_uses_half_blocks() {
        let sprite = SpriteData {
            width: 2,
            height: 2,
            pixels: vec![[10, 20, 30, 255]; 4],
        };
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        SpriteArt {
            sprite: &sprite,
            silhouette: false,
        }
        .render(area, &mut buf);

        let drawn: Vec<_> = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() == "▀")
            .collect();
        assert_eq!(drawn.len(), 2);
        assert!(drawn
            .iter()
            .all(|cell| cell.fg == Color::Rgb(10, 20, 30) && cell.bg == Color::Rgb(10, 20, 30)));
    }

    #[test]
    fn test_silhouette_hides_colors() {
        let sprite = SpriteData {
            width: 1,
            height: 2,
            pixels: vec![[200, 10, 10, 255], [10, 200, 10, 255]],
        };
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        SpriteArt {
            sprite: &sprite,
            silhouette: true,
        }
        .render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.fg, SILHOUETTE);
        assert_eq!(cell.bg, SILHOUETTE);
    }
}

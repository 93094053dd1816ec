use crate::style::Rgb;

use super::font;

/// Owned RGBA8 pixel buffer. Everything is drawn here and copied into the
/// window's frame once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self { width, height, pixels: vec![0; (width * height * 4) as usize] };
        canvas.clear(Rgb::BLACK);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Colour at (x, y), if on the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        Some(Rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]))
    }

    pub fn clear(&mut self, c: Rgb) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = c.0;
            px[1] = c.1;
            px[2] = c.2;
            px[3] = 255;
        }
    }

    /// Alpha-blends one pixel; off-canvas coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: Rgb, a: u8) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let ar = a as u16;
        let iar = (255 - a) as u16;
        let px = &mut self.pixels[idx..idx + 4];
        px[0] = ((c.0 as u16 * ar + px[0] as u16 * iar) / 255) as u8;
        px[1] = ((c.1 as u16 * ar + px[1] as u16 * iar) / 255) as u8;
        px[2] = ((c.2 as u16 * ar + px[2] as u16 * iar) / 255) as u8;
        px[3] = 255;
    }

    pub fn put(&mut self, x: i32, y: i32, c: Rgb) {
        self.blend_pixel(x, y, c, 255);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, c: Rgb) {
        self.fill_rect_alpha(x, y, w, h, c, 255);
    }

    pub fn fill_rect_alpha(&mut self, x: i32, y: i32, w: u32, h: u32, c: Rgb, a: u8) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i32).min(self.width as i32);
        let y1 = (y + h as i32).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, c, a);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i32, y: i32, w: u32, h: u32, c: Rgb) {
        if w == 0 || h == 0 {
            return;
        }
        let x2 = x + w as i32 - 1;
        let y2 = y + h as i32 - 1;
        for px in x..=x2 {
            self.put(px, y, c);
            self.put(px, y2, c);
        }
        for py in y..=y2 {
            self.put(x, py, c);
            self.put(x2, py, c);
        }
    }

    /// Bresenham line stamped with a square brush `thickness` pixels wide.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), thickness: u32, c: Rgb) {
        if thickness == 0 {
            return;
        }
        let t = thickness as i32;
        let lo = -(t - 1) / 2;
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.fill_rect(x + lo, y + lo, thickness, thickness, c);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, c: Rgb) {
        let r = radius as i32;
        let r2 = r * r;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    self.put(cx + dx, cy + dy, c);
                }
            }
        }
    }

    /// 5x7 bitmap text; returns the drawn width in pixels.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: u32, c: Rgb) -> u32 {
        let mut cx = x;
        for ch in text.chars() {
            if let Some(rows) = font::glyph(ch) {
                for (ry, row) in rows.iter().enumerate() {
                    for rx in 0..5 {
                        if (row >> (4 - rx)) & 1 == 1 {
                            let px = cx + (rx * scale) as i32;
                            let py = y + (ry as u32 * scale) as i32;
                            self.fill_rect(px, py, scale, scale, c);
                        }
                    }
                }
            }
            cx += font::advance(scale) as i32;
        }
        (cx - x) as u32
    }

    /// Copies `src` with its top-left at (x, y), clipped to this canvas.
    pub fn blit(&mut self, src: &Canvas, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            let ty = y + sy;
            if ty < 0 || ty >= self.height as i32 {
                continue;
            }
            let x0 = x.max(0);
            let x1 = (x + src.width as i32).min(self.width as i32);
            if x0 >= x1 {
                return;
            }
            let s0 = ((sy as u32 * src.width + (x0 - x) as u32) * 4) as usize;
            let d0 = ((ty as u32 * self.width + x0 as u32) * 4) as usize;
            let n = ((x1 - x0) * 4) as usize;
            self.pixels[d0..d0 + n].copy_from_slice(&src.pixels[s0..s0 + n]);
        }
    }
}

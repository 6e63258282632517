//! Software framebuffer implementing [`Surface`].
//!
//! Shapes are rasterised into an RGB pixel buffer.  Text is not rasterised;
//! it is recorded as [`TextRun`]s for the front end to print natively.

use crate::background::Image;
use crate::collision::Rect;
use crate::surface::{Rgb, Surface};

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    text: Vec<TextRun>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![Rgb::default(); width as usize * height as usize],
            text: Vec::new(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    /// Clip a float span to pixel indices `[start, end)` within `0..limit`.
    fn span(start: f32, end: f32, limit: u32) -> (u32, u32) {
        let lo = start.max(0.0).floor() as u32;
        let hi = end.min(limit as f32).ceil().max(0.0) as u32;
        (lo.min(limit), hi)
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = color;
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.text.clear();
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        if image.width == 0 || image.height == 0 || dest.w <= 0.0 || dest.h <= 0.0 {
            return;
        }
        let (x0, x1) = Self::span(dest.x, dest.right(), self.width);
        let (y0, y1) = Self::span(dest.y, dest.bottom(), self.height);
        for y in y0..y1 {
            let v = ((y as f32 + 0.5 - dest.y) / dest.h * image.height as f32) as u32;
            for x in x0..x1 {
                let u = ((x as f32 + 0.5 - dest.x) / dest.w * image.width as f32) as u32;
                if let Some(color) = image.pixel(u.min(image.width - 1), v.min(image.height - 1)) {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (x0, x1) = Self::span(rect.x, rect.right(), self.width);
        let (y0, y1) = Self::span(rect.y, rect.bottom(), self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        let (x0, x1) = Self::span(cx - r, cx + r, self.width);
        let (y0, y1) = Self::span(cy - r, cy + r, self.height);
        for y in y0..y1 {
            let dy = y as f32 + 0.5 - cy;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r * r {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        self.text.push(TextRun {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }
}

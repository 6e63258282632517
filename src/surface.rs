//! The drawing surface the render pass paints onto, and its palette.

use crate::background::Image;
use crate::collision::Rect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// From a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

// ── Colour palette ────────────────────────────────────────────────────────────

/// Slate, used when no background image is available.
pub const C_BACKGROUND: Rgb = Rgb::from_hex(0x0f172a);
/// Emerald.
pub const C_ALIEN: Rgb = Rgb::from_hex(0x34d399);
/// Amber.
pub const C_BULLET: Rgb = Rgb::from_hex(0xfbbf24);
/// Blue.
pub const C_PLAYER: Rgb = Rgb::from_hex(0x60a5fa);
pub const C_HUD: Rgb = Rgb(255, 255, 255);

/// A raster target with a fixed logical size.
pub trait Surface {
    /// Logical `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Paint the whole surface, discarding whatever was drawn before.
    fn fill(&mut self, color: Rgb);

    /// Draw `image` stretched over `dest`.
    fn draw_image(&mut self, image: &Image, dest: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb);

    /// Draw a line of text whose baseline starts at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb);
}

// Copyright (c) 2026 rezky_nightky

use std::convert::Infallible;
use std::io;

use embedded_graphics::{
    mono_font::{iso_8859_7, MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use tiny_skia::{Paint, Pixmap, PremultipliedColorU8, Rect, Transform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// The 2D drawing operations the rain needs from whatever it paints on.
///
/// Coordinates are in pixels. Text is positioned by its alphabetic baseline.
pub trait DrawContext {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: u32, color: Rgba);
}

// Latin + Greek bitmap fonts, ordered by glyph height.
const FONTS: [&MonoFont<'static>; 8] = [
    &iso_8859_7::FONT_5X8,
    &iso_8859_7::FONT_6X10,
    &iso_8859_7::FONT_6X13,
    &iso_8859_7::FONT_8X13,
    &iso_8859_7::FONT_7X14,
    &iso_8859_7::FONT_9X15,
    &iso_8859_7::FONT_9X18,
    &iso_8859_7::FONT_10X20,
];

pub fn font_for_px(font_px: u32) -> &'static MonoFont<'static> {
    FONTS
        .iter()
        .rev()
        .copied()
        .find(|f| f.character_size.height <= font_px)
        .unwrap_or(FONTS[0])
}

pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> io::Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot allocate a {}x{} canvas", width, height),
            )
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        // Pixmap::pixel only bounds-checks the flat index.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    // premultiplied
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }
}

impl DrawContext for Canvas {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: u32, color: Rgba) {
        let style = MonoTextStyle::new(font_for_px(font_px), Rgb888::new(color.r, color.g, color.b));
        let origin = Point::new(x.round() as i32, y.round() as i32);
        let mut target = BlendTarget {
            pixmap: &mut self.pixmap,
            alpha: color.a,
        };
        let _ = Text::with_baseline(text, origin, style, Baseline::Alphabetic).draw(&mut target);
    }
}

struct BlendTarget<'a> {
    pixmap: &'a mut Pixmap,
    alpha: u8,
}

impl OriginDimensions for BlendTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }
}

impl DrawTarget for BlendTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = self.pixmap.width() as i32;
        let h = self.pixmap.height() as i32;
        let alpha = self.alpha;
        let data = self.pixmap.pixels_mut();
        for Pixel(p, c) in pixels {
            if p.x < 0 || p.y < 0 || p.x >= w || p.y >= h {
                continue;
            }
            let i = p.y as usize * w as usize + p.x as usize;
            data[i] = blend_over(data[i], c.r(), c.g(), c.b(), alpha);
        }
        Ok(())
    }
}

fn mul_div255(a: u8, b: u8) -> u8 {
    let v = a as u16 * b as u16 + 127;
    ((v + (v >> 8)) >> 8) as u8
}

fn blend_over(dst: PremultipliedColorU8, r: u8, g: u8, b: u8, a: u8) -> PremultipliedColorU8 {
    let inv = 255 - a;
    let out_r = mul_div255(r, a).saturating_add(mul_div255(dst.red(), inv));
    let out_g = mul_div255(g, a).saturating_add(mul_div255(dst.green(), inv));
    let out_b = mul_div255(b, a).saturating_add(mul_div255(dst.blue(), inv));
    let out_a = a.saturating_add(mul_div255(dst.alpha(), inv));
    PremultipliedColorU8::from_rgba(out_r, out_g, out_b, out_a).unwrap_or(dst)
}

// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::canvas::{DrawContext, Rgba};

/// Black at roughly 5% opacity; repeated every tick this leaves fading trails.
pub const FADE_COLOR: Rgba = Rgba::new(0, 0, 0, 13);
pub const GLYPH_COLOR: Rgba = Rgba::new(0x00, 0xFF, 0x00, 0xFF);
pub const DEFAULT_CELL_SIZE: u32 = 24;

/// Grid geometry over a drawing context.
///
/// `rows` and `columns` are left fractional (a 256px side with 24px cells
/// gives 10.667) and compared against integer rows as-is.
pub struct Surface<C> {
    ctx: C,
    width: u32,
    height: u32,
    cell_size: u32,
    rows: f64,
    columns: f64,
}

impl<C: DrawContext> Surface<C> {
    pub fn new(ctx: C, width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let rows = height as f64 / cell_size as f64;
        let columns = width as f64 / cell_size as f64;
        tracing::debug!(width, height, cell_size, rows, columns, "surface configured");
        Self {
            ctx,
            width,
            height,
            cell_size,
            rows,
            columns,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn rows(&self) -> f64 {
        self.rows
    }

    pub fn columns(&self) -> f64 {
        self.columns
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    pub fn random_column<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        (rng.random::<f64>() * self.columns).floor() as u32
    }

    /// Strictly past the last row; a drop may paint one row beyond `rows`
    /// before this turns true.
    pub fn is_below_bottom(&self, row: u32) -> bool {
        row as f64 > self.rows
    }

    pub fn fade_clear(&mut self) {
        let (w, h) = (self.width as f32, self.height as f32);
        self.ctx.fill_rect(0.0, 0.0, w, h, FADE_COLOR);
    }

    pub fn draw_glyph(&mut self, text: &str, column: u32, row: u32) {
        let x = column as f32 * self.cell_size as f32;
        let y = row as f32 * self.cell_size as f32;
        self.ctx.fill_text(text, x, y, self.cell_size, GLYPH_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::canvas::Canvas;

    #[derive(Default)]
    struct Recorder {
        rects: Vec<(f32, f32, f32, f32, Rgba)>,
        texts: Vec<(String, f32, f32, u32, Rgba)>,
    }

    impl DrawContext for Recorder {
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
            self.rects.push((x, y, w, h, color));
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: u32, color: Rgba) {
            self.texts.push((text.to_string(), x, y, font_px, color));
        }
    }

    fn surface_256() -> Surface<Recorder> {
        Surface::new(Recorder::default(), 256, 256, 24)
    }

    #[test]
    fn grid_counts_stay_fractional() {
        let s = surface_256();
        assert!((s.rows() - 10.6667).abs() < 1e-3);
        assert!((s.columns() - 10.6667).abs() < 1e-3);
    }

    #[test]
    fn below_bottom_is_strict() {
        let s = surface_256();
        assert!(!s.is_below_bottom(10));
        assert!(s.is_below_bottom(11));

        let even = Surface::new(Recorder::default(), 240, 240, 24);
        assert_eq!(even.rows(), 10.0);
        assert!(!even.is_below_bottom(10));
        assert!(even.is_below_bottom(11));
    }

    #[test]
    fn random_column_stays_in_range() {
        let s = surface_256();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 11];
        for _ in 0..2000 {
            let c = s.random_column(&mut rng);
            assert!((c as f64) < s.columns());
            seen[c as usize] = true;
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn fade_clear_covers_whole_surface() {
        let mut s = surface_256();
        s.fade_clear();
        assert_eq!(s.context().rects, vec![(0.0, 0.0, 256.0, 256.0, FADE_COLOR)]);
    }

    #[test]
    fn draw_glyph_scales_grid_to_pixels() {
        let mut s = surface_256();
        s.draw_glyph("Z", 3, 5);
        assert_eq!(
            s.context().texts,
            vec![("Z".to_string(), 72.0, 120.0, 24, GLYPH_COLOR)]
        );
    }

    #[test]
    fn fade_then_draw_differs_from_hard_clear() {
        let canvas = Canvas::new(64, 64).unwrap();
        let mut s = Surface::new(canvas, 64, 64, 24);
        s.draw_glyph("A", 0, 1);
        s.fade_clear();
        s.draw_glyph("B", 1, 2);

        let mut cleared = Canvas::new(64, 64).unwrap();
        cleared.clear();

        assert_ne!(s.context().data(), cleared.data());
        // Outside any glyph the fade raised alpha slightly without going opaque.
        let corner = s.context().pixel(63, 63).unwrap();
        assert!(corner.a > 0 && corner.a < 255);
    }
}

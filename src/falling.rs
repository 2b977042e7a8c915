// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::canvas::DrawContext;
use crate::glyphs::GlyphSource;
use crate::surface::Surface;

/// Once below the bottom, a drop respawns on a tick only when a uniform draw
/// exceeds this. Drops linger about ten ticks on average, so they reappear
/// staggered.
pub const RESPAWN_THRESHOLD: f64 = 0.9;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallingGlyph {
    pub glyph: String,
    pub column: u32,
    pub row: u32,
}

impl FallingGlyph {
    pub fn spawn<C, R>(glyphs: &mut GlyphSource, surface: &Surface<C>, rng: &mut R) -> Self
    where
        C: DrawContext,
        R: Rng + ?Sized,
    {
        Self {
            glyph: glyphs.next(),
            column: surface.random_column(rng),
            row: 0,
        }
    }

    pub fn respawn<C, R>(&mut self, glyphs: &mut GlyphSource, surface: &Surface<C>, rng: &mut R)
    where
        C: DrawContext,
        R: Rng + ?Sized,
    {
        *self = Self::spawn(glyphs, surface, rng);
    }

    pub fn render<C: DrawContext>(&self, surface: &mut Surface<C>) {
        surface.draw_glyph(&self.glyph, self.column, self.row);
    }

    /// Moves one row down. Returns true when the drop was sent back to the
    /// top.
    pub fn advance<C, R>(
        &mut self,
        glyphs: &mut GlyphSource,
        surface: &Surface<C>,
        rng: &mut R,
    ) -> bool
    where
        C: DrawContext,
        R: Rng + ?Sized,
    {
        self.row = self.row.saturating_add(1);
        if surface.is_below_bottom(self.row) && rng.random::<f64>() > RESPAWN_THRESHOLD {
            self.respawn(glyphs, surface, rng);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::canvas::Rgba;

    struct Null;

    impl DrawContext for Null {
        fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: Rgba) {}
        fn fill_text(&mut self, _: &str, _: f32, _: f32, _: u32, _: Rgba) {}
    }

    fn setup() -> (GlyphSource, Surface<Null>, StdRng) {
        (
            GlyphSource::new(),
            Surface::new(Null, 256, 256, 24),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn spawn_starts_at_top_with_next_glyph() {
        let (mut glyphs, surface, mut rng) = setup();
        let a = FallingGlyph::spawn(&mut glyphs, &surface, &mut rng);
        let b = FallingGlyph::spawn(&mut glyphs, &surface, &mut rng);
        assert_eq!(a.row, 0);
        assert_eq!(a.glyph, "α");
        assert_eq!(b.glyph, "β");
        assert!((a.column as f64) < surface.columns());
    }

    #[test]
    fn never_respawns_above_bottom() {
        let (mut glyphs, surface, mut rng) = setup();
        for _ in 0..200 {
            let mut d = FallingGlyph::spawn(&mut glyphs, &surface, &mut rng);
            let col = d.column;
            // rows is 10.667, so rows 1..=10 are on screen
            for expected in 1..=10 {
                assert!(!d.advance(&mut glyphs, &surface, &mut rng));
                assert_eq!(d.row, expected);
                assert_eq!(d.column, col);
            }
        }
    }

    #[test]
    fn respawns_eventually_below_bottom() {
        let (mut glyphs, surface, mut rng) = setup();
        let mut d = FallingGlyph::spawn(&mut glyphs, &surface, &mut rng);
        d.row = 10;
        let mut fired = false;
        for _ in 0..500 {
            let before = d.row;
            if d.advance(&mut glyphs, &surface, &mut rng) {
                fired = true;
                assert_eq!(d.row, 0);
                break;
            }
            assert_eq!(d.row, before + 1);
        }
        assert!(fired);
    }

    #[test]
    fn linger_below_bottom_averages_about_ten_ticks() {
        let (mut glyphs, surface, mut rng) = setup();
        let trials = 2000;
        let mut total = 0u64;
        for _ in 0..trials {
            let mut d = FallingGlyph::spawn(&mut glyphs, &surface, &mut rng);
            d.row = 10;
            let mut n = 0u64;
            while !d.advance(&mut glyphs, &surface, &mut rng) {
                n += 1;
            }
            total += n + 1;
        }
        let mean = total as f64 / trials as f64;
        assert!((8.0..12.0).contains(&mean), "mean linger {}", mean);
    }

    #[test]
    fn render_does_not_move_the_drop() {
        let (mut glyphs, mut surface, mut rng) = setup();
        let d = FallingGlyph::spawn(&mut glyphs, &surface, &mut rng);
        let before = d.clone();
        d.render(&mut surface);
        assert_eq!(d, before);
    }
}

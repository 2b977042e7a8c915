// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, SeedableRng};

use crate::canvas::DrawContext;
use crate::falling::FallingGlyph;
use crate::glyphs::GlyphSource;
use crate::surface::Surface;

pub const DEFAULT_DROPS: usize = 9;

/// Owns the drops and everything they draw from. Has no clock of its own:
/// whoever holds it calls [`RainEngine::tick`] on a fixed interval.
pub struct RainEngine<C> {
    surface: Surface<C>,
    glyphs: GlyphSource,
    drops: Vec<FallingGlyph>,
    rng: StdRng,
    ticks: u64,
}

impl<C: DrawContext> RainEngine<C> {
    pub fn new(surface: Surface<C>, drops: usize) -> Self {
        Self::with_rng(surface, drops, StdRng::from_os_rng())
    }

    pub fn with_rng(surface: Surface<C>, drops: usize, rng: StdRng) -> Self {
        Self::with_source(surface, drops, GlyphSource::new(), rng)
    }

    pub fn with_source(
        surface: Surface<C>,
        drops: usize,
        mut glyphs: GlyphSource,
        mut rng: StdRng,
    ) -> Self {
        let drops: Vec<FallingGlyph> = (0..drops)
            .map(|_| FallingGlyph::spawn(&mut glyphs, &surface, &mut rng))
            .collect();
        tracing::info!(
            drops = drops.len(),
            rows = surface.rows(),
            columns = surface.columns(),
            "rain engine ready"
        );
        Self {
            surface,
            glyphs,
            drops,
            rng,
            ticks: 0,
        }
    }

    /// Fade the surface once, then paint and step each drop in turn.
    ///
    /// Each drop is painted at its current row before it moves, so what lands
    /// on the surface this tick is the pre-advance position.
    pub fn tick(&mut self) {
        self.surface.fade_clear();

        let mut respawned = 0usize;
        for d in &mut self.drops {
            d.render(&mut self.surface);
            if d.advance(&mut self.glyphs, &self.surface, &mut self.rng) {
                respawned += 1;
            }
        }

        self.ticks = self.ticks.wrapping_add(1);
        tracing::trace!(tick = self.ticks, respawned, "tick");
    }

    pub fn drops(&self) -> &[FallingGlyph] {
        &self.drops
    }

    pub fn glyphs(&self) -> &GlyphSource {
        &self.glyphs
    }

    pub fn surface(&self) -> &Surface<C> {
        &self.surface
    }

    pub fn into_surface(self) -> Surface<C> {
        self.surface
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

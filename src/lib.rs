// Copyright (c) 2026 rezky_nightky

//! Falling-glyph rain painted onto a 2D surface.
//!
//! [`RainEngine`] owns a fixed set of [`FallingGlyph`] drops that share one
//! [`GlyphSource`] and one [`Surface`]. Each [`RainEngine::tick`] fades the
//! surface a little and paints every drop one row further down, which leaves
//! a trail behind each glyph. The engine keeps no time; call `tick` from
//! whatever interval drives the consumer of the pixels.
//!
//! The rest of the crate is the consumer shell used by the `glyphrain`
//! binary: a terminal texture that samples the [`Canvas`] after each tick.

pub mod canvas;
pub mod cell;
pub mod config;
pub mod engine;
pub mod falling;
pub mod frame;
pub mod glyphs;
pub mod logging;
pub mod palette;
pub mod surface;
pub mod terminal;
pub mod texture;

pub use canvas::{Canvas, DrawContext, Rgba};
pub use engine::{RainEngine, DEFAULT_DROPS};
pub use falling::{FallingGlyph, RESPAWN_THRESHOLD};
pub use glyphs::{parse_glyph_list, read_glyph_file, GlyphSource, DEFAULT_GLYPHS};
pub use surface::{Surface, DEFAULT_CELL_SIZE};

// Copyright (c) 2026 rezky_nightky

use crate::canvas::Canvas;
use crate::cell::Cell;
use crate::frame::Frame;
use crate::palette::{luma, terminal_color, ColorMode};

// Composited brightness at which a mono terminal shows a pixel as lit.
const MONO_LIT_LUMA: u8 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub cols: u16,
    pub lines: u16,
    pub px_height: u32,
}

pub fn fit_viewport(term_w: u16, term_h: u16, tex_w: u32, tex_h: u32) -> Viewport {
    let avail_w = term_w.max(1) as f64;
    let avail_h = (term_h.max(1) as f64) * 2.0;
    let tex_w_f = tex_w.max(1) as f64;
    let tex_h_f = tex_h.max(1) as f64;
    let scale = (avail_w / tex_w_f).min(avail_h / tex_h_f);

    let cols = ((tex_w_f * scale).round() as u16).clamp(1, term_w.max(1));
    let px_height = ((tex_h_f * scale).round() as u32).clamp(1, avail_h as u32);
    let lines = (px_height.div_ceil(2) as u16).clamp(1, term_h.max(1));

    Viewport {
        x: (term_w.saturating_sub(cols)) / 2,
        y: (term_h.saturating_sub(lines)) / 2,
        cols,
        lines,
        px_height,
    }
}

// Nothing tells the texture when the canvas changes: the owner marks it
// after each tick and upload resamples only when marked.
pub struct Texture {
    frame: Frame,
    view: Viewport,
    mode: ColorMode,
    needs_update: bool,
}

impl Texture {
    pub fn new(term_w: u16, term_h: u16, tex_w: u32, tex_h: u32, mode: ColorMode) -> Self {
        Self {
            frame: Frame::new(term_w, term_h),
            view: fit_viewport(term_w, term_h, tex_w, tex_h),
            mode,
            needs_update: true,
        }
    }

    pub fn resize(&mut self, term_w: u16, term_h: u16, tex_w: u32, tex_h: u32) {
        self.frame = Frame::new(term_w, term_h);
        self.view = fit_viewport(term_w, term_h, tex_w, tex_h);
        self.needs_update = true;
    }

    pub fn viewport(&self) -> Viewport {
        self.view
    }

    pub fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub fn upload(&mut self, canvas: &Canvas) -> bool {
        if !self.needs_update {
            return false;
        }
        let v = self.view;
        let cw = canvas.width() as f64;
        let ch = canvas.height() as f64;

        for cy in 0..v.lines {
            for cx in 0..v.cols {
                let sx = (((cx as f64 + 0.5) * cw / v.cols as f64) as u32).min(canvas.width() - 1);
                let top = self.sample(canvas, sx, cy as u32 * 2, ch);
                let bottom = self.sample(canvas, sx, cy as u32 * 2 + 1, ch);

                let cell = if self.mode == ColorMode::Mono {
                    let lit = |p: Option<(u8, u8, u8)>| {
                        p.is_some_and(|(r, g, b)| luma(r, g, b) >= MONO_LIT_LUMA)
                    };
                    Cell::mono(lit(top), lit(bottom))
                } else {
                    let color = |p: Option<(u8, u8, u8)>| {
                        p.and_then(|(r, g, b)| terminal_color(self.mode, r, g, b))
                    };
                    Cell::half_block(color(top), color(bottom))
                };
                self.frame.set(v.x + cx, v.y + cy, cell);
            }
        }

        self.needs_update = false;
        true
    }

    fn sample(&self, canvas: &Canvas, sx: u32, vy: u32, ch: f64) -> Option<(u8, u8, u8)> {
        if vy >= self.view.px_height {
            return None;
        }
        let sy = (((vy as f64 + 0.5) * ch / self.view.px_height as f64) as u32)
            .min(canvas.height() - 1);
        let p = canvas.pixel(sx, sy)?;
        let over_black = |c: u8| ((c as u16 * p.a as u16 + 127) / 255) as u8;
        Some((over_black(p.r), over_black(p.g), over_black(p.b)))
    }
}

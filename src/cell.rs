// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

// Upper half block: fg paints the top pixel, bg the bottom one.
pub const HALF_UPPER: char = '▀';
pub const HALF_LOWER: char = '▄';
pub const FULL_BLOCK: char = '█';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: None,
        bg: None,
    };

    pub fn half_block(top: Option<Color>, bottom: Option<Color>) -> Self {
        Self {
            ch: HALF_UPPER,
            fg: top,
            bg: bottom,
        }
    }

    pub fn mono(top_lit: bool, bottom_lit: bool) -> Self {
        let ch = match (top_lit, bottom_lit) {
            (true, true) => FULL_BLOCK,
            (true, false) => HALF_UPPER,
            (false, true) => HALF_LOWER,
            (false, false) => ' ',
        };
        Self { ch, ..Self::BLANK }
    }
}

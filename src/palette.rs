// Copyright (c) 2026 rezky_nightky

use std::env;

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Color16,
    Color256,
    TrueColor,
}

impl ColorMode {
    pub fn label(self) -> &'static str {
        match self {
            ColorMode::TrueColor => "24-bit truecolor",
            ColorMode::Color256 => "8-bit (256-color)",
            ColorMode::Color16 => "16-color",
            ColorMode::Mono => "mono",
        }
    }

    pub fn from_bits(bits: u16) -> Result<Self, String> {
        match bits {
            0 => Ok(ColorMode::Mono),
            16 => Ok(ColorMode::Color16),
            8 | 256 => Ok(ColorMode::Color256),
            24 | 32 => Ok(ColorMode::TrueColor),
            _ => Err(format!(
                "invalid --colormode: {} (allowed: 0,16,8,256,24,32)",
                bits
            )),
        }
    }
}

pub fn detect_color_mode_auto() -> ColorMode {
    let colorterm = env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    color_mode_from_env(&colorterm, &term)
}

fn color_mode_from_env(colorterm: &str, term: &str) -> ColorMode {
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorMode::TrueColor;
    }
    if term == "dumb" {
        return ColorMode::Mono;
    }
    ColorMode::Color256
}

fn dist2(r0: u8, g0: u8, b0: u8, r1: u8, g1: u8, b1: u8) -> i32 {
    let dr = (r0 as i32) - (r1 as i32);
    let dg = (g0 as i32) - (g1 as i32);
    let db = (b0 as i32) - (b1 as i32);
    (dr * dr) + (dg * dg) + (db * db)
}

pub fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    let r6 = ((r as u16 * 5) + 127) / 255;
    let g6 = ((g as u16 * 5) + 127) / 255;
    let b6 = ((b as u16 * 5) + 127) / 255;

    let cube_idx = 16 + (36 * r6 as u8) + (6 * g6 as u8) + (b6 as u8);
    let cube_dist = dist2(
        r,
        g,
        b,
        CUBE_LEVELS[r6 as usize],
        CUBE_LEVELS[g6 as usize],
        CUBE_LEVELS[b6 as usize],
    );

    let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
    let gray_idx = match avg {
        0..=7 => 16,
        239..=255 => 231,
        v => 232 + ((v - 8) / 10),
    };
    let gv = match gray_idx {
        16 => 0,
        231 => 255,
        i => 8 + 10 * (i - 232),
    };
    if dist2(r, g, b, gv, gv, gv) < cube_dist {
        gray_idx
    } else {
        cube_idx
    }
}

pub fn rgb_to_color16(r: u8, g: u8, b: u8) -> Color {
    const TABLE: [(Color, (u8, u8, u8)); 16] = [
        (Color::Black, (0, 0, 0)),
        (Color::DarkGrey, (128, 128, 128)),
        (Color::Grey, (192, 192, 192)),
        (Color::White, (255, 255, 255)),
        (Color::DarkRed, (128, 0, 0)),
        (Color::Red, (255, 0, 0)),
        (Color::DarkGreen, (0, 128, 0)),
        (Color::Green, (0, 255, 0)),
        (Color::DarkBlue, (0, 0, 128)),
        (Color::Blue, (0, 0, 255)),
        (Color::DarkCyan, (0, 128, 128)),
        (Color::Cyan, (0, 255, 255)),
        (Color::DarkMagenta, (128, 0, 128)),
        (Color::Magenta, (255, 0, 255)),
        (Color::DarkYellow, (128, 128, 0)),
        (Color::Yellow, (255, 255, 0)),
    ];

    let mut best = Color::Black;
    let mut best_d = i32::MAX;
    for (c, (cr, cg, cb)) in TABLE {
        let d = dist2(r, g, b, cr, cg, cb);
        if d < best_d {
            best_d = d;
            best = c;
        }
    }
    best
}

pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

pub fn terminal_color(mode: ColorMode, r: u8, g: u8, b: u8) -> Option<Color> {
    match mode {
        ColorMode::Mono => None,
        ColorMode::TrueColor => Some(Color::Rgb { r, g, b }),
        ColorMode::Color256 => Some(Color::AnsiValue(rgb_to_ansi256(r, g, b))),
        ColorMode::Color16 => Some(rgb_to_color16(r, g, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_green_maps_to_cube_corner() {
        assert_eq!(rgb_to_ansi256(0, 255, 0), 46);
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }

    #[test]
    fn mid_gray_prefers_gray_ramp() {
        let idx = rgb_to_ansi256(128, 128, 128);
        assert!((232..=255).contains(&idx));
    }

    #[test]
    fn color16_picks_nearest() {
        assert_eq!(rgb_to_color16(0, 240, 10), Color::Green);
        assert_eq!(rgb_to_color16(0, 120, 0), Color::DarkGreen);
        assert_eq!(rgb_to_color16(3, 3, 3), Color::Black);
    }

    #[test]
    fn env_detection_order() {
        assert_eq!(color_mode_from_env("truecolor", "xterm"), ColorMode::TrueColor);
        assert_eq!(color_mode_from_env("", "dumb"), ColorMode::Mono);
        assert_eq!(color_mode_from_env("", "xterm-256color"), ColorMode::Color256);
        assert_eq!(color_mode_from_env("", "xterm"), ColorMode::Color256);
    }

    #[test]
    fn colormode_bits() {
        assert_eq!(ColorMode::from_bits(8), Ok(ColorMode::Color256));
        assert_eq!(ColorMode::from_bits(32), Ok(ColorMode::TrueColor));
        assert!(ColorMode::from_bits(7).is_err());
    }

    #[test]
    fn mono_has_no_color() {
        assert_eq!(terminal_color(ColorMode::Mono, 0, 255, 0), None);
        assert_eq!(
            terminal_color(ColorMode::TrueColor, 1, 2, 3),
            Some(Color::Rgb { r: 1, g: 2, b: 3 })
        );
    }

    #[test]
    fn luma_of_green_is_bright() {
        assert!(luma(0, 255, 0) > 128);
        assert_eq!(luma(0, 0, 0), 0);
    }
}

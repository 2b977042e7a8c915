// Copyright (c) 2026 rezky_nightky

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

pub const DEFAULT_GLYPHS: [&str; 10] = ["α", "β", "γ", "δ", "ε", "ζ", "η", "θ", "ι", "κ"];

type Sequence = Arc<[String]>;

/// Cycles through an ordered glyph sequence.
///
/// The sequence lives behind a shared handle so a background load can swap
/// it while the tick loop keeps reading. The swap always replaces the whole
/// sequence; readers see either the old list or the new one.
pub struct GlyphSource {
    glyphs: Arc<RwLock<Sequence>>,
    cursor: usize,
}

impl Default for GlyphSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSource {
    pub fn new() -> Self {
        let seq: Sequence = DEFAULT_GLYPHS.iter().map(|s| s.to_string()).collect();
        Self {
            glyphs: Arc::new(RwLock::new(seq)),
            cursor: 0,
        }
    }

    pub fn from_glyphs(glyphs: Vec<String>) -> Option<Self> {
        if glyphs.is_empty() {
            return None;
        }
        Some(Self {
            glyphs: Arc::new(RwLock::new(glyphs.into())),
            cursor: 0,
        })
    }

    pub fn snapshot(&self) -> Arc<[String]> {
        let guard = self.glyphs.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Always false: construction and `replace` both refuse empty lists.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn cursor(&self) -> usize {
        self.cursor % self.len()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> String {
        let seq = self.snapshot();
        // A replacement may have shrunk the list under us.
        self.cursor %= seq.len();
        let glyph = seq[self.cursor].clone();
        self.cursor = (self.cursor + 1) % seq.len();
        glyph
    }

    /// Swaps in a whole new sequence. Empty lists are rejected.
    pub fn replace(&self, glyphs: Vec<String>) -> bool {
        replace_shared(&self.glyphs, glyphs)
    }

    /// Loads a newline-delimited glyph list on a background thread and swaps
    /// it in when the read completes. A failed read is logged and leaves the
    /// current sequence in place.
    ///
    /// Glyphs are drawn with ISO-8859-7 bitmap fonts, so anything outside
    /// Latin and Greek (Cyrillic, kana) renders as `?`.
    pub fn load_from(&self, path: impl Into<PathBuf>) -> JoinHandle<()> {
        let path = path.into();
        let shared = Arc::clone(&self.glyphs);
        thread::spawn(move || match read_glyph_file(&path) {
            Ok(glyphs) => {
                let count = glyphs.len();
                if replace_shared(&shared, glyphs) {
                    tracing::info!(path = %path.display(), count, "glyph list loaded");
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load glyph list");
            }
        })
    }
}

fn replace_shared(shared: &RwLock<Sequence>, glyphs: Vec<String>) -> bool {
    if glyphs.is_empty() {
        tracing::warn!("ignoring empty glyph list");
        return false;
    }
    let seq: Sequence = glyphs.into();
    let mut guard = shared.write().unwrap_or_else(PoisonError::into_inner);
    *guard = seq;
    true
}

pub fn parse_glyph_list(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_uppercase())
        .collect()
}

pub fn read_glyph_file(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_glyph_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence_wraps_after_ten() {
        let mut src = GlyphSource::new();
        assert_eq!(src.len(), 10);
        let first = src.next();
        for _ in 1..10 {
            src.next();
        }
        assert_eq!(src.next(), first);
    }

    #[test]
    fn next_returns_elements_in_order() {
        let mut src = GlyphSource::new();
        let got: Vec<String> = (0..10).map(|_| src.next()).collect();
        assert_eq!(got, DEFAULT_GLYPHS.to_vec());
    }

    #[test]
    fn from_glyphs_rejects_empty() {
        assert!(GlyphSource::from_glyphs(Vec::new()).is_none());
    }

    #[test]
    fn parse_uppercases_and_keeps_lines() {
        let v = parse_glyph_list("neo\r\ntrinity\nmorpheus");
        assert_eq!(v, vec!["NEO", "TRINITY", "MORPHEUS"]);
    }

    #[test]
    fn parse_uppercases_greek() {
        assert_eq!(parse_glyph_list("αβ"), vec!["ΑΒ"]);
    }

    #[test]
    fn parse_empty_text_yields_one_empty_glyph() {
        assert_eq!(parse_glyph_list(""), vec![String::new()]);
    }

    #[test]
    fn cursor_stays_in_range_across_cycles() {
        let mut src = GlyphSource::new();
        for _ in 0..10 {
            src.next();
        }
        assert_eq!(src.cursor(), 0);
        for _ in 0..13 {
            src.next();
            assert!(src.cursor() < src.len());
        }
        assert_eq!(src.cursor(), 3);
    }

    #[test]
    fn cursor_is_in_range_right_after_shrink() {
        let mut src = GlyphSource::new();
        for _ in 0..7 {
            src.next();
        }
        assert!(src.replace(vec!["A".into(), "B".into()]));
        assert_eq!(src.cursor(), 1);
    }

    #[test]
    fn replace_with_shorter_list_keeps_next_valid() {
        let mut src = GlyphSource::new();
        for _ in 0..7 {
            src.next();
        }
        assert!(src.replace(vec!["A".into(), "B".into()]));
        // cursor 7 reduces to 7 % 2 == 1
        assert_eq!(src.next(), "B");
        assert_eq!(src.next(), "A");
    }

    #[test]
    fn replace_rejects_empty_list() {
        let src = GlyphSource::new();
        assert!(!src.replace(Vec::new()));
        assert_eq!(src.len(), 10);
    }

    #[test]
    fn replace_does_not_reset_cursor() {
        let mut src = GlyphSource::new();
        src.next();
        src.next();
        assert!(src.replace((0..5).map(|i| i.to_string()).collect()));
        assert_eq!(src.cursor(), 2);
        assert_eq!(src.next(), "2");
    }
}

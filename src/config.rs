// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  glyphrain --width 256 --height 256 --cell-size 24 --drops 9 --interval-ms 100";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn default_params_usage_for_help() -> String {
    if !color_enabled_stdout() {
        return DEFAULT_PARAMS_USAGE.to_string();
    }
    match DEFAULT_PARAMS_USAGE.split_once('\n') {
        Some((heading, rest)) => format!("\x1b[1;36m{}\x1b[0m\n{}", heading, rest),
        None => DEFAULT_PARAMS_USAGE.to_string(),
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphrain", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'W',
        long = "width",
        default_value_t = 256,
        help_heading = "SURFACE",
        help = "Surface width in pixels (min 8 max 4096)"
    )]
    pub width: u32,

    #[arg(
        short = 'H',
        long = "height",
        default_value_t = 256,
        help_heading = "SURFACE",
        help = "Surface height in pixels (min 8 max 4096)"
    )]
    pub height: u32,

    #[arg(
        short = 's',
        long = "cell-size",
        default_value_t = 24,
        help_heading = "SURFACE",
        help = "Grid cell edge in pixels; also the font size (min 4 max 256)"
    )]
    pub cell_size: u32,

    #[arg(
        short = 'n',
        long = "drops",
        default_value_t = 9,
        help_heading = "RAIN",
        help = "Number of falling glyphs (min 1 max 1000)"
    )]
    pub drops: usize,

    #[arg(
        short = 'i',
        long = "interval-ms",
        default_value_t = 100,
        help_heading = "RAIN",
        help = "Milliseconds between ticks (min 10 max 10000)"
    )]
    pub interval_ms: u64,

    #[arg(
        short = 'g',
        long = "glyphs",
        value_name = "FILE",
        help_heading = "RAIN",
        help = "Newline-delimited glyph list, loaded in the background after start"
    )]
    pub glyphs: Option<PathBuf>,

    #[arg(
        long = "seed",
        help_heading = "RAIN",
        help = "Seed for the random source (default: OS entropy)"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screensaver mode (exit on keypress)"
    )]
    pub screensaver: bool,

    #[arg(
        long = "colormode",
        help_heading = "GENERAL",
        help = "Force color mode (allowed: 0,16,8/256,24/32). Default: detected from COLORTERM/TERM"
    )]
    pub colormode: Option<u16>,

    #[arg(
        long = "log-file",
        value_name = "FILE",
        help_heading = "LOGGING",
        help = "Write log events to FILE (nothing is logged without it)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "log-level",
        default_value_t = LogLevel::Info,
        value_enum,
        help_heading = "LOGGING",
        help = "Most verbose level written to --log-file"
    )]
    pub log_level: LogLevel,

    #[arg(
        long = "check-bitcolor",
        help_heading = "HELP",
        help = "Print detected terminal color capability and exit"
    )]
    pub check_bitcolor: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

// Copyright (c) 2026 rezky_nightky

use std::env;
use std::time::{Duration, Instant};

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use rand::{rngs::StdRng, SeedableRng};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use glyphrain::config::{color_enabled_stdout, default_params_usage_for_help, Args};
use glyphrain::logging::init_logging;
use glyphrain::palette::{detect_color_mode_auto, ColorMode};
use glyphrain::terminal::{restore_terminal_best_effort, Terminal};
use glyphrain::texture::Texture;
use glyphrain::{Canvas, RainEngine, Surface};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn require_range<T: PartialOrd + std::fmt::Display>(name: &str, v: T, min: T, max: T) -> T {
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn require_duration(v: Option<f64>) -> Option<Duration> {
    let s = v?;
    if !s.is_finite() {
        eprintln!("failed to apply --duration {} (must be a finite number)", s);
        std::process::exit(1);
    }
    if s <= 0.0 {
        return None;
    }
    let s = require_range("--duration", s, 0.1, 86400.0);
    Some(Duration::from_secs_f64(s))
}

fn detect_color_mode(args: &Args) -> ColorMode {
    match args.colormode {
        Some(bits) => ColorMode::from_bits(bits).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        }),
        None => detect_color_mode_auto(),
    }
}

fn install_signal_handlers() {
    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn parse_args() -> Args {
    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }

    let matches = cmd.get_matches_from(env::args_os());
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));
    install_signal_handlers();

    let args = parse_args();

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.check_bitcolor {
        let colorterm = env::var("COLORTERM").unwrap_or_default();
        let term = env::var("TERM").unwrap_or_default();
        println!("BITCOLOR CHECK:");
        println!(
            "  COLORTERM: {}",
            if colorterm.is_empty() { "(unset)" } else { &colorterm }
        );
        println!("  TERM: {}", if term.is_empty() { "(unset)" } else { &term });
        println!("  auto_detected: {}", detect_color_mode_auto().label());
        println!("  effective: {}", detect_color_mode(&args).label());
        return Ok(());
    }

    let width = require_range("--width", args.width, 8, 4096);
    let height = require_range("--height", args.height, 8, 4096);
    let cell_size = require_range("--cell-size", args.cell_size, 4, 256);
    let drops = require_range("--drops", args.drops, 1, 1000);
    let interval_ms = require_range("--interval-ms", args.interval_ms, 10, 10_000);
    let run_for = require_duration(args.duration);
    let color_mode = detect_color_mode(&args);

    init_logging(args.log_file.as_deref(), args.log_level.into())?;
    tracing::info!(
        width,
        height,
        cell_size,
        drops,
        interval_ms,
        color_mode = color_mode.label(),
        "starting"
    );

    let canvas = Canvas::new(width, height)?;
    let surface = Surface::new(canvas, width, height, cell_size);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut engine = RainEngine::with_rng(surface, drops, rng);

    // Fire and forget: the defaults keep falling until the load lands.
    if let Some(path) = &args.glyphs {
        let _ = engine.glyphs().load_from(path.clone());
    }

    let mut term = Terminal::new()?;
    let (tw, th) = term.size()?;
    let mut texture = Texture::new(tw, th, width, height, color_mode);

    let interval = Duration::from_millis(interval_ms);
    let start_time = Instant::now();
    let end_time = run_for.map(|d| start_time + d);
    let mut next_tick = Instant::now();
    let mut raining = true;
    let mut paused = false;

    while raining {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }
        let mut pending_resize: Option<(u16, u16)> = None;

        loop {
            while Terminal::poll_event(Duration::from_millis(0))? {
                match Terminal::read_event()? {
                    Event::Resize(nw, nh) => pending_resize = Some((nw, nh)),
                    Event::Key(k) if k.kind == KeyEventKind::Press => {
                        if args.screensaver {
                            raining = false;
                            break;
                        }
                        match k.code {
                            KeyCode::Esc | KeyCode::Char('q') => raining = false,
                            KeyCode::Char('p') => {
                                paused = !paused;
                                tracing::debug!(paused, "pause toggled");
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }

            if !raining || pending_resize.is_some() {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                break;
            }

            let mut timeout = next_tick - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !raining {
            break;
        }

        if let Some((nw, nh)) = pending_resize {
            tracing::debug!(cols = nw, lines = nh, "terminal resized");
            texture.resize(nw, nh, width, height);
        }

        if Instant::now() >= next_tick {
            if !paused {
                engine.tick();
                texture.mark_needs_update();
            }
            next_tick += interval;
            let now = Instant::now();
            if now > next_tick {
                next_tick = now;
            }
        }

        if texture.upload(engine.surface().context()) {
            term.draw(texture.frame_mut())?;
        }
    }

    drop(term);
    tracing::info!(
        ticks = engine.ticks(),
        elapsed_s = start_time.elapsed().as_secs_f64(),
        "stopped"
    );
    Ok(())
}

// Copyright (c) 2026 rezky_nightky

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;

// The terminal is on the alternate screen while raining, so logs only ever
// go to a file. Without a path nothing is installed.
pub fn init_logging(path: Option<&Path>, level: LevelFilter) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(io::Error::other)
}

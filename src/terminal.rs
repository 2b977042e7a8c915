// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;

pub struct Terminal {
    stdout: Stdout,
    run_buf: String,
    order: Vec<usize>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        tracing::debug!("terminal entered alternate screen");
        Ok(Self {
            stdout: out,
            run_buf: String::with_capacity(64),
            order: Vec::new(),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        if !frame.is_dirty() {
            return Ok(());
        }

        self.order.clear();
        if frame.is_dirty_all() {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
            self.order.extend(0..frame.width as usize * frame.height as usize);
        } else {
            self.order.extend_from_slice(frame.dirty_indices());
            self.order.sort_unstable();
        }

        let width = frame.width as usize;
        let mut pen = Pen::default();
        let mut i = 0usize;
        while i < self.order.len() {
            let start = self.order[i];
            let first = frame.cell_at_index(start);

            // Extend the run over adjacent cells on the same row with the same colors.
            self.run_buf.clear();
            self.run_buf.push(first.ch);
            let mut j = i + 1;
            while j < self.order.len() {
                let idx = self.order[j];
                if idx != self.order[j - 1] + 1 || idx % width == 0 {
                    break;
                }
                let c = frame.cell_at_index(idx);
                if c.fg != first.fg || c.bg != first.bg {
                    break;
                }
                self.run_buf.push(c.ch);
                j += 1;
            }

            let x = (start % width) as u16;
            let y = (start / width) as u16;
            self.stdout.queue(cursor::MoveTo(x, y))?;
            pen.apply(&mut self.stdout, &first)?;
            self.stdout.queue(Print(self.run_buf.as_str()))?;
            i = j;
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

#[derive(Default)]
struct Pen {
    fg: Option<Option<Color>>,
    bg: Option<Option<Color>>,
}

impl Pen {
    fn apply(&mut self, out: &mut Stdout, cell: &Cell) -> Result<()> {
        if self.fg != Some(cell.fg) {
            out.queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            out.queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
        tracing::debug!("terminal restored");
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

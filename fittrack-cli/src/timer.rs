//! Interactive countdown for an activity session.
//!
//! The core owns no wall clock: this loop ticks once per second and, at
//! zero, hands the "duration elapsed" signal back to the caller. Space
//! pauses/resumes, `r` restarts, `q` or Esc aborts without completing.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    Elapsed,
    Aborted,
}

pub fn run_countdown(label: &str, minutes: u32) -> Result<TimerOutcome> {
    let total = Duration::from_secs(u64::from(minutes) * 60);

    terminal::enable_raw_mode()?;
    let result = countdown_loop(label, total);
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn countdown_loop(label: &str, total: Duration) -> Result<TimerOutcome> {
    let mut remaining = total;
    let mut paused = false;
    let mut last_tick = Instant::now();

    loop {
        render_line(label, remaining, paused)?;
        if remaining.is_zero() {
            return Ok(TimerOutcome::Elapsed);
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char(' ') => {
                        paused = !paused;
                        last_tick = Instant::now();
                    }
                    KeyCode::Char('r') => {
                        remaining = total;
                        paused = false;
                        last_tick = Instant::now();
                    }
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(TimerOutcome::Aborted),
                    _ => {}
                }
            }
        }

        if !paused && last_tick.elapsed() >= Duration::from_secs(1) {
            remaining = remaining.saturating_sub(Duration::from_secs(1));
            last_tick += Duration::from_secs(1);
        }
    }
}

fn render_line(label: &str, remaining: Duration, paused: bool) -> Result<()> {
    let secs = remaining.as_secs();
    // Fixed-width state slot so un-pausing leaves no residue on the line.
    let state = if paused { "[paused]" } else { "" };
    print!(
        "\r{label}  {:02}:{:02} {state:<8}  (space pause, r restart, q quit)",
        secs / 60,
        secs % 60
    );
    io::stdout().flush()?;
    Ok(())
}

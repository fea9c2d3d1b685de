#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text renderer for Bomber Arena.
//!
//! The renderer is an explicitly constructed object that owns its output sink.
//! Each frame is written as one line per grid row followed by one status line
//! per agent. ANSI colors are optional so plain logs and test buffers stay
//! readable.

use std::io::Write;

use anyhow::{Context, Result};
use bomber_arena_core::{Action, AgentSnapshot};
use bomber_arena_rendering::{Color, Frame, Palette, Renderer, Tile};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

/// Renderer that writes frames as text to any [`Write`] sink.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    palette: Option<Palette>,
    clear_between_frames: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a plain-text renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            palette: None,
            clear_between_frames: false,
        }
    }

    /// Enables 24-bit ANSI colors using the provided palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Clears the terminal before each frame so the arena redraws in place.
    #[must_use]
    pub fn clearing_screen(mut self, clear: bool) -> Self {
        self.clear_between_frames = clear;
        self
    }

    /// Consumes the renderer, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_tile(&mut self, tile: Tile) -> std::io::Result<()> {
        let glyph = tile.glyph();
        match self.palette {
            Some(palette) => {
                let Color { red, green, blue } = palette.color(tile);
                write!(self.out, "\x1b[38;2;{red};{green};{blue}m{glyph}{glyph}{RESET}")
            }
            None => write!(self.out, "{glyph}{glyph}"),
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        if self.clear_between_frames {
            self.out
                .write_all(CLEAR_SCREEN.as_bytes())
                .context("failed to clear terminal")?;
        }
        writeln!(self.out, "tick {}", frame.tick).context("failed to write frame header")?;

        for row in frame.rows() {
            for tile in row {
                self.write_tile(tile).context("failed to write grid cell")?;
            }
            writeln!(self.out).context("failed to write grid row")?;
        }

        for agent in frame.agents.iter() {
            let action = frame
                .actions
                .get(agent.id.slot())
                .copied()
                .unwrap_or_default();
            writeln!(self.out, "{}", status_line(agent, action))
                .context("failed to write agent status")?;
        }
        self.out.flush().context("failed to flush frame")
    }
}

fn status_line(agent: &AgentSnapshot, action: Action) -> String {
    if agent.is_alive() {
        format!(
            "[{}] {:<10} lives {}  {:?}",
            agent.id.get(),
            agent.name,
            agent.lives,
            action
        )
    } else {
        format!("[{}] {:<10} eliminated", agent.id.get(), agent.name)
    }
}

use std::io::{self, BufRead, Write};

use bomber_arena_core::{Action, AgentSnapshot, AgentView, BotStrategy, Grid};
use log::warn;

/// Strategy that asks a person for one action per tick.
///
/// Each decision reads a single line: `w`, `a`, `s` and `d` move, `b` places
/// a bomb, anything else idles. End of input idles forever.
#[derive(Debug)]
pub(crate) struct HumanInput<R> {
    input: R,
    name: String,
}

impl<R: BufRead> HumanInput<R> {
    pub(crate) fn new(input: R, name: impl Into<String>) -> Self {
        Self {
            input,
            name: name.into(),
        }
    }

    fn read_action(&mut self) -> io::Result<Action> {
        let mut line = String::new();
        let _ = self.input.read_line(&mut line)?;
        Ok(parse_action(&line))
    }
}

impl<R: BufRead> BotStrategy for HumanInput<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, _: &Grid, _: &AgentView, tick: u64, me: &AgentSnapshot) -> Action {
        if let Err(error) = prompt(&mut io::stderr().lock(), tick, me) {
            warn!("could not prompt {}: {error}", self.name);
        }

        match self.read_action() {
            Ok(action) => action,
            Err(error) => {
                warn!("could not read input for {}: {error}", self.name);
                Action::Idle
            }
        }
    }
}

fn prompt(out: &mut impl Write, tick: u64, me: &AgentSnapshot) -> io::Result<()> {
    write!(
        out,
        "tick {tick} [{}] at ({}, {}) move (w/a/s/d, b = bomb): ",
        me.id.get(),
        me.position.x(),
        me.position.y()
    )?;
    out.flush()
}

fn parse_action(line: &str) -> Action {
    match line.trim().to_ascii_lowercase().as_str() {
        "w" => Action::MoveUp,
        "s" => Action::MoveDown,
        "a" => Action::MoveLeft,
        "d" => Action::MoveRight,
        "b" => Action::PlaceBomb,
        _ => Action::Idle,
    }
}

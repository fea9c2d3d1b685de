#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Bomber Arena matches in the terminal.

mod config;
mod human;
mod lineup;
mod match_code;

use std::{fs::File, io, path::PathBuf, thread, time::Duration};

use anyhow::{bail, Context, Result};
use bomber_arena_core::{Action, ArenaConfig, AGENT_COUNT};
use bomber_arena_rendering::{Frame, Palette, Renderer};
use bomber_arena_rendering_terminal::TerminalRenderer;
use bomber_arena_system_game_loop::{GameLoop, MatchStatus, Strategy};
use clap::Parser;
use log::info;

use crate::{lineup::BotKind, match_code::MatchCode};

/// Plays a four-agent Bomber Arena match.
#[derive(Debug, Parser)]
#[command(name = "bomber-arena", version, about)]
struct Args {
    /// TOML file overriding the default arena settings.
    #[arg(long, value_name = "PATH", conflicts_with = "code")]
    config: Option<PathBuf>,

    /// Seed for layout generation; random when omitted.
    #[arg(long, conflicts_with = "code")]
    seed: Option<u64>,

    /// Maximum number of ticks before the match is called off.
    #[arg(long, default_value_t = 500)]
    max_ticks: u64,

    /// Strategy for each of the four agents, in id order.
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [BotKind::Greedy, BotKind::Flee, BotKind::Greedy, BotKind::Flee],
        conflicts_with = "code"
    )]
    bots: Vec<BotKind>,

    /// Replays a match from a code printed by an earlier run.
    #[arg(long)]
    code: Option<String>,

    /// Pause between rendered ticks, in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Skips per-tick rendering and prints only the result.
    #[arg(long)]
    quiet: bool,

    /// Disables ANSI colors and screen clearing.
    #[arg(long)]
    no_color: bool,

    /// Writes the full match history as JSON to this path.
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,
}

/// Entry point for the Bomber Arena command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let code = resolve_match(&args)?;
    println!("match code: {}", code.encode().context("failed to encode match code")?);

    let strategies = build_strategies(&code.bots)?;
    let mut game = GameLoop::new(code.config, code.seed, strategies)
        .context("arena configuration was rejected")?;
    info!("playing seed {} for up to {} ticks", code.seed, args.max_ticks);

    let outcome = if args.quiet {
        game.play_out(args.max_ticks)
    } else {
        let mut renderer = TerminalRenderer::new(io::stdout().lock());
        if !args.no_color {
            renderer = renderer.with_palette(Palette::default()).clearing_screen(true);
        }
        let delay = Duration::from_millis(args.delay_ms);

        let idle = [Action::Idle; AGENT_COUNT];
        let agents = game.agent_view();
        renderer.present(&Frame {
            tick: game.tick(),
            grid: game.grid(),
            agents: &agents,
            actions: &idle,
        })?;

        game.run(args.max_ticks, |game, report| {
            let agents = game.agent_view();
            renderer.present(&Frame {
                tick: report.tick,
                grid: game.grid(),
                agents: &agents,
                actions: &report.actions,
            })?;
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            Ok::<(), anyhow::Error>(())
        })?
    };

    match outcome.status {
        MatchStatus::Finished => println!("match finished after {} ticks", outcome.ticks),
        MatchStatus::TickLimitReached => {
            println!("tick limit reached after {} ticks", outcome.ticks);
        }
    }
    let view = game.agent_view();
    for agent in view.iter() {
        let standing = if outcome.survivors.contains(&agent.id) {
            format!("survived with {} lives", agent.lives)
        } else {
            "eliminated".to_owned()
        };
        println!("[{}] {} {standing}", agent.id.get(), agent.name);
    }

    if let Some(path) = &args.history {
        let file = File::create(path)
            .with_context(|| format!("failed to create history file {}", path.display()))?;
        serde_json::to_writer_pretty(file, game.history())
            .with_context(|| format!("failed to write history to {}", path.display()))?;
        info!("history written to {}", path.display());
    }

    Ok(())
}

fn resolve_match(args: &Args) -> Result<MatchCode> {
    if let Some(code) = &args.code {
        return MatchCode::decode(code).context("failed to read match code");
    }

    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => ArenaConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    Ok(MatchCode {
        config,
        seed,
        bots: args.bots.clone(),
    })
}

fn build_strategies(bots: &[BotKind]) -> Result<[Strategy; AGENT_COUNT]> {
    let &[first, second, third, fourth] = bots else {
        bail!("expected {AGENT_COUNT} bots, received {}", bots.len());
    };
    Ok([first.build(), second.build(), third.build(), fourth.build()])
}

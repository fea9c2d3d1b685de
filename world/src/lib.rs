#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Bomber Arena.
//!
//! The world owns the live [`Grid`] and the agent roster. It is mutated only
//! through [`apply`], and observed through the read-only [`query`] module.

mod agents;
mod blast;
mod layout;

use bomber_arena_core::{ArenaConfig, Block, Command, ConfigError, Event, Grid, AGENT_COUNT};
use log::{debug, info};

use crate::agents::AgentRoster;

/// Represents the authoritative Bomber Arena world state.
#[derive(Clone, Debug)]
pub struct World {
    config: ArenaConfig,
    grid: Grid,
    agents: AgentRoster,
    tick_index: u64,
    match_over: bool,
}

impl World {
    /// Creates a world with a freshly generated layout.
    ///
    /// The same `seed` always yields the same box layout.
    pub fn new(
        config: ArenaConfig,
        seed: u64,
        names: [String; AGENT_COUNT],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = layout::generate(&config, seed);
        Ok(Self::assemble(config, grid, names))
    }

    /// Creates a world around a caller-provided grid.
    ///
    /// The grid dimensions replace those named by `config`. Agents still start
    /// on the four spawn corners, so the grid must leave them free and keep its
    /// outer ring walled.
    pub fn with_grid(
        config: ArenaConfig,
        grid: Grid,
        names: [String; AGENT_COUNT],
    ) -> Result<Self, ConfigError> {
        let config = ArenaConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        };
        config.validate()?;
        if let Some((cell, _)) = grid
            .iter()
            .find(|(cell, block)| grid.is_border(*cell) && *block != Block::Wall)
        {
            return Err(ConfigError::OpenBorder(cell));
        }
        if let Some(cell) = config
            .spawn_cells()
            .into_iter()
            .find(|cell| grid.is_blocked(*cell))
        {
            return Err(ConfigError::BlockedSpawn(cell));
        }
        Ok(Self::assemble(config, grid, names))
    }

    fn assemble(config: ArenaConfig, grid: Grid, names: [String; AGENT_COUNT]) -> Self {
        let agents = AgentRoster::spawn(config.spawn_cells(), names, config.max_lives);
        Self {
            config,
            grid,
            agents,
            tick_index: 0,
            match_over: false,
        }
    }

    fn resolve_blast_damage(&mut self, out_events: &mut Vec<Event>) {
        for agent in self.agents.iter_mut() {
            if !agent.is_alive() || !self.grid.is_explosion(agent.position) {
                continue;
            }
            let lives = agent.wound();
            out_events.push(Event::AgentDamaged {
                agent: agent.id,
                lives,
            });
            if lives == 0 {
                info!("{} ({:?}) was eliminated", agent.name, agent.id);
                out_events.push(Event::AgentEliminated { agent: agent.id });
            }
        }

        if !self.match_over && self.agents.alive_count() < 2 {
            self.match_over = true;
            out_events.push(Event::MatchEnded {
                survivors: self.agents.survivors(),
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });

            for detonation in blast::advance(&mut world.grid, world.config.max_fuse) {
                debug!(
                    "bomb at {:?} detonated over {} cells",
                    detonation.cell,
                    detonation.blast.len()
                );
                out_events.push(Event::BombDetonated {
                    cell: detonation.cell,
                    blast: detonation.blast,
                    destroyed_boxes: detonation.destroyed_boxes,
                });
            }
        }
        Command::PlaceBomb { agent } => {
            let Some(cell) = world
                .agents
                .get(agent)
                .filter(|state| state.is_alive())
                .map(|state| state.position)
            else {
                return;
            };
            if world.grid.place_bomb(cell) {
                out_events.push(Event::BombPlaced { agent, cell });
            } else {
                debug!("bomb from {agent:?} fizzled at {cell:?}");
                out_events.push(Event::BombFizzled { agent, cell });
            }
        }
        Command::StepAgent { agent, direction } => {
            let grid = &world.grid;
            if let Some(state) = world.agents.living_mut(agent) {
                let from = state.position;
                let to = from.neighbor(direction);
                if grid.contains(to) && !grid.is_blocked(to) {
                    state.position = to;
                    out_events.push(Event::AgentMoved { agent, from, to });
                }
            }
        }
        Command::ResolveBlastDamage => world.resolve_blast_damage(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use bomber_arena_core::{AgentId, AgentSnapshot, AgentView, ArenaConfig, Grid};

    use super::World;

    /// Provides read-only access to the live grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &ArenaConfig {
        &world.config
    }

    /// Index of the most recently started tick; zero before the first tick.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only view of every agent, living or not.
    #[must_use]
    pub fn agent_view(world: &World) -> AgentView {
        AgentView::from_snapshots(world.agents.iter().map(|agent| agent.snapshot()).collect())
    }

    /// Snapshot of a single agent.
    #[must_use]
    pub fn agent(world: &World, id: AgentId) -> Option<AgentSnapshot> {
        world.agents.get(id).map(|agent| agent.snapshot())
    }

    /// Number of agents with lives remaining.
    #[must_use]
    pub fn alive_agent_count(world: &World) -> usize {
        world.agents.alive_count()
    }

    /// Identifiers of the agents with lives remaining.
    #[must_use]
    pub fn survivors(world: &World) -> Vec<AgentId> {
        world.agents.survivors()
    }

    /// Reports whether fewer than two agents remain.
    #[must_use]
    pub fn is_match_over(world: &World) -> bool {
        world.match_over
    }
}

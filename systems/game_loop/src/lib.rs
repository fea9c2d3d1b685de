#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick orchestration for Bomber Arena matches.
//!
//! A [`GameLoop`] owns the authoritative [`World`] and one [`BotStrategy`] per
//! agent slot. Each tick it hands every living agent a fresh snapshot, validates
//! the proposed actions against the live grid, then drives the world through
//! its command surface in a fixed order.

mod history;
pub mod validation;

use bomber_arena_core::{
    Action, AgentId, AgentView, ArenaConfig, BotStrategy, CellPos, Command, ConfigError, Event,
    Grid, AGENT_COUNT,
};
use bomber_arena_world::{self as world, query, World};
use log::{debug, info, warn};

pub use history::{BombRecord, MatchHistory, TickRecord};
pub use validation::validate_action;

/// Strategy handle stored for every agent slot.
pub type Strategy = Box<dyn BotStrategy>;

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// At least two agents remain.
    Running,
    /// Fewer than two agents remain; further steps do nothing.
    Over,
}

/// How [`GameLoop::run`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// The match reached [`Phase::Over`].
    Finished,
    /// The tick cap elapsed while the match was still running.
    TickLimitReached,
}

/// Summary returned once a match stops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Ticks completed.
    pub ticks: u64,
    /// Agents with lives remaining.
    pub survivors: Vec<AgentId>,
    /// Why the match stopped.
    pub status: MatchStatus,
}

/// Result of a single [`GameLoop::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the tick after stepping.
    pub tick: u64,
    /// Validated action of each agent slot; dead agents report idle.
    pub actions: [Action; AGENT_COUNT],
    /// Events broadcast by the world during the tick.
    pub events: Vec<Event>,
    /// Phase after the tick.
    pub phase: Phase,
}

/// Drives a match one tick at a time.
pub struct GameLoop {
    world: World,
    strategies: [Strategy; AGENT_COUNT],
    phase: Phase,
    history: MatchHistory,
}

impl GameLoop {
    /// Creates a match on a freshly generated layout.
    pub fn new(
        config: ArenaConfig,
        seed: u64,
        strategies: [Strategy; AGENT_COUNT],
    ) -> Result<Self, ConfigError> {
        let world = World::new(config, seed, names_of(&strategies))?;
        Ok(Self::start(world, strategies))
    }

    /// Creates a match on a caller-provided grid.
    pub fn with_grid(
        config: ArenaConfig,
        grid: Grid,
        strategies: [Strategy; AGENT_COUNT],
    ) -> Result<Self, ConfigError> {
        let world = World::with_grid(config, grid, names_of(&strategies))?;
        Ok(Self::start(world, strategies))
    }

    fn start(world: World, strategies: [Strategy; AGENT_COUNT]) -> Self {
        let history = MatchHistory::new(query::grid(&world).snapshot(), query::survivors(&world));
        let config = query::config(&world);
        info!(
            "match started on a {}x{} arena with {} lives per agent",
            config.width, config.height, config.max_lives
        );
        Self {
            world,
            strategies,
            phase: Phase::Running,
            history,
        }
    }

    /// Advances the match by one tick.
    ///
    /// Stepping a finished match reports idle actions and no events.
    pub fn step(&mut self) -> TickReport {
        if self.phase == Phase::Over {
            return TickReport {
                tick: query::tick(&self.world),
                actions: [Action::Idle; AGENT_COUNT],
                events: Vec::new(),
                phase: Phase::Over,
            };
        }

        let actions = self.collect_actions();
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick, &mut events);
        for (agent, action) in AgentId::roster().into_iter().zip(actions) {
            if action == Action::PlaceBomb {
                world::apply(&mut self.world, Command::PlaceBomb { agent }, &mut events);
            }
        }
        for (agent, action) in AgentId::roster().into_iter().zip(actions) {
            if let Some(direction) = action.direction() {
                world::apply(
                    &mut self.world,
                    Command::StepAgent { agent, direction },
                    &mut events,
                );
            }
        }
        world::apply(&mut self.world, Command::ResolveBlastDamage, &mut events);

        let tick = query::tick(&self.world);
        if query::is_match_over(&self.world) {
            self.phase = Phase::Over;
            info!(
                "match over after {tick} ticks, survivors: {:?}",
                query::survivors(&self.world)
            );
        }

        self.history.ticks.push(TickRecord::capture(
            tick,
            query::grid(&self.world),
            query::agent_view(&self.world).into_vec(),
            actions,
            &events,
        ));
        self.history.survivors = query::survivors(&self.world);

        TickReport {
            tick,
            actions,
            events,
            phase: self.phase,
        }
    }

    /// Queries each living agent in id order and validates its answer.
    ///
    /// Every agent sees the live grid plus the bombs validated earlier in the
    /// same tick.
    fn collect_actions(&mut self) -> [Action; AGENT_COUNT] {
        let mut actions = [Action::Idle; AGENT_COUNT];
        let mut pending_bombs: Vec<CellPos> = Vec::new();
        let decision_tick = query::tick(&self.world);

        for (agent, strategy) in AgentId::roster().into_iter().zip(self.strategies.iter_mut()) {
            let Some(me) = query::agent(&self.world, agent).filter(|me| me.is_alive()) else {
                continue;
            };
            let live = query::grid(&self.world);
            let mut snapshot = live.snapshot();
            for cell in &pending_bombs {
                let _ = snapshot.place_bomb(*cell);
            }
            let agents = query::agent_view(&self.world);

            let proposed = strategy.decide(&snapshot, &agents, decision_tick, &me);
            let action = validate_action(live, &pending_bombs, &me, proposed);
            if action != proposed {
                debug!("{} proposed {proposed:?}, coerced to idle", me.name);
            }
            if action == Action::PlaceBomb {
                pending_bombs.push(me.position);
            }
            if let Some(slot) = actions.get_mut(agent.slot()) {
                *slot = action;
            }
        }
        actions
    }

    /// Steps until the match ends or `max_ticks` ticks have run.
    ///
    /// `on_tick` observes the loop after every tick; its first error aborts the run.
    pub fn run<F, E>(&mut self, max_ticks: u64, mut on_tick: F) -> Result<MatchOutcome, E>
    where
        F: FnMut(&GameLoop, &TickReport) -> Result<(), E>,
    {
        let mut ran = 0;
        while self.phase == Phase::Running && ran < max_ticks {
            let report = self.step();
            ran += 1;
            on_tick(self, &report)?;
        }

        let status = match self.phase {
            Phase::Over => MatchStatus::Finished,
            Phase::Running => {
                warn!("match stopped at the {max_ticks} tick limit");
                MatchStatus::TickLimitReached
            }
        };
        Ok(MatchOutcome {
            ticks: query::tick(&self.world),
            survivors: self.survivors(),
            status,
        })
    }

    /// Runs without observing individual ticks.
    pub fn play_out(&mut self, max_ticks: u64) -> MatchOutcome {
        match self.run(max_ticks, |_, _| Ok::<(), std::convert::Infallible>(())) {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick(&self) -> u64 {
        query::tick(&self.world)
    }

    /// Read-only access to the live grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        query::grid(&self.world)
    }

    /// Snapshot of every agent.
    #[must_use]
    pub fn agent_view(&self) -> AgentView {
        query::agent_view(&self.world)
    }

    /// Agents with lives remaining.
    #[must_use]
    pub fn survivors(&self) -> Vec<AgentId> {
        query::survivors(&self.world)
    }

    /// Number of agents with lives remaining.
    #[must_use]
    pub fn alive_agent_count(&self) -> usize {
        query::alive_agent_count(&self.world)
    }

    /// Record of every tick played so far.
    #[must_use]
    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Consumes the loop, yielding its history.
    #[must_use]
    pub fn into_history(self) -> MatchHistory {
        self.history
    }
}

impl std::fmt::Debug for GameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|strategy| strategy.name()).collect();
        f.debug_struct("GameLoop")
            .field("world", &self.world)
            .field("strategies", &names)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

fn names_of(strategies: &[Strategy; AGENT_COUNT]) -> [String; AGENT_COUNT] {
    let mut names: [String; AGENT_COUNT] = Default::default();
    for (name, strategy) in names.iter_mut().zip(strategies) {
        *name = strategy.name().to_owned();
    }
    names
}

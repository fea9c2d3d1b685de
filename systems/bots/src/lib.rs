#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Decision systems that choose one action per agent per tick.
//!
//! Every strategy implements [`BotStrategy`] and only ever reads the grid and
//! agent snapshots it is handed.

mod flee;
mod greedy;
mod scripted;
pub mod search;

use bomber_arena_core::{AgentSnapshot, AgentView, CellPos, Direction, Grid};

pub use bomber_arena_core::BotStrategy;
pub use flee::FleeBot;
pub use greedy::GreedyBot;
pub use scripted::ScriptedBot;

/// Closest living opponent by Manhattan distance; ties go to the lower id.
pub(crate) fn closest_opponent<'a>(
    agents: &'a AgentView,
    me: &AgentSnapshot,
) -> Option<&'a AgentSnapshot> {
    agents
        .opponents_of(me.id)
        .min_by_key(|enemy| me.position.manhattan_distance(enemy.position))
}

pub(crate) fn touches_box(grid: &Grid, pos: CellPos) -> bool {
    Direction::ALL
        .into_iter()
        .any(|direction| grid.is_box(pos.neighbor(direction)))
}

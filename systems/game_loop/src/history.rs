//! Serializable record of a whole match.

use bomber_arena_core::{Action, AgentId, AgentSnapshot, Block, CellPos, Event, Grid, AGENT_COUNT};
use serde::{Deserialize, Serialize};

/// Everything needed to replay a match frame by frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistory {
    /// Layout before the first tick.
    pub initial_grid: Grid,
    /// One record per completed tick, in order.
    pub ticks: Vec<TickRecord>,
    /// Agents alive after the last recorded tick.
    pub survivors: Vec<AgentId>,
}

impl MatchHistory {
    pub(crate) fn new(initial_grid: Grid, survivors: Vec<AgentId>) -> Self {
        Self {
            initial_grid,
            ticks: Vec::new(),
            survivors,
        }
    }
}

/// State of the arena at the end of a tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Index of the tick.
    pub tick: u64,
    /// Every agent after damage was applied.
    pub agents: Vec<AgentSnapshot>,
    /// Validated action of each agent slot.
    pub actions: [Action; AGENT_COUNT],
    /// Live bombs and their fuse stage.
    pub bombs: Vec<BombRecord>,
    /// Cells covered by explosions this tick.
    pub explosions: Vec<CellPos>,
    /// Boxes destroyed this tick.
    pub destroyed_boxes: Vec<CellPos>,
}

impl TickRecord {
    pub(crate) fn capture(
        tick: u64,
        grid: &Grid,
        agents: Vec<AgentSnapshot>,
        actions: [Action; AGENT_COUNT],
        events: &[Event],
    ) -> Self {
        let bombs = grid
            .bombs()
            .map(|(cell, stage)| BombRecord { cell, stage })
            .collect();
        let explosions = grid
            .iter()
            .filter(|(_, block)| *block == Block::Explosion)
            .map(|(cell, _)| cell)
            .collect();
        let destroyed_boxes = events
            .iter()
            .filter_map(|event| match event {
                Event::BombDetonated {
                    destroyed_boxes, ..
                } => Some(destroyed_boxes.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect();

        Self {
            tick,
            agents,
            actions,
            bombs,
            explosions,
            destroyed_boxes,
        }
    }
}

/// A live bomb captured in a [`TickRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombRecord {
    /// Cell holding the bomb.
    pub cell: CellPos,
    /// Fuse stage at the end of the tick.
    pub stage: u8,
}

use bomber_arena_core::{Action, AgentSnapshot, AgentView, BotStrategy, CellPos, Direction, Grid};
use bomber_arena_system_danger::{could_blast_reach, is_bomb_threatening, is_field_safe};

use crate::{closest_opponent, search::plant_bomb_is_safe, touches_box};

const PLANT_LOOKAHEAD: u32 = 3;

/// Aggressive strategy that flees threats, bombs nearby enemies and otherwise
/// closes the distance greedily.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyBot;

impl GreedyBot {
    /// Creates a new greedy bot.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn flee(grid: &Grid, pos: CellPos) -> Action {
        let open = |direction: &Direction| !grid.is_blocked(pos.neighbor(*direction));
        Direction::ALL
            .into_iter()
            .filter(open)
            .find(|direction| !is_bomb_threatening(grid, pos.neighbor(*direction)))
            .or_else(|| Direction::ALL.into_iter().find(open))
            .map_or(Action::Idle, Action::step)
    }

    fn move_to_enemy(grid: &Grid, pos: CellPos, target: CellPos) -> Action {
        let passable = |direction: Direction| {
            let next = pos.neighbor(direction);
            !grid.is_blocked(next) && is_field_safe(grid, next)
        };

        let horizontal = if target.x() < pos.x() {
            Some(Direction::Left)
        } else if target.x() > pos.x() {
            Some(Direction::Right)
        } else {
            None
        };
        let vertical = if target.y() < pos.y() {
            Some(Direction::Up)
        } else if target.y() > pos.y() {
            Some(Direction::Down)
        } else {
            None
        };

        if let Some(direction) = [horizontal, vertical]
            .into_iter()
            .flatten()
            .find(|direction| passable(*direction))
        {
            return Action::step(direction);
        }

        if touches_box(grid, pos) && plant_bomb_is_safe(grid, pos, PLANT_LOOKAHEAD) {
            return Action::PlaceBomb;
        }
        Action::Idle
    }
}

impl BotStrategy for GreedyBot {
    fn name(&self) -> &str {
        "greedy"
    }

    fn decide(
        &mut self,
        grid: &Grid,
        agents: &AgentView,
        _tick: u64,
        me: &AgentSnapshot,
    ) -> Action {
        let pos = me.position;
        if is_bomb_threatening(grid, pos) {
            return Self::flee(grid, pos);
        }

        let enemy_in_range = agents
            .opponents_of(me.id)
            .any(|enemy| could_blast_reach(pos, enemy.position));
        if enemy_in_range && plant_bomb_is_safe(grid, pos, PLANT_LOOKAHEAD) {
            return Action::PlaceBomb;
        }

        match closest_opponent(agents, me) {
            Some(enemy) => Self::move_to_enemy(grid, pos, enemy.position),
            None => Action::Idle,
        }
    }
}

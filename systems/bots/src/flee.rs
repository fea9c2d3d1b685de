use bomber_arena_core::{Action, AgentSnapshot, AgentView, BotStrategy, Grid};
use bomber_arena_system_danger::{could_blast_reach, is_field_safe};

use crate::{
    closest_opponent,
    search::{flee_direction, plant_bomb_is_safe, step_toward},
    touches_box,
};

const FLEE_DEPTH: u32 = 5;
const PLANT_LOOKAHEAD: u32 = 4;
const APPROACH_DEPTH: u32 = 8;

/// Cautious strategy built around a bounded search for the nearest safe cell.
///
/// Once safe it attacks enemies in blast range, then walks towards the closest
/// enemy over safe cells, breaching boxes when the way is shut.
#[derive(Clone, Copy, Debug, Default)]
pub struct FleeBot;

impl FleeBot {
    /// Creates a new flee-focused bot.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BotStrategy for FleeBot {
    fn name(&self) -> &str {
        "flee"
    }

    fn decide(
        &mut self,
        grid: &Grid,
        agents: &AgentView,
        _tick: u64,
        me: &AgentSnapshot,
    ) -> Action {
        let pos = me.position;
        if !is_field_safe(grid, pos) {
            return flee_direction(grid, pos, FLEE_DEPTH).map_or(Action::Idle, Action::step);
        }

        let Some(target) = closest_opponent(agents, me) else {
            return Action::Idle;
        };

        let enemy_in_range = agents
            .opponents_of(me.id)
            .any(|enemy| could_blast_reach(pos, enemy.position));
        if enemy_in_range && plant_bomb_is_safe(grid, pos, PLANT_LOOKAHEAD) {
            return Action::PlaceBomb;
        }

        if let Some(direction) = step_toward(grid, pos, target.position, APPROACH_DEPTH) {
            return Action::step(direction);
        }
        if touches_box(grid, pos) && plant_bomb_is_safe(grid, pos, PLANT_LOOKAHEAD) {
            return Action::PlaceBomb;
        }
        Action::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomber_arena_core::{AgentId, Block, CellPos};

    fn agent(id: u8, x: i32, y: i32) -> AgentSnapshot {
        AgentSnapshot {
            id: AgentId::new(id),
            name: format!("agent-{id}"),
            position: CellPos::new(x, y),
            lives: 2,
        }
    }

    #[test]
    fn stays_put_when_safe_and_alone() {
        let grid = Grid::bordered(9, 9);
        let me = agent(3, 4, 4);
        let view = AgentView::from_snapshots(vec![me.clone()]);

        assert_eq!(FleeBot::new().decide(&grid, &view, 5, &me), Action::Idle);
    }

    #[test]
    fn leaves_its_own_bomb() {
        let mut grid = Grid::bordered(9, 9);
        grid.set(CellPos::new(1, 1), Block::Bomb { stage: 1 });
        let me = agent(1, 1, 1);
        let view = AgentView::from_snapshots(vec![me.clone(), agent(4, 7, 7)]);

        let action = FleeBot::new().decide(&grid, &view, 1, &me);
        assert!(
            matches!(action, Action::MoveDown | Action::MoveRight),
            "unexpected action {action:?}"
        );
    }

    #[test]
    fn approaches_a_distant_enemy() {
        let grid = Grid::bordered(9, 9);
        let me = agent(1, 1, 1);
        let view = AgentView::from_snapshots(vec![me.clone(), agent(2, 7, 7)]);

        let action = FleeBot::new().decide(&grid, &view, 0, &me);
        let next = action
            .direction()
            .map(|direction| me.position.neighbor(direction))
            .expect("expected a move");
        assert!(next.manhattan_distance(CellPos::new(7, 7)) < 12);
    }

    #[test]
    fn attacks_enemy_in_range() {
        let grid = Grid::bordered(9, 9);
        let me = agent(2, 4, 4);
        let view = AgentView::from_snapshots(vec![agent(1, 4, 2), me.clone()]);

        assert_eq!(FleeBot::new().decide(&grid, &view, 0, &me), Action::PlaceBomb);
    }
}

//! Permissive action validation against the live grid.

use bomber_arena_core::{Action, AgentSnapshot, CellPos, Grid};

/// Returns `action` if it is legal for `me`, otherwise [`Action::Idle`].
///
/// Moves must land inside the grid on a cell that is neither wall nor box.
/// Bombs need an air cell that no earlier agent claimed this tick.
#[must_use]
pub fn validate_action(
    grid: &Grid,
    pending_bombs: &[CellPos],
    me: &AgentSnapshot,
    action: Action,
) -> Action {
    let legal = match action {
        Action::Idle => true,
        Action::PlaceBomb => grid.is_air(me.position) && !pending_bombs.contains(&me.position),
        Action::MoveUp | Action::MoveDown | Action::MoveLeft | Action::MoveRight => action
            .direction()
            .map(|direction| me.position.neighbor(direction))
            .is_some_and(|target| grid.contains(target) && !grid.is_blocked(target)),
    };
    if legal {
        action
    } else {
        Action::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomber_arena_core::{AgentId, Block};

    fn me_at(x: i32, y: i32) -> AgentSnapshot {
        AgentSnapshot {
            id: AgentId::new(1),
            name: "tester".to_owned(),
            position: CellPos::new(x, y),
            lives: 1,
        }
    }

    #[test]
    fn moves_into_walls_and_boxes_become_idle() {
        let mut grid = Grid::bordered(7, 7);
        grid.set(CellPos::new(2, 1), Block::Box);
        let me = me_at(1, 1);

        assert_eq!(validate_action(&grid, &[], &me, Action::MoveUp), Action::Idle);
        assert_eq!(validate_action(&grid, &[], &me, Action::MoveRight), Action::Idle);
        assert_eq!(
            validate_action(&grid, &[], &me, Action::MoveDown),
            Action::MoveDown
        );
    }

    #[test]
    fn moves_onto_bombs_and_explosions_are_allowed() {
        let mut grid = Grid::bordered(7, 7);
        grid.set(CellPos::new(1, 2), Block::Bomb { stage: 3 });
        grid.set(CellPos::new(2, 1), Block::Explosion);
        let me = me_at(1, 1);

        assert_eq!(
            validate_action(&grid, &[], &me, Action::MoveDown),
            Action::MoveDown
        );
        assert_eq!(
            validate_action(&grid, &[], &me, Action::MoveRight),
            Action::MoveRight
        );
    }

    #[test]
    fn bombs_need_an_unclaimed_air_cell() {
        let mut grid = Grid::bordered(7, 7);
        let me = me_at(3, 3);

        assert_eq!(
            validate_action(&grid, &[], &me, Action::PlaceBomb),
            Action::PlaceBomb
        );
        assert_eq!(
            validate_action(&grid, &[CellPos::new(3, 3)], &me, Action::PlaceBomb),
            Action::Idle
        );

        grid.set(CellPos::new(3, 3), Block::Explosion);
        assert_eq!(validate_action(&grid, &[], &me, Action::PlaceBomb), Action::Idle);
    }

    #[test]
    fn idle_is_always_valid() {
        let grid = Grid::filled(5, 5, Block::Wall);
        assert_eq!(validate_action(&grid, &[], &me_at(2, 2), Action::Idle), Action::Idle);
    }
}

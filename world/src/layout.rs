//! Initial arena layout: border, pillars and seeded boxes.

use bomber_arena_core::{ArenaConfig, Block, CellPos, Grid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builds the starting grid for the provided configuration.
///
/// Pillars occupy interior cells whose column and row are both even. Every
/// other interior cell becomes a box with probability `box_spawn_rate` percent,
/// except the cells within one step (including diagonals) of a spawn corner.
pub(crate) fn generate(config: &ArenaConfig, seed: u64) -> Grid {
    let mut grid = Grid::bordered(config.width, config.height);
    let spawns = config.spawn_cells();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let cells: Vec<CellPos> = grid
        .iter()
        .filter(|(pos, _)| !grid.is_border(*pos))
        .map(|(pos, _)| pos)
        .collect();

    for pos in cells {
        if pos.x() % 2 == 0 && pos.y() % 2 == 0 {
            grid.set(pos, Block::Wall);
            continue;
        }
        if spawns.iter().any(|spawn| is_near(*spawn, pos)) {
            continue;
        }
        if rng.gen_range(0..100u8) < config.box_spawn_rate {
            grid.set(pos, Block::Box);
        }
    }

    grid
}

fn is_near(spawn: CellPos, pos: CellPos) -> bool {
    spawn.x().abs_diff(pos.x()) <= 1 && spawn.y().abs_diff(pos.y()) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_deterministic_for_a_seed() {
        let config = ArenaConfig::default();
        assert_eq!(generate(&config, 7), generate(&config, 7));
    }

    #[test]
    fn different_seeds_produce_different_boxes() {
        let config = ArenaConfig::default();
        assert_ne!(generate(&config, 1), generate(&config, 2));
    }

    #[test]
    fn pillars_follow_even_coordinates() {
        let config = ArenaConfig {
            box_spawn_rate: 0,
            ..ArenaConfig::default()
        };
        let grid = generate(&config, 0);

        assert!(grid.is_wall(CellPos::new(2, 2)));
        assert!(grid.is_wall(CellPos::new(8, 4)));
        assert!(grid.is_air(CellPos::new(3, 2)));
        assert!(grid.is_air(CellPos::new(1, 1)));
    }

    #[test]
    fn spawn_surroundings_stay_clear() {
        let config = ArenaConfig {
            box_spawn_rate: 100,
            ..ArenaConfig::default()
        };
        let grid = generate(&config, 99);

        for spawn in config.spawn_cells() {
            assert!(grid.is_air(spawn));
            let exits = bomber_arena_core::Direction::ALL
                .into_iter()
                .filter(|direction| grid.is_air(spawn.neighbor(*direction)))
                .count();
            assert_eq!(exits, 2, "spawn {spawn:?} should have two exits");
        }
        assert!(grid.is_box(CellPos::new(5, 5)));
    }
}

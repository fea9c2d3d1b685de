//! Bomb fuse progression and blast propagation.

use std::collections::{HashSet, VecDeque};

use bomber_arena_core::{Block, CellPos, Direction, Grid, BLAST_REACH};

/// Result of a single bomb going off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Detonation {
    pub(crate) cell: CellPos,
    pub(crate) blast: Vec<CellPos>,
    pub(crate) destroyed_boxes: Vec<CellPos>,
}

/// Advances the grid by one tick.
///
/// The first pass clears last tick's explosions and bumps every fuse. The
/// second pass detonates every bomb whose fuse reached `max_fuse`, reading
/// eligibility from the post-increment grid. Bombs caught in a blast detonate
/// in the same pass.
pub(crate) fn advance(grid: &mut Grid, max_fuse: u8) -> Vec<Detonation> {
    let mut updates = Vec::new();
    let mut ready = VecDeque::new();
    for (pos, block) in grid.iter() {
        match block {
            Block::Explosion => updates.push((pos, Block::Air)),
            Block::Bomb { stage } => {
                let stage = stage.saturating_add(1).min(max_fuse);
                updates.push((pos, Block::Bomb { stage }));
                if stage >= max_fuse {
                    ready.push_back(pos);
                }
            }
            Block::Air | Block::Wall | Block::Box => {}
        }
    }
    for (pos, block) in updates {
        grid.set(pos, block);
    }

    let mut detonated = HashSet::new();
    let mut detonations = Vec::new();
    while let Some(origin) = ready.pop_front() {
        if !detonated.insert(origin) {
            continue;
        }
        let (detonation, chained) = detonate(grid, origin);
        ready.extend(chained);
        detonations.push(detonation);
    }
    detonations
}

/// Converts `origin` and its cardinal neighbourhood into explosions.
///
/// Returns the detonation together with bombs the blast reached.
pub(crate) fn detonate(grid: &mut Grid, origin: CellPos) -> (Detonation, Vec<CellPos>) {
    let mut blast = vec![origin];
    let mut destroyed_boxes = Vec::new();
    let mut chained = Vec::new();
    grid.set(origin, Block::Explosion);

    for direction in Direction::ALL {
        for distance in 1..=BLAST_REACH {
            let pos = origin.offset(direction, distance);
            if !grid.contains(pos) {
                break;
            }
            match grid.block(pos) {
                Block::Wall => break,
                Block::Box => {
                    grid.set(pos, Block::Explosion);
                    blast.push(pos);
                    destroyed_boxes.push(pos);
                    break;
                }
                Block::Bomb { .. } => {
                    grid.set(pos, Block::Explosion);
                    blast.push(pos);
                    chained.push(pos);
                }
                Block::Air | Block::Explosion => {
                    grid.set(pos, Block::Explosion);
                    blast.push(pos);
                }
            }
        }
    }

    (
        Detonation {
            cell: origin,
            blast,
            destroyed_boxes,
        },
        chained,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid() -> Grid {
        Grid::bordered(9, 9)
    }

    #[test]
    fn fuse_increments_once_per_advance() {
        let mut grid = open_grid();
        grid.set(CellPos::new(4, 4), Block::Bomb { stage: 3 });

        let detonations = advance(&mut grid, 10);

        assert!(detonations.is_empty());
        assert_eq!(grid.block(CellPos::new(4, 4)), Block::Bomb { stage: 4 });
    }

    #[test]
    fn bomb_detonates_when_fuse_reaches_maximum() {
        let mut grid = open_grid();
        grid.set(CellPos::new(4, 4), Block::Bomb { stage: 9 });

        let detonations = advance(&mut grid, 10);

        assert_eq!(detonations.len(), 1);
        let detonation = &detonations[0];
        assert_eq!(detonation.cell, CellPos::new(4, 4));
        assert_eq!(detonation.blast.len(), 9);
        for pos in &detonation.blast {
            assert!(grid.is_explosion(*pos), "{pos:?}");
        }
        assert!(grid.is_air(CellPos::new(4, 1)));
        assert!(grid.is_air(CellPos::new(5, 5)));
    }

    #[test]
    fn explosions_decay_after_one_tick() {
        let mut grid = open_grid();
        grid.set(CellPos::new(4, 4), Block::Bomb { stage: 1 });

        let _ = advance(&mut grid, 2);
        assert!(grid.is_explosion(CellPos::new(4, 4)));

        let detonations = advance(&mut grid, 2);
        assert!(detonations.is_empty());
        assert!(grid.iter().all(|(_, block)| block != Block::Explosion));
    }

    #[test]
    fn walls_stop_the_blast_and_survive() {
        let mut grid = open_grid();
        grid.set(CellPos::new(4, 3), Block::Wall);
        let (detonation, _) = detonate(&mut grid, CellPos::new(4, 4));

        assert!(grid.is_wall(CellPos::new(4, 3)));
        assert!(grid.is_air(CellPos::new(4, 2)));
        assert!(!detonation.blast.contains(&CellPos::new(4, 3)));
    }

    #[test]
    fn boxes_absorb_the_blast() {
        let mut grid = open_grid();
        grid.set(CellPos::new(5, 4), Block::Box);
        let (detonation, _) = detonate(&mut grid, CellPos::new(4, 4));

        assert!(grid.is_explosion(CellPos::new(5, 4)));
        assert!(grid.is_air(CellPos::new(6, 4)));
        assert_eq!(detonation.destroyed_boxes, vec![CellPos::new(5, 4)]);
    }

    #[test]
    fn border_walls_are_never_overwritten() {
        let mut grid = open_grid();
        let (detonation, _) = detonate(&mut grid, CellPos::new(1, 1));

        assert!(grid.is_wall(CellPos::new(0, 1)));
        assert!(grid.is_wall(CellPos::new(1, 0)));
        assert_eq!(detonation.blast.len(), 5);
    }

    #[test]
    fn blast_ignites_neighbouring_bombs_in_the_same_pass() {
        let mut grid = open_grid();
        grid.set(CellPos::new(2, 4), Block::Bomb { stage: 4 });
        grid.set(CellPos::new(4, 4), Block::Bomb { stage: 1 });

        let detonations = advance(&mut grid, 5);

        let origins: Vec<CellPos> = detonations.iter().map(|d| d.cell).collect();
        assert_eq!(origins, vec![CellPos::new(2, 4), CellPos::new(4, 4)]);
        assert!(grid.is_explosion(CellPos::new(6, 4)));
    }
}

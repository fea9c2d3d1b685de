#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Danger assessment over grid snapshots.
//!
//! Two deliberately different queries live here. [`is_bomb_threatening`]
//! ignores walls entirely and is the coarse check used for flee triggers and
//! movement validation. [`is_field_safe`] accounts for a blocked neighbour
//! shielding the cell behind it and drives path searches. They disagree near
//! walls and callers must not substitute one for the other.

use bomber_arena_core::{CellPos, Direction, Grid, BLAST_REACH};

/// Reports whether a bomb sits on `pos` or up to two cells away along its row
/// or column, ignoring anything in between.
#[must_use]
pub fn is_bomb_threatening(grid: &Grid, pos: CellPos) -> bool {
    if grid.is_bomb(pos) {
        return true;
    }
    Direction::ALL.into_iter().any(|direction| {
        (1..=BLAST_REACH).any(|distance| grid.is_bomb(pos.offset(direction, distance)))
    })
}

/// Reports whether `pos` is clear of imminent blasts.
///
/// The cell must hold no bomb, none of its four neighbours may hold a bomb,
/// and for each unblocked neighbour the cell beyond it must hold no bomb.
#[must_use]
pub fn is_field_safe(grid: &Grid, pos: CellPos) -> bool {
    if grid.is_bomb(pos) {
        return false;
    }
    Direction::ALL.into_iter().all(|direction| {
        let near = pos.neighbor(direction);
        if grid.is_bomb(near) {
            return false;
        }
        grid.is_blocked(near) || !grid.is_bomb(pos.offset(direction, 2))
    })
}

/// Reports whether a bomb placed at `from` could reach `to`, ignoring walls.
///
/// The relation is symmetric.
#[must_use]
pub fn could_blast_reach(from: CellPos, to: CellPos) -> bool {
    let same_column = from.x() == to.x() && from.y().abs_diff(to.y()) <= BLAST_REACH.unsigned_abs();
    let same_row = from.y() == to.y() && from.x().abs_diff(to.x()) <= BLAST_REACH.unsigned_abs();
    same_column || same_row
}

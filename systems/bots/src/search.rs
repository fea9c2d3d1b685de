//! Bounded grid searches shared by the bot strategies.
//!
//! Every search works on a shared grid reference or on a private scratch
//! copy, and every walk is bounded by an explicit depth.

use std::collections::{HashSet, VecDeque};

use bomber_arena_core::{Block, CellPos, Direction, Grid};
use bomber_arena_system_danger::is_field_safe;

/// Checks whether a bomb dropped at `at` still leaves a way out.
///
/// The bomb is placed on a scratch copy of `grid`. From each neighbour, in
/// direction priority order, the search walks up to `depth` moves without
/// immediately reversing and succeeds on the first field-safe cell it reaches.
#[must_use]
pub fn plant_bomb_is_safe(grid: &Grid, at: CellPos, depth: u32) -> bool {
    if depth == 0 {
        return false;
    }
    let mut scratch = grid.snapshot();
    scratch.set(at, Block::Bomb { stage: 1 });
    Direction::ALL
        .into_iter()
        .any(|direction| escape_exists(&scratch, at.neighbor(direction), direction, depth - 1))
}

fn escape_exists(grid: &Grid, pos: CellPos, heading: Direction, remaining: u32) -> bool {
    if grid.is_blocked(pos) {
        return false;
    }
    if is_field_safe(grid, pos) {
        return true;
    }
    if remaining == 0 {
        return false;
    }
    Direction::ALL
        .into_iter()
        .filter(|direction| *direction != heading.opposite())
        .any(|direction| escape_exists(grid, pos.neighbor(direction), direction, remaining - 1))
}

/// Finds the first step towards the nearest field-safe cell within `depth` moves.
///
/// Returns `None` when `from` is already safe or no safe cell is reachable.
/// Among successful branches the shallowest discovery wins; ties keep the
/// earlier direction in priority order.
#[must_use]
pub fn flee_direction(grid: &Grid, from: CellPos, depth: u32) -> Option<Direction> {
    if is_field_safe(grid, from) {
        return None;
    }
    let mut visited = HashSet::new();
    let _ = visited.insert(from);

    let mut best: Option<(Direction, u32)> = None;
    for direction in Direction::ALL {
        let next = from.neighbor(direction);
        if grid.is_blocked(next) || depth == 0 {
            continue;
        }
        if let Some(remaining) = search_safe_field(grid, next, depth - 1, &mut visited) {
            if best.map_or(true, |(_, value)| remaining > value) {
                best = Some((direction, remaining));
            }
        }
    }
    best.map(|(direction, _)| direction)
}

/// Remaining depth budget at the shallowest safe cell reachable from `pos`.
///
/// `visited` holds the cells on the current path and is restored on return.
fn search_safe_field(
    grid: &Grid,
    pos: CellPos,
    depth: u32,
    visited: &mut HashSet<CellPos>,
) -> Option<u32> {
    if visited.contains(&pos) {
        return None;
    }
    if is_field_safe(grid, pos) {
        return Some(depth);
    }
    if depth == 0 {
        return None;
    }

    let _ = visited.insert(pos);
    let mut best = None;
    for direction in Direction::ALL {
        let next = pos.neighbor(direction);
        if grid.is_blocked(next) {
            continue;
        }
        if let Some(value) = search_safe_field(grid, next, depth - 1, visited) {
            if best.map_or(true, |current| value > current) {
                best = Some(value);
            }
        }
    }
    let _ = visited.remove(&pos);
    best
}

/// First step of a walk over safe, unblocked cells that ends closest to `goal`.
///
/// Cells are explored breadth first up to `depth` moves away, so each cell is
/// reached along a shortest path. The closest cell wins; ties go to the one
/// found first. Returns `None` when no reachable cell is closer to `goal` than
/// `from`.
#[must_use]
pub fn step_toward(grid: &Grid, from: CellPos, goal: CellPos, depth: u32) -> Option<Direction> {
    let mut visited = HashSet::from([from]);
    let mut frontier: VecDeque<(CellPos, Direction, u32)> = VecDeque::new();
    for direction in Direction::ALL {
        let next = from.neighbor(direction);
        if depth > 0 && is_walkable(grid, next) && visited.insert(next) {
            frontier.push_back((next, direction, 1));
        }
    }

    let mut best: (u32, Option<Direction>) = (from.manhattan_distance(goal), None);
    while let Some((pos, first, walked)) = frontier.pop_front() {
        let distance = pos.manhattan_distance(goal);
        if distance < best.0 {
            best = (distance, Some(first));
            if distance == 0 {
                break;
            }
        }
        if walked == depth {
            continue;
        }
        for direction in Direction::ALL {
            let next = pos.neighbor(direction);
            if is_walkable(grid, next) && visited.insert(next) {
                frontier.push_back((next, first, walked + 1));
            }
        }
    }
    best.1
}

fn is_walkable(grid: &Grid, pos: CellPos) -> bool {
    !grid.is_blocked(pos) && is_field_safe(grid, pos)
}

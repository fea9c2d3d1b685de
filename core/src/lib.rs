#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Bomber Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure decision systems. The game loop submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values.
//! Decision systems never touch live state: they receive a [`Grid`] snapshot
//! and an [`AgentView`] and answer with a single [`Action`] through the
//! [`BotStrategy`] capability.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of agent slots that take part in every match.
pub const AGENT_COUNT: usize = 4;

/// Number of cells a blast travels outward from a bomb in each cardinal direction.
pub const BLAST_REACH: i32 = 2;

/// Location of a single grid cell expressed as column (`x`) and row (`y`).
///
/// Positions are signed so that neighbour arithmetic near the border stays
/// representable; grid lookups clamp them into range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    x: i32,
    y: i32,
}

impl CellPos {
    /// Creates a new cell position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: CellPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Position one cell away in the provided direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> CellPos {
        self.offset(direction, 1)
    }

    /// Position `steps` cells away in the provided direction.
    #[must_use]
    pub const fn offset(self, direction: Direction, steps: i32) -> CellPos {
        let (dx, dy) = direction.delta();
        CellPos::new(self.x + dx * steps, self.y + dy * steps)
    }
}

/// Cardinal directions an agent can step in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the fixed priority order used by searches.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Column and row delta applied by a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Vocabulary an agent may emit once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Step one cell up.
    MoveUp,
    /// Step one cell down.
    MoveDown,
    /// Step one cell to the left.
    MoveLeft,
    /// Step one cell to the right.
    MoveRight,
    /// Place a bomb on the agent's current cell.
    PlaceBomb,
    /// Do nothing this tick.
    #[default]
    Idle,
}

impl Action {
    /// Movement action that steps in the provided direction.
    #[must_use]
    pub const fn step(direction: Direction) -> Action {
        match direction {
            Direction::Up => Self::MoveUp,
            Direction::Down => Self::MoveDown,
            Direction::Left => Self::MoveLeft,
            Direction::Right => Self::MoveRight,
        }
    }

    /// Direction of travel for movement actions.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::PlaceBomb | Self::Idle => None,
        }
    }
}

/// Content of a single grid cell.
///
/// Agents are not stored in the grid; their positions are tracked separately
/// and only overlaid for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Block {
    /// Empty, walkable cell.
    Air,
    /// Indestructible wall.
    Wall,
    /// Destructible obstacle that absorbs a blast.
    Box,
    /// Live bomb counting up towards its fuse length.
    Bomb {
        /// Current fuse stage, starting at one.
        stage: u8,
    },
    /// Blast residue that damages agents and decays to air after one tick.
    Explosion,
}

impl Block {
    /// Reports whether the block prevents movement.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Wall | Self::Box)
    }

    /// Reports whether the block is a live bomb.
    #[must_use]
    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb { .. })
    }
}

/// Dense row-major grid of [`Block`] values.
///
/// Every query clamps out-of-range coordinates to the nearest valid cell rather
/// than failing. Cloning a grid yields a fully independent snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Block>,
}

impl Grid {
    /// Creates a grid with every cell set to `block`.
    #[must_use]
    pub fn filled(width: u32, height: u32, block: Block) -> Self {
        let capacity = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![block; capacity],
        }
    }

    /// Creates a grid of air enclosed by a ring of walls.
    #[must_use]
    pub fn bordered(width: u32, height: u32) -> Self {
        let mut grid = Self::filled(width, height, Block::Air);
        for y in 0..to_i32(height) {
            for x in 0..to_i32(width) {
                let pos = CellPos::new(x, y);
                if grid.is_border(pos) {
                    grid.set(pos, Block::Wall);
                }
            }
        }
        grid
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.x() >= 0
            && pos.y() >= 0
            && pos.x() < to_i32(self.width)
            && pos.y() < to_i32(self.height)
    }

    /// Reports whether the position lies on the outer ring.
    #[must_use]
    pub fn is_border(&self, pos: CellPos) -> bool {
        self.contains(pos)
            && (pos.x() == 0
                || pos.y() == 0
                || pos.x() == to_i32(self.width) - 1
                || pos.y() == to_i32(self.height) - 1)
    }

    /// Clamps the position to the nearest in-range coordinate.
    #[must_use]
    pub fn clamp(&self, pos: CellPos) -> CellPos {
        let max_x = (to_i32(self.width) - 1).max(0);
        let max_y = (to_i32(self.height) - 1).max(0);
        CellPos::new(pos.x().clamp(0, max_x), pos.y().clamp(0, max_y))
    }

    /// Block stored at the clamped position.
    ///
    /// An empty grid reports walls everywhere.
    #[must_use]
    pub fn block(&self, pos: CellPos) -> Block {
        self.index(self.clamp(pos))
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(Block::Wall)
    }

    /// Overwrites the block at an in-range position; out-of-range writes are ignored.
    pub fn set(&mut self, pos: CellPos, block: Block) {
        if let Some(slot) = self.index(pos).and_then(|index| self.cells.get_mut(index)) {
            *slot = block;
        }
    }

    /// True iff the clamped cell is a wall or a box.
    #[must_use]
    pub fn is_blocked(&self, pos: CellPos) -> bool {
        self.block(pos).is_blocked()
    }

    /// True iff the clamped cell holds a live bomb.
    #[must_use]
    pub fn is_bomb(&self, pos: CellPos) -> bool {
        self.block(pos).is_bomb()
    }

    /// True iff the clamped cell is a wall.
    #[must_use]
    pub fn is_wall(&self, pos: CellPos) -> bool {
        self.block(pos) == Block::Wall
    }

    /// True iff the clamped cell is a box.
    #[must_use]
    pub fn is_box(&self, pos: CellPos) -> bool {
        self.block(pos) == Block::Box
    }

    /// True iff the clamped cell is blast residue.
    #[must_use]
    pub fn is_explosion(&self, pos: CellPos) -> bool {
        self.block(pos) == Block::Explosion
    }

    /// True iff the clamped cell is air.
    #[must_use]
    pub fn is_air(&self, pos: CellPos) -> bool {
        self.block(pos) == Block::Air
    }

    /// Places a fresh bomb at stage one.
    ///
    /// Does nothing unless the in-range target cell is air. Returns whether a
    /// bomb was placed.
    pub fn place_bomb(&mut self, pos: CellPos) -> bool {
        if !self.contains(pos) || !self.is_air(pos) {
            return false;
        }
        self.set(pos, Block::Bomb { stage: 1 });
        true
    }

    /// Deep copy handed to decision logic.
    #[must_use]
    pub fn snapshot(&self) -> Grid {
        self.clone()
    }

    /// Iterator over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, Block)> + '_ {
        let width = to_i32(self.width).max(1);
        self.cells.iter().enumerate().map(move |(index, block)| {
            let index = i32::try_from(index).unwrap_or(i32::MAX);
            (CellPos::new(index % width, index / width), *block)
        })
    }

    /// Iterator over every live bomb and its fuse stage.
    pub fn bombs(&self) -> impl Iterator<Item = (CellPos, u8)> + '_ {
        self.iter().filter_map(|(pos, block)| match block {
            Block::Bomb { stage } => Some((pos, stage)),
            _ => None,
        })
    }

    fn index(&self, pos: CellPos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let x = usize::try_from(pos.x()).ok()?;
        let y = usize::try_from(pos.y()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        y.checked_mul(width)?.checked_add(x)
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Unique identifier assigned to an agent slot, numbered one through four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(u8);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Zero-based slot index used for per-agent arrays.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    /// Identifiers of every agent slot in turn order.
    #[must_use]
    pub const fn roster() -> [AgentId; AGENT_COUNT] {
        [AgentId(1), AgentId(2), AgentId(3), AgentId(4)]
    }
}

/// Immutable representation of a single agent used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// Identifier of the agent.
    pub id: AgentId,
    /// Display name of the strategy controlling the agent.
    pub name: String,
    /// Cell currently occupied by the agent.
    pub position: CellPos,
    /// Remaining lives; zero means eliminated.
    pub lives: u32,
}

impl AgentSnapshot {
    /// Reports whether the agent still takes turns.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

/// Read-only snapshot describing every agent in the arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgentView {
    snapshots: Vec<AgentSnapshot>,
}

impl AgentView {
    /// Creates a new agent view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AgentSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the agent with the provided identifier.
    #[must_use]
    pub fn get(&self, id: AgentId) -> Option<&AgentSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Living agents other than `me`, in identifier order.
    pub fn opponents_of(&self, me: AgentId) -> impl Iterator<Item = &AgentSnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| snapshot.id != me && snapshot.is_alive())
    }

    /// Number of agents with lives remaining.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.snapshots.iter().filter(|snapshot| snapshot.is_alive()).count()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AgentSnapshot> {
        self.snapshots
    }
}

/// Tunable arena constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of rows; odd and at least five.
    pub height: u32,
    /// Number of columns; odd and at least five.
    pub width: u32,
    /// Lives each agent starts with.
    pub max_lives: u32,
    /// Percentage chance (0..=100) that an eligible interior cell starts as a box.
    pub box_spawn_rate: u8,
    /// Fuse stage at which a bomb detonates.
    pub max_fuse: u8,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            height: 11,
            width: 11,
            max_lives: 3,
            box_spawn_rate: 75,
            max_fuse: 10,
        }
    }
}

impl ArenaConfig {
    /// Checks the configuration against the arena's structural requirements.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("height", self.height), ("width", self.width)] {
            if value < 5 {
                return Err(ConfigError::DimensionTooSmall { axis, value });
            }
            if value % 2 == 0 {
                return Err(ConfigError::EvenDimension { axis, value });
            }
        }
        if self.max_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.box_spawn_rate > 100 {
            return Err(ConfigError::SpawnRateOutOfRange(self.box_spawn_rate));
        }
        if self.max_fuse == 0 {
            return Err(ConfigError::ZeroFuse);
        }
        Ok(())
    }

    /// Spawn cells of agents one through four: the four corners inside the border.
    #[must_use]
    pub fn spawn_cells(&self) -> [CellPos; AGENT_COUNT] {
        let right = to_i32(self.width) - 2;
        let bottom = to_i32(self.height) - 2;
        [
            CellPos::new(1, 1),
            CellPos::new(right, 1),
            CellPos::new(1, bottom),
            CellPos::new(right, bottom),
        ]
    }
}

/// Reasons an [`ArenaConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Grid dimensions must be odd so pillars line up with the border.
    #[error("{axis} must be odd (received {value})")]
    EvenDimension {
        /// Name of the offending dimension.
        axis: &'static str,
        /// Provided value.
        value: u32,
    },
    /// Grid dimensions must leave room for spawns and a pillar row.
    #[error("{axis} must be at least 5 (received {value})")]
    DimensionTooSmall {
        /// Name of the offending dimension.
        axis: &'static str,
        /// Provided value.
        value: u32,
    },
    /// Agents need at least one life.
    #[error("max_lives must be at least 1")]
    NoLives,
    /// Spawn rate is a percentage.
    #[error("box_spawn_rate must be within 0..=100 (received {0})")]
    SpawnRateOutOfRange(u8),
    /// Bombs need at least one fuse stage.
    #[error("max_fuse must be at least 1")]
    ZeroFuse,
    /// A supplied grid left a border cell open.
    #[error("border cell ({}, {}) must be a wall", .0.x(), .0.y())]
    OpenBorder(CellPos),
    /// A supplied grid blocks one of the spawn corners.
    #[error("spawn cell ({}, {}) is not free", .0.x(), .0.y())]
    BlockedSpawn(CellPos),
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the tick counter and runs the blast engine once.
    Tick,
    /// Places a bomb on the agent's current cell.
    PlaceBomb {
        /// Agent placing the bomb.
        agent: AgentId,
    },
    /// Moves the agent a single cell.
    StepAgent {
        /// Agent attempting to move.
        agent: AgentId,
        /// Direction of travel.
        direction: Direction,
    },
    /// Deducts a life from every living agent standing in an explosion.
    ResolveBlastDamage,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Confirms that a bomb was placed.
    BombPlaced {
        /// Agent that placed the bomb.
        agent: AgentId,
        /// Cell holding the new bomb.
        cell: CellPos,
    },
    /// Reports that a placement found its cell no longer empty.
    BombFizzled {
        /// Agent that attempted the placement.
        agent: AgentId,
        /// Cell that rejected the bomb.
        cell: CellPos,
    },
    /// Reports a detonation and the cells it converted.
    BombDetonated {
        /// Cell that held the bomb.
        cell: CellPos,
        /// Every cell turned into an explosion, the bomb cell first.
        blast: Vec<CellPos>,
        /// Boxes destroyed by the blast.
        destroyed_boxes: Vec<CellPos>,
    },
    /// Confirms that an agent moved between two cells.
    AgentMoved {
        /// Agent that moved.
        agent: AgentId,
        /// Cell occupied before moving.
        from: CellPos,
        /// Cell occupied after moving.
        to: CellPos,
    },
    /// Reports that an agent lost a life.
    AgentDamaged {
        /// Agent that took damage.
        agent: AgentId,
        /// Lives remaining afterwards.
        lives: u32,
    },
    /// Reports that an agent ran out of lives.
    AgentEliminated {
        /// Agent that was eliminated.
        agent: AgentId,
    },
    /// Announces that fewer than two agents remain.
    MatchEnded {
        /// Agents with lives remaining.
        survivors: Vec<AgentId>,
    },
}

/// Per-tick decision capability shared by bots and human input sources.
///
/// Implementations only ever receive snapshots; they cannot reach live state.
pub trait BotStrategy {
    /// Display name recorded for the controlled agent.
    fn name(&self) -> &str;

    /// Chooses the action for `me` given frozen views of the arena.
    fn decide(&mut self, grid: &Grid, agents: &AgentView, tick: u64, me: &AgentSnapshot) -> Action;
}

impl<T: BotStrategy + ?Sized> BotStrategy for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decide(&mut self, grid: &Grid, agents: &AgentView, tick: u64, me: &AgentSnapshot) -> Action {
        (**self).decide(grid, agents, tick, me)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellPos::new(1, 1);
        let destination = CellPos::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn bordered_grid_walls_the_outer_ring() {
        let grid = Grid::bordered(5, 7);
        for (pos, block) in grid.iter() {
            if grid.is_border(pos) {
                assert_eq!(block, Block::Wall, "{pos:?}");
            } else {
                assert_eq!(block, Block::Air, "{pos:?}");
            }
        }
    }

    #[test]
    fn queries_clamp_out_of_range_coordinates() {
        let mut grid = Grid::bordered(5, 5);
        grid.set(CellPos::new(3, 1), Block::Box);
        assert!(grid.is_wall(CellPos::new(-3, 2)));
        assert!(grid.is_wall(CellPos::new(2, 99)));
        assert_eq!(grid.clamp(CellPos::new(-1, 9)), CellPos::new(0, 4));
        assert!(grid.is_box(CellPos::new(3, 1)));
    }

    #[test]
    fn is_blocked_covers_walls_and_boxes_only() {
        let mut grid = Grid::bordered(7, 7);
        grid.set(CellPos::new(1, 1), Block::Box);
        grid.set(CellPos::new(2, 1), Block::Bomb { stage: 3 });
        grid.set(CellPos::new(3, 1), Block::Explosion);

        assert!(grid.is_blocked(CellPos::new(0, 0)));
        assert!(grid.is_blocked(CellPos::new(1, 1)));
        assert!(!grid.is_blocked(CellPos::new(2, 1)));
        assert!(!grid.is_blocked(CellPos::new(3, 1)));
        assert!(!grid.is_blocked(CellPos::new(4, 1)));
    }

    #[test]
    fn place_bomb_requires_air() {
        let mut grid = Grid::bordered(7, 7);
        assert!(grid.place_bomb(CellPos::new(2, 2)));
        assert_eq!(grid.block(CellPos::new(2, 2)), Block::Bomb { stage: 1 });
        assert!(!grid.place_bomb(CellPos::new(2, 2)));
        assert!(!grid.place_bomb(CellPos::new(0, 0)));
        assert!(!grid.place_bomb(CellPos::new(-1, 3)));
        assert_eq!(grid.bombs().count(), 1);
    }

    #[test]
    fn snapshot_is_independent_of_original() {
        let mut grid = Grid::bordered(7, 7);
        let snapshot = grid.snapshot();
        assert_eq!(snapshot, grid);

        grid.set(CellPos::new(3, 3), Block::Box);
        assert!(snapshot.is_air(CellPos::new(3, 3)));
        assert_ne!(snapshot, grid);
    }

    #[test]
    fn agent_view_orders_and_filters_opponents() {
        let snapshot = |id: u8, lives: u32| AgentSnapshot {
            id: AgentId::new(id),
            name: format!("agent-{id}"),
            position: CellPos::new(1, 1),
            lives,
        };
        let view = AgentView::from_snapshots(vec![
            snapshot(3, 1),
            snapshot(1, 2),
            snapshot(4, 0),
            snapshot(2, 3),
        ]);

        let ids: Vec<u8> = view.iter().map(|agent| agent.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let opponents: Vec<u8> = view
            .opponents_of(AgentId::new(2))
            .map(|agent| agent.id.get())
            .collect();
        assert_eq!(opponents, vec![1, 3]);
        assert_eq!(view.alive_count(), 3);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ArenaConfig::default().validate(), Ok(()));
    }

    #[test]
    fn config_rejects_even_and_tiny_dimensions() {
        let even = ArenaConfig {
            width: 12,
            ..ArenaConfig::default()
        };
        assert_eq!(
            even.validate(),
            Err(ConfigError::EvenDimension {
                axis: "width",
                value: 12
            })
        );

        let tiny = ArenaConfig {
            height: 3,
            ..ArenaConfig::default()
        };
        assert_eq!(
            tiny.validate(),
            Err(ConfigError::DimensionTooSmall {
                axis: "height",
                value: 3
            })
        );
    }

    #[test]
    fn config_rejects_degenerate_values() {
        let base = ArenaConfig::default();
        assert_eq!(
            ArenaConfig { max_lives: 0, ..base }.validate(),
            Err(ConfigError::NoLives)
        );
        assert_eq!(
            ArenaConfig {
                box_spawn_rate: 101,
                ..base
            }
            .validate(),
            Err(ConfigError::SpawnRateOutOfRange(101))
        );
        assert_eq!(
            ArenaConfig { max_fuse: 0, ..base }.validate(),
            Err(ConfigError::ZeroFuse)
        );
    }

    #[test]
    fn spawn_cells_sit_inside_the_corners() {
        let spawns = ArenaConfig::default().spawn_cells();
        assert_eq!(
            spawns,
            [
                CellPos::new(1, 1),
                CellPos::new(9, 1),
                CellPos::new(1, 9),
                CellPos::new(9, 9),
            ]
        );
    }

    #[test]
    fn grid_round_trips_through_bincode() {
        let mut grid = Grid::bordered(5, 5);
        grid.set(CellPos::new(2, 2), Block::Bomb { stage: 4 });
        assert_round_trip(&grid);
    }

    #[test]
    fn action_round_trips_through_bincode() {
        assert_round_trip(&Action::PlaceBomb);
        assert_round_trip(&Action::step(Direction::Left));
    }
}

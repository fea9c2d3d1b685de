#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Bomber Arena adapters.
//!
//! Renderers receive an immutable [`Frame`] after each tick has been fully
//! resolved. Nothing they do can feed back into the simulation.

use anyhow::Result as AnyResult;
use bomber_arena_core::{Action, AgentId, AgentView, Block, CellPos, Grid, AGENT_COUNT};

/// Opaque RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let lift = |channel: u8| {
            let channel = f32::from(channel);
            (channel + (255.0 - channel) * amount).round() as u8
        };

        Self {
            red: lift(self.red),
            green: lift(self.green),
            blue: lift(self.blue),
        }
    }
}

/// What a renderer should draw for a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Empty floor.
    Air,
    /// Indestructible wall.
    Wall,
    /// Destructible box.
    Box,
    /// Live bomb.
    Bomb {
        /// Current fuse stage.
        stage: u8,
    },
    /// Blast residue.
    Explosion,
    /// Living agent standing on the cell.
    Agent(AgentId),
}

impl Tile {
    /// Single-character representation used by text renderers.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Air => ' ',
            Self::Wall => '#',
            Self::Box => '+',
            Self::Bomb { .. } => 'o',
            Self::Explosion => '*',
            Self::Agent(id) => match id.get() {
                1 => '1',
                2 => '2',
                3 => '3',
                4 => '4',
                _ => '?',
            },
        }
    }
}

impl From<Block> for Tile {
    fn from(block: Block) -> Self {
        match block {
            Block::Air => Self::Air,
            Block::Wall => Self::Wall,
            Block::Box => Self::Box,
            Block::Bomb { stage } => Self::Bomb { stage },
            Block::Explosion => Self::Explosion,
        }
    }
}

/// Colors assigned to each kind of tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Color of empty floor.
    pub air: Color,
    /// Color of walls.
    pub wall: Color,
    /// Color of boxes.
    pub crate_box: Color,
    /// Base color of bombs; later fuse stages are drawn lighter.
    pub bomb: Color,
    /// Color of explosions.
    pub explosion: Color,
    /// Color of each agent slot.
    pub agents: [Color; AGENT_COUNT],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            air: Color::from_rgb_u8(40, 40, 40),
            wall: Color::from_rgb_u8(120, 120, 120),
            crate_box: Color::from_rgb_u8(150, 100, 50),
            bomb: Color::from_rgb_u8(140, 0, 0),
            explosion: Color::from_rgb_u8(255, 200, 0),
            agents: [
                Color::from_rgb_u8(80, 160, 255),
                Color::from_rgb_u8(80, 220, 120),
                Color::from_rgb_u8(230, 90, 200),
                Color::from_rgb_u8(240, 240, 240),
            ],
        }
    }
}

impl Palette {
    /// Color used to draw `tile`.
    #[must_use]
    pub fn color(&self, tile: Tile) -> Color {
        match tile {
            Tile::Air => self.air,
            Tile::Wall => self.wall,
            Tile::Box => self.crate_box,
            Tile::Bomb { stage } => self.bomb.lighten(f32::from(stage) * 0.06),
            Tile::Explosion => self.explosion,
            Tile::Agent(id) => self.agents.get(id.slot()).copied().unwrap_or(self.air),
        }
    }
}

/// Immutable end-of-tick view handed to renderers.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Index of the tick that produced the frame.
    pub tick: u64,
    /// Live grid after the tick resolved.
    pub grid: &'a Grid,
    /// Every agent, including eliminated ones.
    pub agents: &'a AgentView,
    /// Validated action of each agent slot.
    pub actions: &'a [Action; AGENT_COUNT],
}

impl<'a> Frame<'a> {
    /// Tile to draw at `pos`, with living agents drawn over the grid.
    ///
    /// When agents share a cell the lowest identifier is shown.
    #[must_use]
    pub fn tile(&self, pos: CellPos) -> Tile {
        self.agents
            .iter()
            .find(|agent| agent.is_alive() && agent.position == pos)
            .map_or_else(|| Tile::from(self.grid.block(pos)), |agent| Tile::Agent(agent.id))
    }

    /// Rows of tiles from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Tile>> + '_ {
        let width = i32::try_from(self.grid.width()).unwrap_or(0);
        let height = i32::try_from(self.grid.height()).unwrap_or(0);
        (0..height).map(move |y| (0..width).map(|x| self.tile(CellPos::new(x, y))).collect())
    }
}

/// Presentation backend that consumes one frame per tick.
pub trait Renderer {
    /// Presents the provided frame.
    fn present(&mut self, frame: &Frame<'_>) -> AnyResult<()>;
}

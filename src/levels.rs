//! Level descriptors
//!
//! A level is a grid of brick characters plus its speeds. Levels are static
//! configuration; the ten built-in levels come from [`builtin_levels`] and
//! hosts may load their own pack from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::BrickKind;

/// One level of the campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub name: String,
    /// Brick rows, top to bottom. See [`BrickKind::from_grid_char`].
    pub bricks: Vec<String>,
    /// CSS background for the play area (render collaborator only)
    pub background: String,
    /// Ball speed (pixels per frame unit)
    pub ball_speed: f32,
    /// Paddle speed
    pub paddle_speed: f32,
}

/// A cell of the parsed brick grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub kind: BrickKind,
}

impl LevelDescriptor {
    /// Number of columns. Taken from the first row; shorter rows are padded
    /// with empty cells and longer rows are truncated.
    pub fn columns(&self) -> usize {
        self.bricks.first().map(|r| r.chars().count()).unwrap_or(0)
    }

    pub fn rows(&self) -> usize {
        self.bricks.len()
    }

    /// All brick-bearing cells in row-major order. Unknown characters are
    /// empty cells.
    pub fn cells(&self) -> Vec<GridCell> {
        let cols = self.columns();
        let mut cells = Vec::new();
        for (row, line) in self.bricks.iter().enumerate() {
            for (col, c) in line.chars().take(cols).enumerate() {
                if let Some(kind) = BrickKind::from_grid_char(c) {
                    cells.push(GridCell { row, col, kind });
                }
            }
        }
        cells
    }
}

/// Parse a level pack from JSON
pub fn levels_from_json(json: &str) -> crate::Result<Vec<LevelDescriptor>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a level pack from a JSON file
pub fn load_levels(path: impl AsRef<Path>) -> crate::Result<Vec<LevelDescriptor>> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let levels = levels_from_json(&json)?;
    log::info!(
        "Loaded {} levels from {}",
        levels.len(),
        path.as_ref().display()
    );
    Ok(levels)
}

struct BuiltinLevel {
    name: &'static str,
    bricks: &'static [&'static str],
    background: &'static str,
    ball_speed: f32,
    paddle_speed: f32,
}

impl From<&BuiltinLevel> for LevelDescriptor {
    fn from(level: &BuiltinLevel) -> Self {
        Self {
            name: level.name.to_string(),
            bricks: level.bricks.iter().map(|r| r.to_string()).collect(),
            background: level.background.to_string(),
            ball_speed: level.ball_speed,
            paddle_speed: level.paddle_speed,
        }
    }
}

/// The built-in campaign
pub fn builtin_levels() -> Vec<LevelDescriptor> {
    BUILTIN.iter().map(LevelDescriptor::from).collect()
}

macro_rules! level {
    ($name:expr, [$($row:expr),* $(,)?], $bg:expr, $ball:expr, $paddle:expr) => {
        BuiltinLevel {
            name: $name,
            bricks: &[$($row),*],
            background: $bg,
            ball_speed: $ball,
            paddle_speed: $paddle,
        }
    };
}

const BUILTIN: &[BuiltinLevel] = &[
    level!(
        "Neon Beginning",
        ["0000000000", "NNNNNNNNNN", "NNNNNNNNNN", "0000000000", "GGGGGGGGGG"],
        "radial-gradient(ellipse at center, #1a1a2e 0%, #0a0a0a 100%)",
        6.0,
        12.0
    ),
    level!(
        "Zigzag Zone",
        ["N0N0N0N0N0", "0N0N0N0N0N", "N0N0N0N0N0", "0N0N0N0N0N", "HHHHHHHHHH"],
        "radial-gradient(ellipse at center, #16213e 0%, #0a0a0a 100%)",
        6.5,
        13.0
    ),
    level!(
        "Purple Fortress",
        ["HHHHHHHHHH", "NNNNNNNNNN", "HHHHHHHHHH", "NNNNNNNNNN", "0G0G0G0G0G"],
        "radial-gradient(ellipse at center, #2a0845 0%, #0a0a0a 100%)",
        7.0,
        14.0
    ),
    level!(
        "Metal Madness",
        ["MMMMMMMMMM", "NNNNNNNNNN", "HHHHHHHHHH", "NNNNNNNNNN", "EEEEEEEEEE"],
        "radial-gradient(ellipse at center, #1e3c72 0%, #0a0a0a 100%)",
        7.5,
        15.0
    ),
    level!(
        "Diamond Dreams",
        [
            "000HHH0000",
            "00HHHHH000",
            "0HHHMHHH00",
            "HHHMMMMHHH",
            "0HHHGHHH00",
            "00HHHHH000",
            "000HHH0000",
        ],
        "radial-gradient(ellipse at center, #3a0845 0%, #0a0a0a 100%)",
        8.0,
        16.0
    ),
    level!(
        "Blast Zone",
        ["ENENENENENE", "NNNNNNNNNNN", "HHHHHHHHHH", "NNNNNNNNNNN", "MEMEMEMEME"],
        "radial-gradient(ellipse at center, #4a0e0e 0%, #0a0a0a 100%)",
        8.5,
        17.0
    ),
    level!(
        "Rainbow Rampage",
        [
            "MMMMMMMMMM",
            "HHHHHHHHHH",
            "NNNNNNNNNN",
            "GGGGGGGGGG",
            "EEEEEEEEEE",
            "HHHHHHHHHH",
            "MMMMMMMMMM",
        ],
        "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        9.0,
        18.0
    ),
    level!(
        "Fortress of Doom",
        [
            "MMMMMMMMMM",
            "M00000000M",
            "M0HHHHHH0M",
            "M0H0000H0M",
            "M0H0GG0H0M",
            "M0H0000H0M",
            "M0HHHHHH0M",
            "M00000000M",
            "MMMMMMMMMM",
        ],
        "radial-gradient(ellipse at center, #2d0a4e 0%, #0a0a0a 100%)",
        9.5,
        19.0
    ),
    level!(
        "Chaos Chamber",
        [
            "MEMEMEMEME",
            "EMHMHMHMHE",
            "MHMGMGMGHM",
            "EHMNMNMNHE",
            "MHMEMEMEHM",
            "EMHMHMHMHE",
            "MEMEMEMEME",
        ],
        "radial-gradient(ellipse at center, #4e0a0a 0%, #0a0a0a 100%)",
        10.0,
        20.0
    ),
    level!(
        "Neon Nightmare",
        [
            "MMMMMMMMMM",
            "MEHEHEHEME",
            "MHMMMMMHME",
            "MHMGGGMHME",
            "MHMGMGMHME",
            "MHMGGGMHME",
            "MHMMMMMHME",
            "MEHEHEHEME",
            "MMMMMMMMMM",
            "EEEEEEEEEE",
        ],
        "radial-gradient(ellipse at center, #0a0a0a 0%, #4a0e4e 100%)",
        11.0,
        20.0
    ),
];

//! Level data
//!
//! Levels are stored as rows of glyphs, one glyph per tile:
//!
//! | glyph | tile                 |
//! |-------|----------------------|
//! | `.`   | empty (0,0)          |
//! | `#`   | ground (0,1)         |
//! | `=`   | block (0,2)          |
//! | `E`   | enemy spawn (1,0)    |
//!
//! Every level is 45x16 tiles. On disk it is a small JSON document:
//! `{ "name": ..., "rows": [...] }` with 16 rows of 45 glyphs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::{MAP_COLS, MAP_ROWS};
use crate::sim::tiles::{Tile, TileGrid};

/// The shipped course: 45x16 tiles, goal past column 39
const BUILTIN_ROWS: [&str; MAP_ROWS] = [
    ".............................................",
    ".............................................",
    ".............................................",
    ".............................................",
    ".............................................",
    ".............................................",
    ".............................................",
    ".............................................",
    "........................===..................",
    ".............................................",
    "...........===...................E...........",
    ".................................====........",
    ".............................................",
    "...E.........E................E..............",
    "##########...############...##########.######",
    "==========...============...==========.======",
];

fn tile_for_glyph(glyph: char) -> Option<Tile> {
    match glyph {
        '.' => Some(Tile::EMPTY),
        '#' => Some(Tile::GROUND),
        '=' => Some(Tile::BLOCK),
        'E' => Some(Tile::SPAWN_MARKER),
        _ => None,
    }
}

/// JSON representation of a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    pub rows: Vec<String>,
}

/// Pristine level data: the grid as authored, spawn markers included
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub grid: TileGrid,
}

impl Level {
    /// Build a level from glyph rows: exactly `MAP_ROWS` rows of `MAP_COLS` glyphs.
    pub fn parse<S: AsRef<str>>(name: &str, rows: &[S]) -> Result<Self> {
        ensure!(
            rows.len() == MAP_ROWS,
            "level '{name}' has {} rows, expected {MAP_ROWS}",
            rows.len()
        );

        let mut grid = TileGrid::new(MAP_COLS, MAP_ROWS);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let row_width = row.chars().count();
            ensure!(
                row_width == MAP_COLS,
                "level '{name}' row {y} is {row_width} tiles wide, expected {MAP_COLS}"
            );
            for (x, glyph) in row.chars().enumerate() {
                let Some(tile) = tile_for_glyph(glyph) else {
                    bail!("level '{name}' row {y} column {x}: unknown glyph {glyph:?}");
                };
                grid.set(x as i32, y as i32, tile);
            }
        }

        Ok(Self {
            name: name.to_string(),
            grid,
        })
    }

    /// The course that ships with the game
    pub fn builtin() -> Self {
        let mut grid = TileGrid::new(MAP_COLS, MAP_ROWS);
        for (y, row) in BUILTIN_ROWS.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                grid.set(x as i32, y as i32, tile_for_glyph(glyph).unwrap_or_default());
            }
        }
        Self {
            name: "builtin".to_string(),
            grid,
        }
    }

    /// Load a JSON level file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading level file {}", path.display()))?;
        let file: LevelFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing level file {}", path.display()))?;
        let level = Self::parse(&file.name, &file.rows)?;
        log::info!(
            "Loaded level '{}' ({}x{}) from {}",
            level.name,
            level.grid.width(),
            level.grid.height(),
            path.display()
        );
        Ok(level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::tiles::TileLookup;

    #[test]
    fn test_builtin_dimensions() {
        let level = Level::builtin();
        assert_eq!(level.grid.width(), MAP_COLS);
        assert_eq!(level.grid.height(), MAP_ROWS);
        assert!(BUILTIN_ROWS.iter().all(|r| r.len() == MAP_COLS));
    }

    #[test]
    fn test_builtin_layout() {
        let level = Level::builtin();
        // Start column has ground under the spawn point
        assert!(level.grid.is_solid(0, 14));
        assert!(!level.grid.is_solid(0, 0));
        // First gap
        assert!(!level.grid.is_solid(11, 14));
        assert!(level.grid.is_spawn_marker(3, 13));
        assert!(level.grid.is_spawn_marker(33, 10));
        // Goal column is reachable on foot
        assert!(level.grid.is_solid(39, 14));
    }

    /// Full-size blank rows with `edits` applied as (x, y, glyph)
    fn rows_with(edits: &[(usize, usize, char)]) -> Vec<String> {
        let mut rows = vec![vec!['.'; MAP_COLS]; MAP_ROWS];
        for &(x, y, glyph) in edits {
            rows[y][x] = glyph;
        }
        rows.into_iter().map(|r| r.into_iter().collect()).collect()
    }

    #[test]
    fn test_parse_glyphs() {
        let rows = rows_with(&[(1, 0, '#'), (0, 1, '='), (1, 1, 'E')]);
        let level = Level::parse("tiny", &rows).unwrap();
        assert_eq!(level.grid.get(0, 0), Some(Tile::EMPTY));
        assert_eq!(level.grid.get(1, 0), Some(Tile::GROUND));
        assert_eq!(level.grid.get(0, 1), Some(Tile::BLOCK));
        assert_eq!(level.grid.get(1, 1), Some(Tile::SPAWN_MARKER));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert!(Level::parse("empty", &empty).is_err());

        let mut ragged = rows_with(&[]);
        ragged[5].pop();
        let err = Level::parse("ragged", &ragged).unwrap_err();
        assert!(err.to_string().contains("row 5 is 44 tiles wide"));

        let err = Level::parse("glyph", &rows_with(&[(2, 3, 'x')])).unwrap_err();
        assert!(err.to_string().contains("unknown glyph"));
    }

    #[test]
    fn test_parse_rejects_other_sizes() {
        assert!(Level::parse("small", &["...", "###"]).is_err());

        let mut short = rows_with(&[]);
        short.pop();
        assert!(Level::parse("short", &short).is_err());

        let wide: Vec<String> = rows_with(&[]).into_iter().map(|r| r + "..").collect();
        let err = Level::parse("wide", &wide).unwrap_err();
        assert!(err.to_string().contains("expected 45"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course.json");
        let file = LevelFile {
            name: "builtin".to_string(),
            rows: BUILTIN_ROWS.iter().map(|r| r.to_string()).collect(),
        };
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let loaded = Level::load(&path).unwrap();
        assert_eq!(loaded, Level::builtin());
    }

    #[test]
    fn test_load_rejects_wrong_size_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.json");
        fs::write(&path, r####"{ "name": "tiny", "rows": ["...", "###"] }"####).unwrap();
        assert!(Level::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = Level::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading level file"));
    }
}

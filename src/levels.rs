//! Level parsing and file discovery.
//!
//! This is the one boundary in the crate that decodes the outside world:
//! turning XSB-style text into the `Level` values `Board::new` consumes,
//! and turning a `screens` directory into an ordered list of level files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::board::Level;
use crate::grid::Tile;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid level: {0}")]
    Invalid(String),
}

fn tile_for_char(c: char) -> Result<Tile, LevelError> {
    Ok(match c {
        ' ' => Tile::FLOOR,
        '#' => Tile::WALL,
        '$' => Tile::BOX,
        '.' => Tile::GOAL,
        '@' => Tile::PLAYER,
        '*' => Tile::BOX_ON_GOAL,
        '+' => Tile::PLAYER_ON_GOAL,
        other => return Err(LevelError::Invalid(format!("unrecognized tile char '{other}'"))),
    })
}

/// Decodes a single level's text (no blank-line/`;` separators) into a
/// `Level`, padding short rows with floor on the right.
pub fn parse_level(text: &str) -> Result<Level, LevelError> {
    let rows: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    if rows.is_empty() {
        return Err(LevelError::Invalid("level has no rows".to_string()));
    }
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap();
    let height = rows.len();

    let mut tiles = Vec::with_capacity(width * height);
    for row in &rows {
        let mut count = 0;
        for c in row.chars() {
            tiles.push(tile_for_char(c)?);
            count += 1;
        }
        for _ in count..width {
            tiles.push(Tile::FLOOR);
        }
    }

    Ok(Level {
        width,
        height,
        tiles,
    })
}

/// Splits XSB text containing multiple levels, separated by `;`-prefixed
/// comment lines or blank lines, and parses each one.
pub fn parse_levels(text: &str) -> Result<Vec<Level>, LevelError> {
    let mut levels = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, levels: &mut Vec<Level>| -> Result<(), LevelError> {
        if !current.trim().is_empty() {
            levels.push(parse_level(current)?);
        }
        current.clear();
        Ok(())
    };

    for line in text.lines() {
        if line.trim_start().starts_with(';') {
            flush(&mut current, &mut levels)?;
            continue;
        }
        if line.is_empty() {
            flush(&mut current, &mut levels)?;
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    flush(&mut current, &mut levels)?;

    Ok(levels)
}

pub fn load_levels(path: &Path) -> Result<Vec<Level>, LevelError> {
    let contents = fs::read_to_string(path)?;
    parse_levels(&contents)
}

/// Returns every level file directly under `dir`, ordered by the length of
/// the numeric suffix following the final `.` in the filename (shorter
/// suffixes first), then lexicographically, matching the convention used
/// by the original solver's level directory (`screens`).
pub fn discover_level_files(dir: &Path) -> Result<Vec<PathBuf>, LevelError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    entries.sort_by_key(|path| sort_key(path));
    Ok(entries)
}

fn sort_key(path: &Path) -> (usize, String) {
    let suffix = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string();
    (suffix.len(), path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_level() {
        let level = parse_level("#####\n#@$.#\n#####\n").unwrap();
        assert_eq!(level.width, 5);
        assert_eq!(level.height, 3);
    }

    #[test]
    fn pads_short_rows_with_floor() {
        let level = parse_level("#####\n#@$.\n#####\n").unwrap();
        assert_eq!(level.width, 5);
        assert_eq!(level.tiles[5 + 4], Tile::FLOOR);
    }

    #[test]
    fn rejects_unrecognized_characters() {
        assert!(parse_level("#####\n#@$x#\n#####\n").is_err());
    }

    #[test]
    fn splits_multiple_levels_on_comment_lines() {
        let text = "; 1\n#####\n#@$.#\n#####\n\n; 2\n#####\n#@ .#\n#####\n";
        let levels = parse_levels(text).unwrap();
        assert_eq!(levels.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_levels(Path::new("does-not-exist.xsb"));
        assert!(matches!(result, Err(LevelError::Io(_))));
    }
}

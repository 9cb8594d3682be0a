//! Optional text-art sprites.
//!
//! Each sprite is a plain text file in the sprite directory.  A file that is
//! missing, unreadable or empty leaves that sprite unavailable and the
//! renderer draws a placeholder box instead; the game itself never waits on
//! or fails because of a sprite.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    EnemyPlane,
    FuelTank,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 3] = [
        SpriteKind::Player,
        SpriteKind::EnemyPlane,
        SpriteKind::FuelTank,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SpriteKind::Player => "player.txt",
            SpriteKind::EnemyPlane => "enemy_plane.txt",
            SpriteKind::FuelTank => "fuel_tank.txt",
        }
    }
}

/// A rectangular grid of glyphs.  Short lines are padded with spaces.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    pub fn parse(text: &str) -> Option<Self> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return None;
        }
        Some(Self { rows, width })
    }

    /// Nearest-neighbour lookup of the glyph for cell (`row`, `col`) when the
    /// sprite is stretched over `rows`×`cols` cells.
    pub fn sample(&self, row: u16, col: u16, rows: u16, cols: u16) -> char {
        let src_row = (row as usize * self.rows.len()) / rows.max(1) as usize;
        let src_col = (col as usize * self.width) / cols.max(1) as usize;
        self.rows
            .get(src_row)
            .and_then(|line| line.get(src_col))
            .copied()
            .unwrap_or(' ')
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpriteSet {
    player: Option<Sprite>,
    enemy_plane: Option<Sprite>,
    fuel_tank: Option<Sprite>,
}

impl SpriteSet {
    /// Load every sprite found in `dir`.  Never fails.
    pub fn load(dir: &Path) -> Self {
        let mut set = Self::default();
        for kind in SpriteKind::ALL {
            let path = dir.join(kind.file_name());
            let sprite = match fs::read_to_string(&path) {
                Ok(text) => Sprite::parse(&text),
                Err(e) => {
                    warn!("sprite {} unavailable ({}), using placeholder", path.display(), e);
                    None
                }
            };
            if sprite.is_some() {
                debug!("loaded sprite {}", path.display());
            }
            *set.slot(kind) = sprite;
        }
        set
    }

    pub fn get(&self, kind: SpriteKind) -> Option<&Sprite> {
        match kind {
            SpriteKind::Player => self.player.as_ref(),
            SpriteKind::EnemyPlane => self.enemy_plane.as_ref(),
            SpriteKind::FuelTank => self.fuel_tank.as_ref(),
        }
    }

    pub fn is_ready(&self, kind: SpriteKind) -> bool {
        self.get(kind).is_some()
    }

    fn slot(&mut self, kind: SpriteKind) -> &mut Option<Sprite> {
        match kind {
            SpriteKind::Player => &mut self.player,
            SpriteKind::EnemyPlane => &mut self.enemy_plane,
            SpriteKind::FuelTank => &mut self.fuel_tank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pads_ragged_lines() {
        let sprite = Sprite::parse(" /\\\n/__\\").unwrap();
        assert_eq!(sprite.width, 4);
        assert_eq!(sprite.sample(0, 3, 2, 4), ' ');
        assert_eq!(sprite.sample(1, 3, 2, 4), '\\');
    }

    #[test]
    fn parse_rejects_blank_text() {
        assert!(Sprite::parse("").is_none());
        assert!(Sprite::parse("   \n  ").is_none());
    }

    #[test]
    fn sample_stretches_over_larger_box() {
        let sprite = Sprite::parse("ab").unwrap();
        let row: String = (0..4).map(|c| sprite.sample(0, c, 1, 4)).collect();
        assert_eq!(row, "aabb");
    }

    #[test]
    fn missing_directory_falls_back_to_placeholders() {
        let set = SpriteSet::load(Path::new("/definitely/not/here"));
        for kind in SpriteKind::ALL {
            assert!(!set.is_ready(kind));
        }
    }

    #[test]
    fn shipped_sprites_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/sprites");
        let set = SpriteSet::load(&dir);
        for kind in SpriteKind::ALL {
            assert!(set.is_ready(kind), "{:?} should load", kind);
        }
    }
}

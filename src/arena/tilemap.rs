//! Arena domain: the obstacle mask queried by AI spatial casts.

use bevy::prelude::*;

/// What occupies one tile of the arena grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Floor,
    Wall,
}

/// Grid of tiles in world space. One tile is one world unit; tile `(0, 0)`
/// spans `[0, 1) x [0, 1)` and its center sits at `(0.5, 0.5)`.
#[derive(Resource, Debug, Clone)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl TileMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Floor; (width * height) as usize],
        }
    }

    /// Build a map from string art: `#` is a wall, anything else is floor.
    /// Rows are listed top to bottom, so the first row becomes the highest y.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |row| row.len()) as i32;
        let mut map = Self::new(width, height);
        for (row_index, row) in rows.iter().enumerate() {
            let ty = height - 1 - row_index as i32;
            for (tx, ch) in row.chars().enumerate() {
                if ch == '#' {
                    map.set(tx as i32, ty, TileKind::Wall);
                }
            }
        }
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set(&mut self, tx: i32, ty: i32, kind: TileKind) {
        if tx >= 0 && tx < self.width && ty >= 0 && ty < self.height {
            self.tiles[(ty * self.width + tx) as usize] = kind;
        }
    }

    /// Out-of-bounds coordinates read as walls so casts terminate at the
    /// arena edge instead of escaping it.
    pub fn kind_at(&self, tx: i32, ty: i32) -> TileKind {
        if tx < 0 || tx >= self.width || ty < 0 || ty >= self.height {
            return TileKind::Wall;
        }
        self.tiles[(ty * self.width + tx) as usize]
    }

    pub fn is_wall(&self, tx: i32, ty: i32) -> bool {
        self.kind_at(tx, ty) == TileKind::Wall
    }

    pub fn is_blocked(&self, point: Vec2) -> bool {
        let tile = Self::tile_of(point);
        self.is_wall(tile.x, tile.y)
    }

    pub fn tile_of(point: Vec2) -> IVec2 {
        IVec2::new(point.x.floor() as i32, point.y.floor() as i32)
    }

    pub fn tile_center(tile: IVec2) -> Vec2 {
        Vec2::new(tile.x as f32 + 0.5, tile.y as f32 + 0.5)
    }
}

use screeps::{RoomXY, Terrain};

pub mod packed_terrain;

/// Source of terrain information about a single room.
pub trait TerrainQuery {
    fn terrain(&self, xy: RoomXY) -> Terrain;

    #[inline]
    fn is_wall(&self, xy: RoomXY) -> bool {
        self.terrain(xy) == Terrain::Wall
    }
}

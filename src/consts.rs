use screeps::ROOM_SIZE;

pub const ROOM_AREA: usize = (ROOM_SIZE as usize) * (ROOM_SIZE as usize);

/// Cost marking a tile as blocked. Never used as a legitimate cut cost.
pub const OBSTACLE_COST: u8 = 255;
/// Cost of cutting through a plain tile when no cost matrix is given.
pub const DEFAULT_TILE_COST: u8 = 1;

/// Initial distance of tiles that are not seeds of the distance transform.
pub const UNSEEDED_DISTANCE: u16 = 1 << 8;
/// Contribution of a neighbour outside of the room in the distance transform.
pub const OUT_OF_ROOM_DISTANCE: u16 = 100;

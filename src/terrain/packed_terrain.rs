use crate::consts::ROOM_AREA;
use crate::errors::PlanningError;
use crate::geometry::rect::room_rect;
use crate::geometry::room_xy::RoomXYUtils;
use crate::terrain::TerrainQuery;
use screeps::Terrain::{Plain, Swamp, Wall};
use screeps::{RoomXY, Terrain, ROOM_SIZE};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const PACKED_TERRAIN_DATA_SIZE: usize = ROOM_AREA / 4;

const TERRAIN_MASK_WALL: u8 = 1;
const TERRAIN_MASK_SWAMP: u8 = 2;

#[derive(Clone, PartialEq, Eq)]
pub struct PackedTerrain {
    // Two bits required to store Terrain::Plain (0), Terrain::Wall (1) or Terrain::Swamp (2).
    data: [u8; PACKED_TERRAIN_DATA_SIZE],
}

impl PackedTerrain {
    /// A room without any walls.
    pub fn new() -> Self {
        PackedTerrain {
            data: [0; PACKED_TERRAIN_DATA_SIZE],
        }
    }

    /// Reads the raw terrain buffer of a room, one byte per tile in row-major order, with bit 0
    /// marking walls and bit 1 marking swamps.
    pub fn from_bits(bits: &[u8]) -> Result<Self, PlanningError> {
        if bits.len() != ROOM_AREA {
            return Err(PlanningError::InvalidInput(format!(
                "terrain buffer has {} tiles instead of {}",
                bits.len(),
                ROOM_AREA
            )));
        }
        let mut packed_terrain = PackedTerrain::new();
        for xy in room_rect().iter() {
            let bits = bits[xy.to_index()];
            let terrain = if bits & TERRAIN_MASK_WALL != 0 {
                Wall
            } else if bits & TERRAIN_MASK_SWAMP != 0 {
                Swamp
            } else {
                Plain
            };
            packed_terrain.set(xy, terrain);
        }
        Ok(packed_terrain)
    }

    pub fn get(&self, xy: RoomXY) -> Terrain {
        let index = xy.to_index();
        let offset = 2 * (index % 4);
        match (self.data[index / 4] >> offset) & 0x3 {
            1 => Wall,
            2 => Swamp,
            _ => Plain,
        }
    }

    pub fn set(&mut self, xy: RoomXY, terrain: Terrain) {
        let index = xy.to_index();
        let offset = 2 * (index % 4);
        let bits = match terrain {
            Plain => 0,
            Wall => 1,
            Swamp => 2,
        };
        // Zero the data in that tile.
        self.data[index / 4] &= !(0x3 << offset);
        // Set the data in that tile.
        self.data[index / 4] |= bits << offset;
    }

    pub fn walls(&self) -> impl Iterator<Item = RoomXY> + '_ {
        self.iter().filter_map(|(xy, t)| (t == Wall).then_some(xy))
    }

    /// Boundary tiles that are not walls, i.e., tiles from which creeps may leave the room.
    pub fn exits(&self) -> impl Iterator<Item = RoomXY> + '_ {
        room_rect().boundary().filter(|&xy| self.get(xy) != Wall)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomXY, Terrain)> + '_ {
        room_rect().iter().map(|xy| (xy, self.get(xy)))
    }
}

impl Default for PackedTerrain {
    fn default() -> Self {
        PackedTerrain::new()
    }
}

impl TerrainQuery for PackedTerrain {
    #[inline]
    fn terrain(&self, xy: RoomXY) -> Terrain {
        self.get(xy)
    }
}

/// Parses `ROOM_SIZE` lines of `ROOM_SIZE` characters: `#` for walls, `~` for swamps and `.` for
/// plains. Surrounding whitespace of each line is ignored.
impl FromStr for PackedTerrain {
    type Err = PlanningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s.lines().map(str::trim).filter(|line| !line.is_empty()).collect::<Vec<_>>();
        if lines.len() != ROOM_SIZE as usize {
            return Err(PlanningError::InvalidInput(format!(
                "terrain has {} rows instead of {}",
                lines.len(),
                ROOM_SIZE
            )));
        }
        let mut packed_terrain = PackedTerrain::new();
        for (y, line) in lines.into_iter().enumerate() {
            let row = line.chars().collect::<Vec<_>>();
            if row.len() != ROOM_SIZE as usize {
                return Err(PlanningError::InvalidInput(format!(
                    "terrain row {} has {} tiles instead of {}",
                    y,
                    row.len(),
                    ROOM_SIZE
                )));
            }
            for (x, c) in row.into_iter().enumerate() {
                let terrain = match c {
                    '#' => Wall,
                    '~' => Swamp,
                    '.' => Plain,
                    _ => {
                        return Err(PlanningError::InvalidInput(format!(
                            "unknown terrain character {:?} at ({}, {})",
                            c, x, y
                        )))
                    }
                };
                packed_terrain.set(RoomXY::try_from((x as u8, y as u8))?, terrain);
            }
        }
        Ok(packed_terrain)
    }
}

impl Display for PackedTerrain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for y in 0..ROOM_SIZE {
            for x in 0..ROOM_SIZE {
                let c = match self.get(unsafe { RoomXY::unchecked_new(x, y) }) {
                    Plain => '.',
                    Wall => '#',
                    Swamp => '~',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

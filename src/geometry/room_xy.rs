use crate::consts::ROOM_AREA;
use crate::geometry::grid_direction::{direction_to_offset, GridDirection};
use screeps::{RoomXY, ROOM_SIZE};
use std::cmp::{max, min};

pub trait RoomXYUtils: Sized {
    fn to_index(&self) -> usize;
    fn around(self) -> impl Iterator<Item = Self>;
    fn offset(self, diff: (i8, i8)) -> Option<Self>;
    fn in_direction(self, direction: GridDirection) -> Option<Self>;
    /// Chebyshev distance.
    fn dist(self, other: Self) -> u8;
    /// Number of steps to the nearest tile on the room boundary.
    fn exit_distance(self) -> u8;
    fn is_on_boundary(self) -> bool;
}

impl RoomXYUtils for RoomXY {
    #[inline]
    fn to_index(&self) -> usize {
        (self.x.u8() as usize) + (ROOM_SIZE as usize) * (self.y.u8() as usize)
    }

    /// Neighbouring tiles within the room, clockwise starting from the top one.
    #[inline]
    fn around(self) -> impl Iterator<Item = Self> {
        GridDirection::around().filter_map(move |direction| self.in_direction(direction))
    }

    #[inline]
    fn offset(self, diff: (i8, i8)) -> Option<Self> {
        let x = (self.x.u8() as i16) + (diff.0 as i16);
        let y = (self.y.u8() as i16) + (diff.1 as i16);
        if 0 <= x && x < ROOM_SIZE as i16 && 0 <= y && y < ROOM_SIZE as i16 {
            // (x, y) was already checked to be within bounds, so it is safe.
            Some(unsafe { RoomXY::unchecked_new(x as u8, y as u8) })
        } else {
            None
        }
    }

    #[inline]
    fn in_direction(self, direction: GridDirection) -> Option<Self> {
        self.offset(direction_to_offset(direction))
    }

    fn dist(self, other: Self) -> u8 {
        max(self.x.u8().abs_diff(other.x.u8()), self.y.u8().abs_diff(other.y.u8()))
    }

    fn exit_distance(self) -> u8 {
        let (x, y) = (self.x.u8(), self.y.u8());
        min(min(x, y), min(ROOM_SIZE - 1 - x, ROOM_SIZE - 1 - y))
    }

    fn is_on_boundary(self) -> bool {
        self.exit_distance() == 0
    }
}

/// Inverse of `RoomXYUtils::to_index`.
#[inline]
pub fn xy_from_index(index: usize) -> Option<RoomXY> {
    if index < ROOM_AREA {
        // The index is within the room area, so both coordinates are below ROOM_SIZE.
        Some(unsafe {
            RoomXY::unchecked_new((index % (ROOM_SIZE as usize)) as u8, (index / (ROOM_SIZE as usize)) as u8)
        })
    } else {
        None
    }
}

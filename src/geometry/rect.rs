use screeps::{RoomXY, ROOM_SIZE};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Rect {
    pub top_left: RoomXY,
    pub bottom_right: RoomXY,
}

#[derive(Error, Debug, Clone)]
#[error("rect does not have a positive area")]
pub struct InvalidRectError;

impl Rect {
    pub fn new(top_left: RoomXY, bottom_right: RoomXY) -> Result<Self, InvalidRectError> {
        let result = Rect {
            top_left,
            bottom_right,
        };
        if result.is_valid() {
            Ok(result)
        } else {
            Err(InvalidRectError)
        }
    }

    pub fn is_valid(self) -> bool {
        self.top_left.x <= self.bottom_right.x && self.top_left.y <= self.bottom_right.y
    }

    pub fn width(self) -> u8 {
        self.bottom_right.x.u8() - self.top_left.x.u8() + 1
    }

    pub fn height(self) -> u8 {
        self.bottom_right.y.u8() - self.top_left.y.u8() + 1
    }

    pub fn area(self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    pub fn contains(self, xy: RoomXY) -> bool {
        self.top_left.x <= xy.x
            && xy.x <= self.bottom_right.x
            && self.top_left.y <= xy.y
            && xy.y <= self.bottom_right.y
    }

    /// All tiles of the rect, row by row.
    pub fn iter(self) -> impl Iterator<Item = RoomXY> {
        let (min_x, max_x) = (self.top_left.x.u8(), self.bottom_right.x.u8());
        (self.top_left.y.u8()..=self.bottom_right.y.u8()).flat_map(move |y| {
            // The rect is valid, so all coordinates between its corners are within the room.
            (min_x..=max_x).map(move |x| unsafe { RoomXY::unchecked_new(x, y) })
        })
    }

    /// Tiles on the rect's border, each exactly once.
    pub fn boundary(self) -> impl Iterator<Item = RoomXY> {
        let (min_x, max_x) = (self.top_left.x.u8(), self.bottom_right.x.u8());
        let (min_y, max_y) = (self.top_left.y.u8(), self.bottom_right.y.u8());
        self.iter().filter(move |xy| {
            let (x, y) = (xy.x.u8(), xy.y.u8());
            x == min_x || x == max_x || y == min_y || y == max_y
        })
    }
}

impl TryFrom<(RoomXY, RoomXY)> for Rect {
    type Error = InvalidRectError;

    fn try_from(xy_pair: (RoomXY, RoomXY)) -> Result<Self, Self::Error> {
        Rect::new(xy_pair.0, xy_pair.1)
    }
}

/// The whole room.
pub fn room_rect() -> Rect {
    // Both corners are within the room and ordered.
    unsafe {
        Rect {
            top_left: RoomXY::unchecked_new(0, 0),
            bottom_right: RoomXY::unchecked_new(ROOM_SIZE - 1, ROOM_SIZE - 1),
        }
    }
}

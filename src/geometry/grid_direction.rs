use crate::geometry::grid_direction::GridDirection::*;
use enum_iterator::{all, Sequence};

/// Directions on the grid with an additional `Center` standing for the tile itself.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Sequence)]
#[repr(u8)]
pub enum GridDirection {
    Center = 0,
    Top = 1,
    TopRight = 2,
    Right = 3,
    BottomRight = 4,
    Bottom = 5,
    BottomLeft = 6,
    Left = 7,
    TopLeft = 8,
}

impl GridDirection {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Center),
            1 => Some(Top),
            2 => Some(TopRight),
            3 => Some(Right),
            4 => Some(BottomRight),
            5 => Some(Bottom),
            6 => Some(BottomLeft),
            7 => Some(Left),
            8 => Some(TopLeft),
            _ => None,
        }
    }

    /// The eight directions to neighbouring tiles, clockwise starting from `Top`.
    pub fn around() -> impl Iterator<Item = GridDirection> {
        all::<GridDirection>().filter(|&direction| direction != Center)
    }
}

#[inline]
pub fn reverse_direction(direction: GridDirection) -> GridDirection {
    match direction {
        Center => Center,
        Top => Bottom,
        TopRight => BottomLeft,
        Right => Left,
        BottomRight => TopLeft,
        Bottom => Top,
        BottomLeft => TopRight,
        Left => Right,
        TopLeft => BottomRight,
    }
}

#[inline]
pub fn direction_to_offset(direction: GridDirection) -> (i8, i8) {
    match direction {
        Center => (0, 0),
        Top => (0, -1),
        TopRight => (1, -1),
        Right => (1, 0),
        BottomRight => (1, 1),
        Bottom => (0, 1),
        BottomLeft => (-1, 1),
        Left => (-1, 0),
        TopLeft => (-1, -1),
    }
}

use crate::algorithms::matrix_common::MatrixCommon;
use crate::consts::ROOM_AREA;
use crate::errors::PlanningError;
use crate::geometry::rect::room_rect;
use crate::geometry::room_xy::RoomXYUtils;
use screeps::{RoomXY, ROOM_SIZE};
use std::fmt::{Display, Formatter, LowerHex};
use std::mem::size_of;

/// A `ROOM_SIZE` x `ROOM_SIZE` matrix backed by an array with size known at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMatrix<T> {
    pub data: [T; ROOM_AREA],
}

/// Per-tile costs. `OBSTACLE_COST` marks blocked tiles.
pub type CostMatrix = RoomMatrix<u8>;

impl<T> RoomMatrix<T>
where
    T: Clone + Copy + PartialEq,
{
    pub fn new(fill: T) -> Self {
        RoomMatrix {
            data: [fill; ROOM_AREA],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomXY, T)> + '_ {
        room_rect().iter().map(|xy| (xy, self.get(xy)))
    }

    pub fn boundary(&self) -> impl Iterator<Item = (RoomXY, T)> + '_ {
        room_rect().boundary().map(|xy| (xy, self.get(xy)))
    }

    pub fn map<F, S>(&self, mut f: F) -> RoomMatrix<S>
    where
        F: FnMut(RoomXY, T) -> S,
        S: Clone + Copy + PartialEq + Default,
    {
        let mut data = [S::default(); ROOM_AREA];
        for (xy, value) in self.iter() {
            data[xy.to_index()] = f(xy, value);
        }
        RoomMatrix { data }
    }

    /// Tiles with the given value, in row-major order.
    pub fn find_xy(&self, value: T) -> impl Iterator<Item = RoomXY> + '_ {
        self.iter().filter_map(move |(xy, v)| (v == value).then_some(xy))
    }
}

impl<T> RoomMatrix<T>
where
    T: Clone + Copy + PartialEq + Ord + Default,
{
    pub fn max_value(&self) -> T {
        self.data.iter().copied().max().unwrap_or_default()
    }
}

impl RoomMatrix<u8> {
    /// Reads a row-major buffer with one byte per tile.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PlanningError> {
        let data: [u8; ROOM_AREA] = bytes.try_into().map_err(|_| {
            PlanningError::InvalidInput(format!("matrix has {} tiles instead of {}", bytes.len(), ROOM_AREA))
        })?;
        Ok(RoomMatrix { data })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.to_vec()
    }
}

impl<T> MatrixCommon<T> for RoomMatrix<T>
where
    T: Clone + Copy + PartialEq,
{
    #[inline]
    fn get(&self, xy: RoomXY) -> T {
        self.data[xy.to_index()]
    }

    #[inline]
    fn set(&mut self, xy: RoomXY, value: T) {
        self.data[xy.to_index()] = value;
    }
}

impl<T> Default for RoomMatrix<T>
where
    T: Clone + Copy + PartialEq + Default,
{
    fn default() -> Self {
        RoomMatrix::new(T::default())
    }
}

impl<T> Display for RoomMatrix<T>
where
    T: Clone + Copy + PartialEq + LowerHex + Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for y in 0..ROOM_SIZE {
            for x in 0..ROOM_SIZE {
                write!(
                    f,
                    "{:0>size$x}",
                    self.data[(x as usize) + (ROOM_SIZE as usize) * (y as usize)],
                    size = 2 * size_of::<T>()
                )?;
                if x != ROOM_SIZE - 1 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

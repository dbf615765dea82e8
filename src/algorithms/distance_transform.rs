use crate::algorithms::matrix_common::MatrixCommon;
use crate::algorithms::room_matrix::{CostMatrix, RoomMatrix};
use crate::consts::{OBSTACLE_COST, OUT_OF_ROOM_DISTANCE, UNSEEDED_DISTANCE};
use crate::geometry::rect::room_rect;
use crate::geometry::room_xy::RoomXYUtils;
use crate::terrain::TerrainQuery;
use log::trace;
use screeps::{RoomXY, ROOM_SIZE};
use std::cmp::min;

/// Neighbours already visited when scanning by increasing x, then by increasing y.
const FORWARD_OFFSETS: [(i8, i8); 4] = [(-1, 0), (0, -1), (-1, -1), (-1, 1)];
/// Neighbours already visited when scanning by decreasing x, then by decreasing y.
const BACKWARD_OFFSETS: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Computes the distance of each tile to the nearest wall or room boundary tile, i.e., how much
/// open space there is around it.
///
/// If `interior` is given, only distances within these tiles are computed and all other tiles
/// are treated as walls. Walls and tiles on the room boundary always have distance 0.
pub fn distance_transform<T>(terrain: &T, interior: Option<&[RoomXY]>) -> CostMatrix
where
    T: TerrainQuery,
{
    let mut distances = RoomMatrix::new(0u16);
    let seeded = |xy: RoomXY| !terrain.is_wall(xy) && !xy.is_on_boundary();
    match interior {
        None => {
            for xy in room_rect().iter().filter(|&xy| seeded(xy)) {
                distances.set(xy, UNSEEDED_DISTANCE);
            }
        }
        Some(tiles) => {
            for &xy in tiles.iter().filter(|&&xy| seeded(xy)) {
                distances.set(xy, UNSEEDED_DISTANCE);
            }
        }
    }

    chamfer_distance_transform(&mut distances);

    let result = distances.map(|_, dist| min(dist, OBSTACLE_COST as u16) as u8);
    trace!("Distance transform with maximum distance {}:\n{}", result.max_value(), result);
    result
}

pub fn distance_transform_from_walls<T>(terrain: &T) -> CostMatrix
where
    T: TerrainQuery,
{
    distance_transform(terrain, None)
}

/// Two-pass chamfer distance transform on the 8-connected grid. The matrix should have 0 on
/// seeds and `UNSEEDED_DISTANCE` on other tiles.
pub fn chamfer_distance_transform<M>(matrix: &mut M)
where
    M: MatrixCommon<u16>,
{
    for x in 0..ROOM_SIZE {
        for y in 0..ROOM_SIZE {
            // Both coordinates are below ROOM_SIZE.
            relax(matrix, unsafe { RoomXY::unchecked_new(x, y) }, &FORWARD_OFFSETS);
        }
    }
    for x in (0..ROOM_SIZE).rev() {
        for y in (0..ROOM_SIZE).rev() {
            relax(matrix, unsafe { RoomXY::unchecked_new(x, y) }, &BACKWARD_OFFSETS);
        }
    }
}

#[inline]
fn relax<M>(matrix: &mut M, xy: RoomXY, offsets: &[(i8, i8)])
where
    M: MatrixCommon<u16>,
{
    let mut dist = matrix.get(xy);
    for &offset in offsets {
        let near_dist = xy.offset(offset).map_or(OUT_OF_ROOM_DISTANCE, |near| matrix.get(near) + 1);
        dist = min(dist, near_dist);
    }
    matrix.set(xy, dist);
}

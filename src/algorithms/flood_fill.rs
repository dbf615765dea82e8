use crate::algorithms::matrix_common::MatrixCommon;
use crate::algorithms::room_matrix::{CostMatrix, RoomMatrix};
use crate::consts::OBSTACLE_COST;
use crate::geometry::room_xy::RoomXYUtils;
use crate::terrain::TerrainQuery;
use derive_more::Constructor;
use log::trace;
use screeps::RoomXY;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Constructor)]
pub struct FloodFillOptions<'a> {
    /// Costs to start from. Tiles not reached by the fill keep their value from here.
    pub initial_costs: Option<&'a CostMatrix>,
    /// Tiles with cost at least this high are not entered and no tile gets a higher cost.
    pub cost_threshold: u8,
}

impl Default for FloodFillOptions<'_> {
    fn default() -> Self {
        FloodFillOptions {
            initial_costs: None,
            cost_threshold: OBSTACLE_COST,
        }
    }
}

/// Computes the number of steps from the nearest start tile to each tile reachable from them
/// without crossing walls.
pub fn flood_fill<T>(terrain: &T, start: &[RoomXY], options: FloodFillOptions) -> CostMatrix
where
    T: TerrainQuery,
{
    flood_fill_reached(terrain, start, options).0
}

/// Like `flood_fill`, but also returns the tiles assigned a cost, other than the start tiles, in
/// the order of discovery.
pub fn flood_fill_reached<T>(terrain: &T, start: &[RoomXY], options: FloodFillOptions) -> (CostMatrix, Vec<RoomXY>)
where
    T: TerrainQuery,
{
    let mut costs = options.initial_costs.cloned().unwrap_or_default();
    let mut visited = RoomMatrix::new(false);
    let mut queue = VecDeque::with_capacity(start.len());
    let mut reached = Vec::new();

    for &xy in start {
        costs.set(xy, 0);
        visited.set(xy, true);
        queue.push_back(xy);
    }

    while let Some(xy) = queue.pop_front() {
        let near_cost = costs.get(xy) as u16 + 1;
        if near_cost > options.cost_threshold as u16 {
            continue;
        }

        for near in xy.around() {
            if terrain.is_wall(near) || costs.get(near) >= options.cost_threshold || visited.get(near) {
                continue;
            }

            costs.set(near, near_cost as u8);
            visited.set(near, true);
            queue.push_back(near);
            reached.push(near);
        }
    }

    trace!("Flood fill from {} tiles reached {} tiles.", start.len(), reached.len());

    (costs, reached)
}

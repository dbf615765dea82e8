use crate::algorithms::matrix_common::MatrixCommon;
use crate::algorithms::room_matrix::{CostMatrix, RoomMatrix};
use crate::config::MinCutConfig;
use crate::consts::{DEFAULT_TILE_COST, OBSTACLE_COST, ROOM_AREA};
use crate::errors::PlanningError;
use crate::geometry::grid_direction::{reverse_direction, GridDirection};
use crate::geometry::rect::room_rect;
use crate::geometry::room_xy::RoomXYUtils;
use crate::terrain::TerrainQuery;
use enum_iterator::{all, Sequence};
use log::{debug, trace};
use more_asserts::debug_assert_gt;
use rustc_hash::FxHashSet;
use screeps::{RoomXY, ROOM_SIZE};
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use GridDirection::Center;
use TileVertexKind::*;

/// Classification of tiles after separating the sources from the exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut {
    /// Tiles that need to be blocked to separate the sources from the exits.
    pub cut: Vec<RoomXY>,
    /// Tiles on the sources' side of the cut.
    pub inside: Vec<RoomXY>,
    /// Tiles on the exits' side of the cut.
    pub outside: Vec<RoomXY>,
    /// Total flow routed from the sources to the exits, equal to the total cost of the cut.
    pub flow: u32,
    /// Number of blocking flow phases that were run.
    pub phases: u16,
}

/// Computes a minimum vertex separator (i.e., min-cut, but for vertices) of the movement graph in
/// a room between the `sources` and the tiles near the room exits, using the default
/// configuration. Tiles are listed row by row.
///
/// Without `costs`, each passable tile costs `DEFAULT_TILE_COST`.
pub fn grid_min_cut<T>(terrain: &T, sources: &[RoomXY], costs: Option<&CostMatrix>) -> Result<Vec<RoomXY>, PlanningError>
where
    T: TerrainQuery,
{
    grid_min_cut_with_config(terrain, sources, costs, &MinCutConfig::default()).map(|min_cut| min_cut.cut)
}

/// Computes a minimum vertex separator between the `sources` and the room exits.
///
/// Based on Dinitz's algorithm, customized to work on vertices of a grid instead of edges of any
/// graph. Each tile is two nodes, an input and an output, connected by an edge from the input to
/// the output with capacity equal to the tile's cost. Outputs of tiles are connected to the inputs
/// of all surrounding tiles with edges of capacity higher than any tile cost. Walls and tiles
/// with `OBSTACLE_COST` are not part of the graph. Outputs of tiles near exits form the sink.
pub fn grid_min_cut_with_config<T>(
    terrain: &T,
    sources: &[RoomXY],
    costs: Option<&CostMatrix>,
    config: &MinCutConfig,
) -> Result<MinCut, PlanningError>
where
    T: TerrainQuery,
{
    if config.inter_tile_capacity < OBSTACLE_COST as u32 {
        return Err(PlanningError::InvalidInput(format!(
            "inter-tile capacity {} does not exceed the maximum tile cost {}",
            config.inter_tile_capacity,
            OBSTACLE_COST - 1
        )));
    }

    let default_costs;
    let costs = match costs {
        Some(costs) => costs,
        None => {
            default_costs = default_cut_costs(terrain);
            &default_costs
        }
    };

    let exits = exit_region(terrain, costs, config.exit_range);

    let mut source_nodes = Vec::new();
    let mut added_tiles = FxHashSet::default();
    for &xy in sources {
        if exits.get(xy) {
            let error = PlanningError::InvalidSource { xy };
            error.warn("Failed to compute the min-cut");
            return Err(error);
        }
        if is_network_tile(terrain, costs, xy) && added_tiles.insert(xy.to_index()) {
            source_nodes.push(GridGraphNode::new(xy, Input));
        }
    }

    let mut network = GridFlowNetwork::new(terrain, costs, &exits, source_nodes, config.inter_tile_capacity);

    let mut flow = 0;
    let mut phases = 0;
    loop {
        let (levels, exit_reached) = network.levels();

        if !exit_reached {
            let min_cut = network.min_cut(&levels, terrain, costs, flow, phases);
            debug!(
                "Min-cut of {} sources has {} tiles with total cost {} after {} phases.",
                network.sources.len(),
                min_cut.cut.len(),
                min_cut.flow,
                min_cut.phases
            );
            return Ok(min_cut);
        }

        if phases >= config.max_phases {
            let error = PlanningError::IterationLimitExceeded { phases };
            error.warn("Failed to compute the min-cut");
            return Err(error);
        }

        let phase_flow = network.blocking_flow(&levels);
        trace!("Min-cut phase {} routed flow {}.", phases, phase_flow);
        flow += phase_flow;
        phases += 1;
    }
}

/// Cost matrix with `OBSTACLE_COST` on walls and `DEFAULT_TILE_COST` elsewhere.
pub fn default_cut_costs<T>(terrain: &T) -> CostMatrix
where
    T: TerrainQuery,
{
    let mut costs = CostMatrix::new(DEFAULT_TILE_COST);
    for xy in room_rect().iter().filter(|&xy| terrain.is_wall(xy)) {
        costs.set(xy, OBSTACLE_COST);
    }
    costs
}

/// Tiles in the graph within `exit_range` of a passable exit tile. Corners are never exits.
pub fn exit_region<T>(terrain: &T, costs: &CostMatrix, exit_range: u8) -> RoomMatrix<bool>
where
    T: TerrainQuery,
{
    let mut result = RoomMatrix::new(false);
    let range = exit_range.min(ROOM_SIZE) as i8;
    let exits = room_rect()
        .boundary()
        .filter(|&xy| !is_corner(xy) && !terrain.is_wall(xy));
    for exit in exits {
        for dy in -range..=range {
            for dx in -range..=range {
                if let Some(near) = exit.offset((dx, dy)) {
                    if is_network_tile(terrain, costs, near) {
                        result.set(near, true);
                    }
                }
            }
        }
    }
    result
}

#[inline]
fn is_network_tile<T>(terrain: &T, costs: &CostMatrix, xy: RoomXY) -> bool
where
    T: TerrainQuery,
{
    !terrain.is_wall(xy) && costs.get(xy) != OBSTACLE_COST
}

#[inline]
fn is_corner(xy: RoomXY) -> bool {
    let (x, y) = (xy.x.u8(), xy.y.u8());
    (x == 0 || x == ROOM_SIZE - 1) && (y == 0 || y == ROOM_SIZE - 1)
}

const UNREACHED: i16 = -1;
const GRID_NODE_COUNT: usize = 2 * ROOM_AREA;
const EDGES_PER_NODE: usize = <GridDirection as Sequence>::CARDINALITY;
const GRID_EDGE_COUNT: usize = GRID_NODE_COUNT * EDGES_PER_NODE;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
enum TileVertexKind {
    Input = 0,
    Output = 1,
}

impl TileVertexKind {
    #[inline]
    fn other(self) -> Self {
        match self {
            Input => Output,
            Output => Input,
        }
    }
}

/// One of the two vertices of a tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct GridGraphNode {
    xy: RoomXY,
    kind: TileVertexKind,
}

impl GridGraphNode {
    #[inline]
    fn new(xy: RoomXY, kind: TileVertexKind) -> Self {
        GridGraphNode { xy, kind }
    }

    #[inline]
    fn index(self) -> usize {
        2 * self.xy.to_index() + (self.kind as usize)
    }

    #[cfg(test)]
    fn from_index(index: usize) -> Option<Self> {
        let kind = if index % 2 == 0 { Input } else { Output };
        crate::geometry::room_xy::xy_from_index(index / 2).map(|xy| GridGraphNode::new(xy, kind))
    }
}

impl Display for GridGraphNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind_str = ["I", "O"][self.kind as usize];
        write!(f, "{}{}", self.xy, kind_str)
    }
}

/// An edge going out of a node. `Center` is the edge between the input and the output of the same
/// tile. Other directions go from an output to the neighbour's input or, for inputs, are
/// the reverse edges of these.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct GridGraphEdge {
    node: GridGraphNode,
    direction: GridDirection,
}

impl GridGraphEdge {
    #[inline]
    fn new(node: GridGraphNode, direction: GridDirection) -> Self {
        GridGraphEdge { node, direction }
    }

    #[inline]
    fn index(self) -> usize {
        self.node.index() * EDGES_PER_NODE + self.direction.index()
    }

    #[cfg(test)]
    fn from_index(index: usize) -> Option<Self> {
        let node = GridGraphNode::from_index(index / EDGES_PER_NODE)?;
        let direction = GridDirection::from_index(index % EDGES_PER_NODE)?;
        Some(GridGraphEdge::new(node, direction))
    }

    /// The node the edge leads to or `None` if it would lead outside of the room.
    #[inline]
    fn target(self) -> Option<GridGraphNode> {
        let kind = self.node.kind.other();
        if self.direction == Center {
            Some(GridGraphNode::new(self.node.xy, kind))
        } else {
            self.node
                .xy
                .in_direction(self.direction)
                .map(|near| GridGraphNode::new(near, kind))
        }
    }

    #[inline]
    fn reverse(self) -> Option<Self> {
        self.target()
            .map(|target| GridGraphEdge::new(target, reverse_direction(self.direction)))
    }
}

/// All edges going out of the node together with their targets.
#[inline]
fn edges_from(node: GridGraphNode) -> impl Iterator<Item = (GridGraphEdge, GridGraphNode)> {
    all::<GridDirection>().filter_map(move |direction| {
        let edge = GridGraphEdge::new(node, direction);
        edge.target().map(|target| (edge, target))
    })
}

/// Residual network of a single min-cut computation.
struct GridFlowNetwork {
    /// Residual capacity of each edge.
    capacity: Vec<u32>,
    /// Whether the node is a part of the sink.
    exit: Vec<bool>,
    sources: Vec<GridGraphNode>,
}

impl GridFlowNetwork {
    fn new<T>(
        terrain: &T,
        costs: &CostMatrix,
        exits: &RoomMatrix<bool>,
        sources: Vec<GridGraphNode>,
        inter_tile_capacity: u32,
    ) -> Self
    where
        T: TerrainQuery,
    {
        // Reverse edges start with no capacity.
        let mut capacity = vec![0; GRID_EDGE_COUNT];
        let mut exit = vec![false; GRID_NODE_COUNT];

        for xy in room_rect().iter().filter(|&xy| is_network_tile(terrain, costs, xy)) {
            let input = GridGraphNode::new(xy, Input);
            capacity[GridGraphEdge::new(input, Center).index()] = costs.get(xy) as u32;

            let output = GridGraphNode::new(xy, Output);
            for direction in GridDirection::around() {
                if let Some(near) = xy.in_direction(direction) {
                    if is_network_tile(terrain, costs, near) {
                        capacity[GridGraphEdge::new(output, direction).index()] = inter_tile_capacity;
                    }
                }
            }

            if exits.get(xy) {
                exit[output.index()] = true;
            }
        }

        GridFlowNetwork {
            capacity,
            exit,
            sources,
        }
    }

    /// Computes BFS distances from the sources through edges with remaining capacity. Returns
    /// them along with information whether any exit node was reached.
    fn levels(&self) -> (Vec<i16>, bool) {
        let mut levels = vec![UNREACHED; GRID_NODE_COUNT];
        let mut queue = VecDeque::new();
        let mut exit_reached = false;

        for &source in self.sources.iter() {
            levels[source.index()] = 0;
            queue.push_back(source);
        }

        while let Some(node) = queue.pop_front() {
            let level = levels[node.index()];
            for (edge, target) in edges_from(node) {
                if self.capacity[edge.index()] > 0 && levels[target.index()] == UNREACHED {
                    levels[target.index()] = level + 1;
                    queue.push_back(target);
                    if self.exit[target.index()] {
                        exit_reached = true;
                    }
                }
            }
        }

        (levels, exit_reached)
    }

    /// Saturates all shortest paths from the sources to the exits in the level graph. Returns
    /// the routed flow.
    fn blocking_flow(&mut self, levels: &[i16]) -> u32 {
        // Index of the next direction to try for each node. Edges before it are saturated or
        // lead to dead ends within this phase.
        let mut cursors = vec![0u8; GRID_NODE_COUNT];
        let mut total_flow = 0;

        for i in 0..self.sources.len() {
            let source = self.sources[i];
            loop {
                let flow = self.augment(source, levels, &mut cursors);
                if flow == 0 {
                    break;
                }
                total_flow += flow;
            }
        }

        total_flow
    }

    /// Finds a single path from the source to an exit in the level graph using DFS with an
    /// explicit stack and routes as much flow through it as possible. Returns 0 if there is no
    /// such path.
    fn augment(&mut self, source: GridGraphNode, levels: &[i16], cursors: &mut [u8]) -> u32 {
        let mut path: Vec<GridGraphEdge> = Vec::new();
        let mut node = source;

        loop {
            if self.exit[node.index()] {
                let flow = path
                    .iter()
                    .map(|edge| self.capacity[edge.index()])
                    .min()
                    .unwrap_or(0);
                debug_assert_gt!(flow, 0);
                for edge in path {
                    self.route(edge, flow);
                }
                trace!("Routed flow {} from {} to {}.", flow, source, node);
                return flow;
            }

            match self.advance(node, levels, cursors) {
                Some((edge, target)) => {
                    path.push(edge);
                    node = target;
                }
                None => match path.pop() {
                    Some(edge) => {
                        // The node is a dead end, so the edge leading to it is skipped from now on.
                        node = edge.node;
                        cursors[node.index()] += 1;
                    }
                    None => return 0,
                },
            }
        }
    }

    /// Moves the node's cursor to the first edge leading one level further that still has
    /// capacity and returns it with its target.
    fn advance(
        &self,
        node: GridGraphNode,
        levels: &[i16],
        cursors: &mut [u8],
    ) -> Option<(GridGraphEdge, GridGraphNode)> {
        let next_level = levels[node.index()] + 1;
        while let Some(direction) = GridDirection::from_index(cursors[node.index()] as usize) {
            let edge = GridGraphEdge::new(node, direction);
            if self.capacity[edge.index()] > 0 {
                if let Some(target) = edge.target() {
                    if levels[target.index()] == next_level {
                        return Some((edge, target));
                    }
                }
            }
            cursors[node.index()] += 1;
        }
        None
    }

    #[inline]
    fn route(&mut self, edge: GridGraphEdge, flow: u32) {
        self.capacity[edge.index()] -= flow;
        if let Some(reverse_edge) = edge.reverse() {
            self.capacity[reverse_edge.index()] += flow;
        }
    }

    /// Classifies tiles by reachability of their nodes from the sources once no exit is reachable.
    /// Tiles with reachable input and unreachable output are the ones with a saturated internal
    /// edge on the sources' side, i.e., the min-cut.
    fn min_cut<T>(&self, levels: &[i16], terrain: &T, costs: &CostMatrix, flow: u32, phases: u16) -> MinCut
    where
        T: TerrainQuery,
    {
        let mut cut = Vec::new();
        let mut inside = Vec::new();
        let mut outside = Vec::new();

        for xy in room_rect().iter().filter(|&xy| is_network_tile(terrain, costs, xy)) {
            let input_level = levels[GridGraphNode::new(xy, Input).index()];
            let output_level = levels[GridGraphNode::new(xy, Output).index()];
            if input_level == UNREACHED {
                outside.push(xy);
            } else if output_level == UNREACHED {
                cut.push(xy);
            } else {
                inside.push(xy);
            }
        }

        MinCut {
            cut,
            inside,
            outside,
            flow,
            phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::grid_min_cut::TileVertexKind::{Input, Output};
    use crate::algorithms::grid_min_cut::{
        default_cut_costs, edges_from, exit_region, grid_min_cut, grid_min_cut_with_config, GridGraphEdge,
        GridGraphNode, MinCut, GRID_EDGE_COUNT, GRID_NODE_COUNT,
    };
    use crate::algorithms::matrix_common::MatrixCommon;
    use crate::algorithms::room_matrix::{CostMatrix, RoomMatrix};
    use crate::config::{MinCutConfig, LOG_LEVEL};
    use crate::consts::OBSTACLE_COST;
    use crate::errors::PlanningError;
    use crate::geometry::grid_direction::GridDirection;
    use crate::geometry::grid_direction::GridDirection::{BottomRight, Center};
    use crate::geometry::rect::{room_rect, Rect};
    use crate::geometry::room_xy::RoomXYUtils;
    use crate::logging::init_logging;
    use crate::terrain::packed_terrain::PackedTerrain;
    use crate::terrain::TerrainQuery;
    use enum_iterator::all;
    use more_asserts::assert_le;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use screeps::RoomXY;
    use screeps::Terrain::Wall;
    use std::collections::VecDeque;
    use std::error::Error;

    fn xy(x: u8, y: u8) -> RoomXY {
        RoomXY::try_from((x, y)).unwrap()
    }

    /// Whether any tile near the exits can be reached from the sources when moving only through
    /// non-blocked tiles that are not removed.
    fn reaches_exit(
        terrain: &PackedTerrain,
        costs: &CostMatrix,
        sources: &[RoomXY],
        removed: &RoomMatrix<bool>,
    ) -> bool {
        let exits = exit_region(terrain, costs, 2);
        let passable = |xy: RoomXY| !terrain.is_wall(xy) && costs.get(xy) != OBSTACLE_COST && !removed.get(xy);
        let mut visited = RoomMatrix::new(false);
        let mut queue = VecDeque::new();
        for &xy in sources.iter().filter(|&&xy| passable(xy)) {
            visited.set(xy, true);
            queue.push_back(xy);
        }
        while let Some(xy) = queue.pop_front() {
            if exits.get(xy) {
                return true;
            }
            for near in xy.around() {
                if passable(near) && !visited.get(near) {
                    visited.set(near, true);
                    queue.push_back(near);
                }
            }
        }
        false
    }

    fn tile_set(tiles: &[RoomXY]) -> RoomMatrix<bool> {
        let mut result = RoomMatrix::new(false);
        for &xy in tiles {
            result.set(xy, true);
        }
        result
    }

    fn assert_valid_min_cut(terrain: &PackedTerrain, costs: &CostMatrix, sources: &[RoomXY], min_cut: &MinCut) {
        let cut_cost = min_cut.cut.iter().map(|&xy| costs.get(xy) as u32).sum::<u32>();
        assert_eq!(cut_cost, min_cut.flow);

        let mut removed = tile_set(&min_cut.cut);
        assert!(!reaches_exit(terrain, costs, sources, &removed));

        for &xy in min_cut.cut.iter() {
            removed.set(xy, false);
            assert!(reaches_exit(terrain, costs, sources, &removed), "{} is not needed in the cut", xy);
            removed.set(xy, true);
        }
    }

    #[test]
    fn test_node_and_edge_ids() {
        let node_xy = xy(12, 12);
        let input_node = GridGraphNode::new(node_xy, Input);
        let output_node = GridGraphNode::new(node_xy, Output);

        let input_to_output_edge = GridGraphEdge::new(input_node, Center);
        assert_eq!(input_to_output_edge.target(), Some(output_node));
        assert_eq!(input_to_output_edge.reverse(), Some(GridGraphEdge::new(output_node, Center)));
        assert_eq!(
            input_to_output_edge.reverse().and_then(GridGraphEdge::reverse),
            Some(input_to_output_edge)
        );

        for direction in all::<GridDirection>() {
            let output_to_something_edge = GridGraphEdge::new(output_node, direction);
            assert_eq!(
                output_to_something_edge.reverse().and_then(GridGraphEdge::reverse),
                Some(output_to_something_edge)
            );
        }

        let target = GridGraphEdge::new(output_node, BottomRight).target().unwrap();
        assert_eq!(target, GridGraphNode::new(xy(13, 13), Input));

        for (edge, target) in edges_from(input_node) {
            assert_eq!(edge.node, input_node);
            if edge.direction == Center {
                assert_eq!(target, output_node);
            } else {
                assert_eq!(target.kind, Output);
                assert_eq!(target.xy.dist(node_xy), 1);
            }
        }

        assert_eq!(edges_from(GridGraphNode::new(xy(0, 0), Output)).count(), 4);
    }

    #[test]
    fn test_ids_are_invertible() {
        for index in 0..GRID_NODE_COUNT {
            assert_eq!(GridGraphNode::from_index(index).unwrap().index(), index);
        }
        for index in 0..GRID_EDGE_COUNT {
            assert_eq!(GridGraphEdge::from_index(index).unwrap().index(), index);
        }
        assert_eq!(GridGraphNode::from_index(GRID_NODE_COUNT), None);
    }

    #[test]
    fn test_default_costs_cut_the_source_itself() {
        let terrain = PackedTerrain::new();

        let min_cut = grid_min_cut_with_config(&terrain, &[xy(25, 25)], None, &MinCutConfig::default()).unwrap();

        assert_eq!(min_cut.cut, vec![xy(25, 25)]);
        assert_eq!(min_cut.flow, 1);
        assert!(min_cut.inside.is_empty());
        assert_eq!(min_cut.outside.len(), 2499);
    }

    #[test]
    fn test_grid_min_cut_on_empty_room() {
        init_logging(LOG_LEVEL).unwrap();
        let terrain = PackedTerrain::new();
        let mut costs = default_cut_costs(&terrain);
        costs.set(xy(25, 25), 254);

        let min_cut = grid_min_cut_with_config(&terrain, &[xy(25, 25)], Some(&costs), &MinCutConfig::default()).unwrap();

        let expected = Rect::new(xy(24, 24), xy(26, 26)).unwrap().boundary().collect::<Vec<_>>();
        assert_eq!(min_cut.cut, expected);
        assert_eq!(min_cut.inside, vec![xy(25, 25)]);
        assert_eq!(min_cut.flow, 8);
        assert_valid_min_cut(&terrain, &costs, &[xy(25, 25)], &min_cut);
    }

    #[test]
    fn test_grid_min_cut_on_empty_room_and_multiple_points() -> Result<(), Box<dyn Error>> {
        let terrain = PackedTerrain::new();
        let mut costs = default_cut_costs(&terrain);
        let sources = Rect::new(xy(24, 24), xy(26, 26))?.iter().collect::<Vec<_>>();
        for &xy in sources.iter() {
            costs.set(xy, 254);
        }

        let cut = grid_min_cut(&terrain, &sources, Some(&costs))?;

        assert_eq!(cut.len(), 16);
        assert_eq!(cut, Rect::new(xy(23, 23), xy(27, 27))?.boundary().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_grid_min_cut_through_door() -> Result<(), Box<dyn Error>> {
        // A walled square with a single door on the right.
        let mut terrain = PackedTerrain::new();
        for xy in Rect::new(xy(10, 10), xy(20, 20))?.boundary() {
            terrain.set(xy, Wall);
        }
        let door = xy(20, 15);
        terrain.set(door, screeps::Terrain::Plain);
        let mut costs = default_cut_costs(&terrain);
        costs.set(xy(15, 15), 254);

        let min_cut = grid_min_cut_with_config(&terrain, &[xy(15, 15)], Some(&costs), &MinCutConfig::default())?;

        assert_eq!(min_cut.cut, vec![door]);
        assert_eq!(min_cut.flow, 1);
        assert_eq!(min_cut.inside, Rect::new(xy(11, 11), xy(19, 19))?.iter().collect::<Vec<_>>());
        assert_valid_min_cut(&terrain, &costs, &[xy(15, 15)], &min_cut);
        Ok(())
    }

    #[test]
    fn test_grid_min_cut_prefers_cheaper_tiles() -> Result<(), Box<dyn Error>> {
        let terrain = PackedTerrain::new();
        let mut costs = CostMatrix::new(10);
        let source = xy(25, 25);
        costs.set(source, 254);
        // A cheap ring further away is better than the expensive tiles around the source.
        for xy in Rect::new(xy(22, 22), xy(28, 28))?.boundary() {
            costs.set(xy, 1);
        }

        let min_cut = grid_min_cut_with_config(&terrain, &[source], Some(&costs), &MinCutConfig::default())?;

        assert_eq!(min_cut.cut, Rect::new(xy(22, 22), xy(28, 28))?.boundary().collect::<Vec<_>>());
        assert_eq!(min_cut.flow, 24);
        assert_eq!(min_cut.inside.len(), 25);
        assert_valid_min_cut(&terrain, &costs, &[source], &min_cut);
        Ok(())
    }

    #[test]
    fn test_grid_min_cut_on_room_with_three_thin_walls() -> Result<(), Box<dyn Error>> {
        let mut terrain = PackedTerrain::new();
        for xy in Rect::new(xy(0, 0), xy(49, 0))?.iter() {
            terrain.set(xy, Wall);
        }
        for xy in Rect::new(xy(0, 1), xy(0, 49))?.iter() {
            terrain.set(xy, Wall);
        }
        for xy in Rect::new(xy(49, 1), xy(49, 49))?.iter() {
            terrain.set(xy, Wall);
        }
        terrain.set(xy(1, 45), Wall);
        terrain.set(xy(48, 45), Wall);
        let mut costs = default_cut_costs(&terrain);
        let sources = Rect::new(xy(10, 20), xy(40, 20))?.iter().collect::<Vec<_>>();
        for &xy in sources.iter() {
            costs.set(xy, 254);
        }

        let min_cut = grid_min_cut_with_config(&terrain, &sources, Some(&costs), &MinCutConfig::default())?;

        assert_eq!(min_cut.cut.len(), 46);
        for &xy in min_cut.cut.iter() {
            assert_eq!(xy.y.u8(), 45);
        }
        assert_valid_min_cut(&terrain, &costs, &sources, &min_cut);
        Ok(())
    }

    #[test]
    fn test_already_enclosed_sources() -> Result<(), Box<dyn Error>> {
        let mut terrain = PackedTerrain::new();
        for xy in Rect::new(xy(10, 10), xy(20, 20))?.boundary() {
            terrain.set(xy, Wall);
        }

        let min_cut = grid_min_cut_with_config(&terrain, &[xy(12, 12)], None, &MinCutConfig::default())?;

        assert_eq!(min_cut.phases, 0);
        assert_eq!(min_cut.flow, 0);
        assert!(min_cut.cut.is_empty());
        assert_eq!(min_cut.inside.len(), 81);
        Ok(())
    }

    #[test]
    fn test_source_near_exit_is_invalid() {
        let terrain = PackedTerrain::new();

        assert_eq!(
            grid_min_cut(&terrain, &[xy(25, 25), xy(1, 25)], None),
            Err(PlanningError::InvalidSource { xy: xy(1, 25) })
        );
        assert_eq!(
            grid_min_cut(&terrain, &[xy(25, 2)], None),
            Err(PlanningError::InvalidSource { xy: xy(25, 2) })
        );
        assert!(grid_min_cut(&terrain, &[xy(25, 3)], None).is_ok());
    }

    #[test]
    fn test_source_near_walled_boundary_is_valid() {
        let mut terrain = PackedTerrain::new();
        for y in 0..50 {
            terrain.set(xy(0, y), Wall);
        }

        assert_eq!(grid_min_cut(&terrain, &[xy(1, 25)], None), Ok(vec![xy(1, 25)]));
    }

    #[test]
    fn test_blocked_sources_are_ignored() {
        let mut terrain = PackedTerrain::new();
        terrain.set(xy(30, 30), Wall);
        let mut costs = default_cut_costs(&terrain);
        costs.set(xy(25, 25), 254);
        costs.set(xy(35, 35), OBSTACLE_COST);

        let with_blocked = grid_min_cut(&terrain, &[xy(30, 30), xy(25, 25), xy(35, 35), xy(25, 25)], Some(&costs));
        let without_blocked = grid_min_cut(&terrain, &[xy(25, 25)], Some(&costs));

        assert_eq!(with_blocked, without_blocked);

        let only_blocked = grid_min_cut_with_config(&terrain, &[xy(30, 30)], Some(&costs), &MinCutConfig::default())
            .unwrap();
        assert!(only_blocked.cut.is_empty());
        assert!(only_blocked.inside.is_empty());
    }

    #[test]
    fn test_walls_and_blocked_tiles_are_not_classified() -> Result<(), Box<dyn Error>> {
        let mut terrain = PackedTerrain::new();
        for xy in Rect::new(xy(5, 5), xy(15, 7))?.iter() {
            terrain.set(xy, Wall);
        }
        let mut costs = default_cut_costs(&terrain);
        for xy in Rect::new(xy(20, 30), xy(40, 30))?.iter() {
            costs.set(xy, OBSTACLE_COST);
        }
        costs.set(xy(25, 25), 254);

        let min_cut = grid_min_cut_with_config(&terrain, &[xy(25, 25)], Some(&costs), &MinCutConfig::default())?;

        let mut classified = RoomMatrix::new(0u8);
        for &xy in min_cut.cut.iter().chain(min_cut.inside.iter()).chain(min_cut.outside.iter()) {
            classified.set(xy, classified.get(xy) + 1);
        }
        for xy in room_rect().iter() {
            let expected = if terrain.is_wall(xy) || costs.get(xy) == OBSTACLE_COST { 0 } else { 1 };
            assert_eq!(classified.get(xy), expected);
        }
        Ok(())
    }

    #[test]
    fn test_iteration_limit() {
        let terrain = PackedTerrain::new();
        let config = MinCutConfig {
            max_phases: 0,
            ..MinCutConfig::default()
        };

        assert_eq!(
            grid_min_cut_with_config(&terrain, &[xy(25, 25)], None, &config),
            Err(PlanningError::IterationLimitExceeded { phases: 0 })
        );
    }

    #[test]
    fn test_inter_tile_capacity_must_exceed_tile_costs() {
        let terrain = PackedTerrain::new();
        let config = MinCutConfig {
            inter_tile_capacity: 200,
            ..MinCutConfig::default()
        };

        assert!(matches!(
            grid_min_cut_with_config(&terrain, &[xy(25, 25)], None, &config),
            Err(PlanningError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_exit_region() {
        let mut terrain = PackedTerrain::new();
        for x in 0..50 {
            terrain.set(xy(x, 0), Wall);
            terrain.set(xy(x, 49), Wall);
        }
        for y in 0..50 {
            terrain.set(xy(49, y), Wall);
        }
        let costs = default_cut_costs(&terrain);

        let exits = exit_region(&terrain, &costs, 2);

        assert!(exits.get(xy(0, 25)));
        assert!(exits.get(xy(2, 25)));
        assert!(!exits.get(xy(3, 25)));
        assert!(exits.get(xy(2, 1)));
        assert!(!exits.get(xy(0, 0)));
        assert!(!exits.get(xy(47, 25)));
    }

    #[test]
    fn test_random_rooms() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = MinCutConfig {
            max_phases: u16::MAX,
            ..MinCutConfig::default()
        };

        for _ in 0..20 {
            let mut terrain = PackedTerrain::new();
            let mut costs = CostMatrix::new(1);
            for xy in room_rect().iter() {
                if rng.gen_bool(0.15) {
                    terrain.set(xy, Wall);
                    costs.set(xy, OBSTACLE_COST);
                } else if rng.gen_bool(0.02) {
                    costs.set(xy, OBSTACLE_COST);
                } else {
                    costs.set(xy, rng.gen_range(1..=20));
                }
            }
            let sources = (0..rng.gen_range(1..=5))
                .map(|_| xy(rng.gen_range(10..40), rng.gen_range(10..40)))
                .collect::<Vec<_>>();

            let min_cut = grid_min_cut_with_config(&terrain, &sources, Some(&costs), &config).unwrap();

            assert_valid_min_cut(&terrain, &costs, &sources, &min_cut);
            assert_le!(min_cut.cut.len(), 2500 - min_cut.outside.len());
            assert_eq!(grid_min_cut_with_config(&terrain, &sources, Some(&costs), &config), Ok(min_cut));
        }
    }
}

//! Terrain analysis on 50x50 Screeps rooms for planning rampart enclosures: distance transform,
//! multi-source flood fill and minimum vertex cut between protected tiles and room exits.

pub mod algorithms;
pub mod config;
pub mod consts;
pub mod errors;
pub mod geometry;
pub mod logging;
pub mod terrain;

pub use algorithms::distance_transform::{distance_transform, distance_transform_from_walls};
pub use algorithms::flood_fill::{flood_fill, flood_fill_reached, FloodFillOptions};
pub use algorithms::grid_min_cut::{default_cut_costs, exit_region, grid_min_cut, grid_min_cut_with_config, MinCut};
pub use algorithms::room_matrix::{CostMatrix, RoomMatrix};
pub use config::MinCutConfig;
pub use errors::PlanningError;
pub use terrain::packed_terrain::PackedTerrain;
pub use terrain::TerrainQuery;

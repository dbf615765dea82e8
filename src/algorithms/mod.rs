// Algorithms and data structures.
pub mod distance_transform;
pub mod flood_fill;
pub mod grid_min_cut;
pub mod matrix_common;
pub mod room_matrix;

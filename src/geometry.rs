pub mod grid_direction;
pub mod rect;
pub mod room_xy;

pub mod ros2;
pub mod waypoints;

pub mod config;
pub mod export;
pub mod grid;
pub mod loaders;
pub mod server;
pub mod types;
pub mod visualization;

pub use export::waypoints_to_csv;
pub use grid::GrayMap;
pub use loaders::ros2::{load_map, load_map_files, load_map_from_bytes};
pub use loaders::waypoints::{load_waypoints, read_waypoints};
pub use types::{EditorError, MapInfo, Waypoint};
pub use visualization::{RenderStyle, render_waypoints};

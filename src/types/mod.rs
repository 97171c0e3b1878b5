pub mod constants;
pub mod error;
pub mod info;
pub mod waypoint;

pub use constants::*;
pub use error::EditorError;
pub use info::MapInfo;
pub use waypoint::Waypoint;

pub mod gray_map;

pub use gray_map::GrayMap;

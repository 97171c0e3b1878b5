pub const DEFAULT_RESOLUTION: f64 = 0.05;
pub const DEFAULT_ORIGIN: [f64; 3] = [0.0, 0.0, 0.0];

pub const CSV_HEADER: [&str; 5] = ["time", "x", "y", "theta", "curvature"];
pub const EXPORT_FILE_NAME: &str = "new_waypoints.csv";

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("invalid waypoint on line {line}: {message}")]
    InvalidWaypoint { line: u64, message: String },
    #[error("no waypoints to export")]
    NoWaypoints,
    #[error("missing upload: {0}")]
    MissingUpload(&'static str),
    #[error("upload failed: {0}")]
    Upload(String),
}

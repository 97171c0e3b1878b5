use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::types::{EditorError, Waypoint};

const FIELDS_PER_ROW: usize = 5;

/// Read `time, x, y, theta, curvature` rows after a header line.
///
/// Rows without exactly five fields are skipped. The first row with a
/// non-numeric field is an error.
pub fn read_waypoints<R: Read>(reader: R) -> Result<Vec<Waypoint>, EditorError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut waypoints = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.len() != FIELDS_PER_ROW {
            continue;
        }
        waypoints.push(parse_row(&rec)?);
    }
    Ok(waypoints)
}

/// Like [`read_waypoints`], but a bad row ends the read and the waypoints
/// parsed before it are kept.
pub fn read_waypoints_lenient<R: Read>(reader: R) -> Vec<Waypoint> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut waypoints = Vec::new();
    for rec in rdr.records() {
        let parsed = rec.map_err(EditorError::from).and_then(|rec| {
            if rec.len() != FIELDS_PER_ROW {
                return Ok(None);
            }
            parse_row(&rec).map(Some)
        });
        match parsed {
            Ok(Some(wp)) => waypoints.push(wp),
            Ok(None) => {}
            Err(e) => {
                warn!(
                    "Stopped reading waypoints after {} rows: {}",
                    waypoints.len(),
                    e
                );
                break;
            }
        }
    }
    waypoints
}

pub fn load_waypoints(path: impl AsRef<Path>) -> Result<Vec<Waypoint>, EditorError> {
    read_waypoints(File::open(path)?)
}

/// Missing or unreadable files yield an empty list.
pub fn load_waypoints_lenient(path: impl AsRef<Path>) -> Vec<Waypoint> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => read_waypoints_lenient(file),
        Err(e) => {
            warn!("Could not open waypoints {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn parse_row(rec: &StringRecord) -> Result<Waypoint, EditorError> {
    let line = rec.position().map(|p| p.line()).unwrap_or_default();
    let field = |i: usize| -> Result<f64, EditorError> {
        let raw = rec[i].trim();
        raw.parse::<f64>()
            .map_err(|e| EditorError::InvalidWaypoint {
                line,
                message: format!("field {} ({raw:?}): {e}", i + 1),
            })
    };

    // Column 0 is a timestamp, which is regenerated on export.
    field(0)?;
    Ok(Waypoint::new(field(1)?, field(2)?, field(3)?, field(4)?))
}

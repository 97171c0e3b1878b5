use std::io;

use serde::Serialize;

use crate::types::{CSV_HEADER, EditorError, Waypoint};

#[derive(Serialize)]
struct CsvRow {
    time: usize,
    x: f64,
    y: f64,
    theta: f64,
    curvature: f64,
}

/// Serialize waypoints as CSV, numbering rows from zero in list order.
///
/// Floats use shortest round-trip formatting, so whole numbers keep a
/// trailing `.0` (`1.0`, not `1`).
pub fn waypoints_to_csv(waypoints: &[Waypoint]) -> Result<String, EditorError> {
    if waypoints.is_empty() {
        return Err(EditorError::NoWaypoints);
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for (time, wp) in waypoints.iter().enumerate() {
        wtr.serialize(CsvRow {
            time,
            x: wp.x,
            y: wp.y,
            theta: wp.theta,
            curvature: wp.curvature,
        })?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| EditorError::Io(io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| EditorError::Io(io::Error::other(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::waypoints::read_waypoints;

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(waypoints_to_csv(&[]), Err(EditorError::NoWaypoints)));
    }

    #[test]
    fn writes_header_and_index() {
        let csv = waypoints_to_csv(&[
            Waypoint::new(1.5, -2.0, 0.25, 0.0),
            Waypoint::new(3.0, 4.0, 0.0, 0.125),
        ])
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "time,x,y,theta,curvature",
                "0,1.5,-2.0,0.25,0.0",
                "1,3.0,4.0,0.0,0.125",
            ]
        );
    }

    #[test]
    fn whole_numbers_keep_decimal_point() {
        let csv = waypoints_to_csv(&[Waypoint::new(1.0, -2.0, 0.0, 0.0)]).unwrap();
        assert_eq!(csv.lines().nth(1), Some("0,1.0,-2.0,0.0,0.0"));
    }

    #[test]
    fn exported_csv_reads_back() {
        let waypoints = vec![
            Waypoint::new(0.1, 0.2, 0.3, 0.4),
            Waypoint::new(-7.25, 1e-3, 3.14159, -0.5),
        ];
        let csv = waypoints_to_csv(&waypoints).unwrap();
        assert_eq!(read_waypoints(csv.as_bytes()).unwrap(), waypoints);
    }
}

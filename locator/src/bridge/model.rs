use crate::workflow::runner::Snapshot;
use firecore::interface::{InMemorySource, Shape};
use firecore::prelude::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// One labelled point set as posted by a client.
///
/// Geometries are kept as shapes so multi-point features can be sent as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRequest {
    pub shapes: Vec<Shape>,
    pub time_frame: f64,
}

impl SnapshotRequest {
    /// Every point as its own shape.
    #[cfg(test)]
    pub fn from_points(points: Vec<(f64, f64)>, time_frame: f64) -> Self {
        Self {
            shapes: InMemorySource::from_points(points).shapes,
            time_frame,
        }
    }

    pub fn into_snapshot(self) -> Snapshot {
        let mut source = InMemorySource::new(self.shapes);
        match Snapshot::from_source(&mut source, self.time_frame) {
            Ok(snapshot) => snapshot,
            Err(never) => match never {},
        }
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Overrides the bridge's observer and threshold for this request.
    #[serde(default)]
    pub config: Option<AnalysisConfig>,
    pub previous: SnapshotRequest,
    pub recent: SnapshotRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_point_shapes_are_flattened() {
        let request = SnapshotRequest {
            shapes: vec![vec![(-81.0, 41.0), (-81.1, 41.1)], vec![(-80.0, 40.0)]],
            time_frame: 48.0,
        };
        let snapshot = request.into_snapshot();
        assert_eq!(snapshot.points, vec![(-81.0, 41.0), (-81.1, 41.1), (-80.0, 40.0)]);
        assert_eq!(snapshot.time_frame, 48.0);
    }
}

use crate::workflow::config::DatasetSpec;
use crate::workflow::runner::Snapshot;
use anyhow::Context;
use firecore::interface::{CoordinateSource, Shape};
#[cfg(test)]
use firecore::interface::load_fire_coords;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The columns of a FIRMS-style hotspot export we care about.
#[derive(Debug, Deserialize)]
struct HotspotRecord {
    latitude: f64,
    longitude: f64,
}

/// Hotspot CSV where every row is a single-point shape.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
}

impl CsvSource<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)
            .with_context(|| format!("opening hotspot file {}", path_ref.display()))?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(reader),
        }
    }
}

impl<R: Read> CoordinateSource for CsvSource<R> {
    type Error = csv::Error;

    fn shapes(&mut self) -> Result<Vec<Shape>, Self::Error> {
        self.reader
            .deserialize::<HotspotRecord>()
            .map(|record| record.map(|hotspot| vec![(hotspot.longitude, hotspot.latitude)]))
            .collect()
    }
}

/// Reads the hotspot file named by `spec` into a snapshot.
pub fn load_snapshot(spec: &DatasetSpec) -> anyhow::Result<Snapshot> {
    let mut source = CsvSource::open(&spec.path)?;
    Snapshot::from_source(&mut source, spec.time_frame)
        .with_context(|| format!("reading hotspots from {}", spec.path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FIRMS_SAMPLE: &str = "\
latitude,longitude,brightness,scan,track,acq_date,confidence
41.402, -81.871,310.5,1.0,1.0,2024-06-01,80
38.210,-120.550,330.1,1.1,1.0,2024-06-01,92
";

    #[test]
    fn csv_rows_become_lon_lat_points() {
        let mut source = CsvSource::from_reader(FIRMS_SAMPLE.as_bytes());
        let points = load_fire_coords(&mut source).unwrap();
        assert_eq!(points, vec![(-81.871, 41.402), (-120.55, 38.21)]);
    }

    #[test]
    fn snapshot_loads_from_disk() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(FIRMS_SAMPLE.as_bytes()).unwrap();
        let spec = DatasetSpec {
            path: temp.path().to_path_buf(),
            time_frame: 24.0,
        };

        let snapshot = load_snapshot(&spec).unwrap();
        assert_eq!(snapshot.points.len(), 2);
        assert_eq!(snapshot.time_frame, 24.0);
    }

    #[test]
    fn malformed_row_is_an_error() {
        let mut source = CsvSource::from_reader("latitude,longitude\nnorth,-81.0\n".as_bytes());
        assert!(load_fire_coords(&mut source).is_err());
    }
}

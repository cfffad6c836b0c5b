use serde::{Deserialize, Serialize};

/// Velocity (km per time-frame unit) a fire must exceed to count as moving.
pub const DEFAULT_MOTION_THRESHOLD_KMH: f64 = 0.01;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a point from a `(longitude, latitude)` pair as delivered by
    /// coordinate sources.
    pub fn from_lon_lat((lon, lat): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// A detected fire with its distance from the observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedFire {
    pub location: GeoPoint,
    pub distance_km: f64,
}

/// A ranked fire labelled with the lookback window it was captured in.
///
/// `time_frame` is usually hours into the past, so 0 is the most recent
/// snapshot. `velocity_kmh` stays `None` until correlation assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedFire {
    pub location: GeoPoint,
    pub distance_km: f64,
    pub time_frame: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_kmh: Option<f64>,
}

impl TimedFire {
    pub fn from_ranked(ranked: &RankedFire, time_frame: f64) -> Self {
        Self {
            location: ranked.location,
            distance_km: ranked.distance_km,
            time_frame,
            velocity_kmh: None,
        }
    }
}

/// Caller-supplied parameters for one analysis run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub observer: GeoPoint,
    #[serde(default = "default_threshold")]
    pub motion_threshold_kmh: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_MOTION_THRESHOLD_KMH
}

impl AnalysisConfig {
    pub fn new(observer: GeoPoint) -> Self {
        Self {
            observer,
            motion_threshold_kmh: DEFAULT_MOTION_THRESHOLD_KMH,
        }
    }
}

/// Common error type for the analysis stages.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("identical dataset passed as both arguments (time frame {time_frame})")]
    IdenticalDataset { time_frame: f64 },
    #[error("dataset mixes time frames: expected {expected}, found {found} at index {index}")]
    MixedTimeFrames {
        expected: f64,
        found: f64,
        index: usize,
    },
    #[error("cannot correlate an empty dataset")]
    EmptyDataset,
    #[error("no fire moving faster than {threshold} km/h")]
    NoQualifyingCandidate { threshold: f64 },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lon_lat_pairs_are_reordered() {
        let point = GeoPoint::from_lon_lat((-81.8583, 41.4161));
        assert_eq!(point.lat, 41.4161);
        assert_eq!(point.lon, -81.8583);
    }

    #[test]
    fn untagged_velocity_is_omitted_from_json() {
        let fire = TimedFire {
            location: GeoPoint::new(1.0, 2.0),
            distance_km: 3.0,
            time_frame: 24.0,
            velocity_kmh: None,
        };
        let value = serde_json::to_value(fire).unwrap();
        assert!(value.get("velocity_kmh").is_none());
        assert_eq!(value["time_frame"], 24.0);
    }

    #[test]
    fn config_threshold_defaults_when_missing() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{"observer":{"lat":41.0,"lon":-81.0}}"#).unwrap();
        assert_eq!(cfg.motion_threshold_kmh, DEFAULT_MOTION_THRESHOLD_KMH);
    }
}

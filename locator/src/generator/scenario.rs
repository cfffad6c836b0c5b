use crate::workflow::runner::Snapshot;
use anyhow::ensure;
use firecore::geo::EARTH_RADIUS_KM;
use firecore::prelude::GeoPoint;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Parameters for a synthetic pair of fire snapshots.
///
/// Fire `i` sits `spacing_km * (i + 1)` from the observer in the previous
/// snapshot and closes in at `drift_kmh` (plus up to `jitter_kmh` either way)
/// by the recent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub fire_count: usize,
    pub spacing_km: f64,
    pub drift_kmh: f64,
    pub jitter_kmh: f64,
    pub recent_hours: f64,
    pub previous_hours: f64,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            fire_count: 12,
            spacing_km: 25.0,
            drift_kmh: 0.05,
            jitter_kmh: 0.04,
            recent_hours: 48.0,
            previous_hours: 168.0,
            seed: 0,
        }
    }
}

/// Point `distance_km` away from `origin` along the initial `bearing_deg`.
fn destination(origin: &GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();
    let bearing = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Builds `(previous, recent)` snapshots as `(lon, lat)` point lists.
pub fn build_scenario(
    observer: &GeoPoint,
    config: &ScenarioConfig,
) -> anyhow::Result<(Snapshot, Snapshot)> {
    ensure!(config.jitter_kmh >= 0.0, "jitter must not be negative");
    ensure!(
        config.previous_hours != config.recent_hours,
        "snapshots need distinct time frames"
    );

    let elapsed = config.previous_hours - config.recent_hours;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut previous = Vec::with_capacity(config.fire_count);
    let mut recent = Vec::with_capacity(config.fire_count);

    for index in 0..config.fire_count {
        let bearing = rng.gen_range(0.0..360.0);
        let jitter = if config.jitter_kmh > 0.0 {
            rng.gen_range(-config.jitter_kmh..=config.jitter_kmh)
        } else {
            0.0
        };
        let start_km = config.spacing_km * (index + 1) as f64;
        let end_km = (start_km - (config.drift_kmh + jitter) * elapsed).max(0.0);

        let then = destination(observer, bearing, start_km);
        let now = destination(observer, bearing, end_km);
        previous.push((then.lon, then.lat));
        recent.push((now.lon, now.lat));
    }

    Ok((
        Snapshot {
            points: previous,
            time_frame: config.previous_hours,
        },
        Snapshot {
            points: recent,
            time_frame: config.recent_hours,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use firecore::geo::distance;

    #[test]
    fn scenario_builds_expected_point_counts() {
        let observer = GeoPoint::new(41.4161, -81.8583);
        let (previous, recent) = build_scenario(&observer, &ScenarioConfig::default()).unwrap();
        assert_eq!(previous.points.len(), 12);
        assert_eq!(recent.points.len(), 12);
        assert_eq!(previous.time_frame, 168.0);
        assert_eq!(recent.time_frame, 48.0);
    }

    #[test]
    fn destination_lands_at_requested_distance() {
        let observer = GeoPoint::new(41.4161, -81.8583);
        for bearing in [0.0, 45.0, 137.0, 270.0] {
            let point = destination(&observer, bearing, 75.0);
            assert!((distance(&observer, &point) - 75.0).abs() < 1e-6);
        }
    }

    #[test]
    fn same_seed_reproduces_scenario() {
        let observer = GeoPoint::new(-33.86, 151.2);
        let config = ScenarioConfig {
            seed: 7,
            ..Default::default()
        };
        let (first, _) = build_scenario(&observer, &config).unwrap();
        let (second, _) = build_scenario(&observer, &config).unwrap();
        assert_eq!(first.points, second.points);
    }

    #[test]
    fn equal_time_frames_are_rejected() {
        let config = ScenarioConfig {
            recent_hours: 24.0,
            previous_hours: 24.0,
            ..Default::default()
        };
        assert!(build_scenario(&GeoPoint::new(0.0, 0.0), &config).is_err());
    }
}

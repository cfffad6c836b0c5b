use anyhow::Context;
use firecore::prelude::{AnalysisConfig, AnalysisError, TimedFire};
use firecore::interface::{load_fire_coords, CoordinateSource};
use firecore::processing::{prepare_dataset, select_nearest_moving, Correlator};
use firecore::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw `(lon, lat)` fire points captured over one lookback window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub points: Vec<(f64, f64)>,
    pub time_frame: f64,
}

impl Snapshot {
    /// Flattens every shape from `source` into one snapshot.
    pub fn from_source<S: CoordinateSource>(
        source: &mut S,
        time_frame: f64,
    ) -> Result<Self, S::Error> {
        Ok(Self {
            points: load_fire_coords(source)?,
            time_frame,
        })
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub config: AnalysisConfig,
    pub recent_time_frame: f64,
    pub recent_count: usize,
    pub previous_time_frame: f64,
    pub previous_count: usize,
    pub correspondence: &'static str,
    pub paired: usize,
    pub unpaired: usize,
    pub nearest_moving: Option<TimedFire>,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: AnalysisConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Same metrics sink, different observer or threshold.
    pub fn with_config(&self, config: AnalysisConfig) -> Self {
        Self {
            config,
            metrics: self.metrics.clone(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Ranks both snapshots, derives velocities and picks the nearest moving
    /// fire. The snapshots may be given in either order.
    pub fn execute(&self, previous: &Snapshot, recent: &Snapshot) -> anyhow::Result<AnalysisReport> {
        let logger = LogManager::new("runner");
        let observer = self.config.observer;

        let previous_fires = prepare_dataset(&observer, &previous.points, previous.time_frame);
        self.metrics.record_ranked(previous_fires.len());
        let recent_fires = prepare_dataset(&observer, &recent.points, recent.time_frame);
        self.metrics.record_ranked(recent_fires.len());
        logger.record(&format!(
            "ranked {} fires at {} and {} fires at {}",
            previous_fires.len(),
            previous.time_frame,
            recent_fires.len(),
            recent.time_frame
        ));

        // velocities land on the second argument, so the older snapshot goes first
        let (older, newer) = if previous.time_frame >= recent.time_frame {
            (&previous_fires, &recent_fires)
        } else {
            logger.warn("recent snapshot is older than previous; swapping");
            (&recent_fires, &previous_fires)
        };

        let correlator = Correlator::positional();
        let correlation = correlator
            .correlate(older, newer)
            .context("correlating snapshots")?;
        self.metrics
            .record_correlation(correlation.paired, correlation.unpaired);

        let threshold = self.config.motion_threshold_kmh;
        let nearest_moving = match select_nearest_moving(&correlation.fires, threshold) {
            Ok(fire) => Some(fire),
            Err(AnalysisError::NoQualifyingCandidate { .. }) => {
                self.metrics.record_selection_failure();
                logger.warn(&format!("no fire moving faster than {} km/h", threshold));
                None
            }
            Err(err) => return Err(err).context("selecting nearest moving fire"),
        };

        Ok(AnalysisReport {
            config: self.config,
            recent_time_frame: recent.time_frame,
            recent_count: recent_fires.len(),
            previous_time_frame: previous.time_frame,
            previous_count: previous_fires.len(),
            correspondence: correlator.strategy_name(),
            paired: correlation.paired,
            unpaired: correlation.unpaired,
            nearest_moving,
            metrics: self.metrics.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::scenario::{build_scenario, ScenarioConfig};
    use firecore::prelude::GeoPoint;

    fn observer() -> GeoPoint {
        GeoPoint::new(41.4161, -81.8583)
    }

    #[test]
    fn runner_finds_nearest_approaching_fire() {
        let scenario = ScenarioConfig {
            jitter_kmh: 0.0,
            ..Default::default()
        };
        let (previous, recent) = build_scenario(&observer(), &scenario).unwrap();
        let runner = Runner::new(AnalysisConfig::new(observer()));

        let report = runner.execute(&previous, &recent).unwrap();
        assert_eq!(report.recent_count, scenario.fire_count);
        assert_eq!(report.paired, scenario.fire_count);
        assert_eq!(report.unpaired, 0);
        assert_eq!(report.correspondence, "positional");

        let fire = report.nearest_moving.unwrap();
        assert_eq!(fire.time_frame, scenario.recent_hours);
        assert!((fire.velocity_kmh.unwrap() - scenario.drift_kmh).abs() < 1e-6);
        assert_eq!(report.metrics.datasets_ranked, 2);
    }

    #[test]
    fn runner_accepts_snapshots_in_either_order() {
        let (previous, recent) = build_scenario(&observer(), &ScenarioConfig::default()).unwrap();
        let runner = Runner::new(AnalysisConfig::new(observer()));

        let forward = runner.execute(&previous, &recent).unwrap();
        let reversed = runner.execute(&recent, &previous).unwrap();
        assert_eq!(forward.nearest_moving, reversed.nearest_moving);
        assert_eq!(runner.metrics().datasets_ranked, 4);
    }

    #[test]
    fn receding_fires_yield_no_selection() {
        let scenario = ScenarioConfig {
            drift_kmh: -0.05,
            jitter_kmh: 0.0,
            ..Default::default()
        };
        let (previous, recent) = build_scenario(&observer(), &scenario).unwrap();
        let runner = Runner::new(AnalysisConfig::new(observer()));

        let report = runner.execute(&previous, &recent).unwrap();
        assert!(report.nearest_moving.is_none());
        assert_eq!(report.metrics.selection_failures, 1);
    }

    #[test]
    fn identical_time_frames_fail() {
        let snapshot = Snapshot {
            points: vec![(-81.0, 41.0)],
            time_frame: 24.0,
        };
        let runner = Runner::new(AnalysisConfig::new(observer()));
        let err = runner.execute(&snapshot, &snapshot).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::IdenticalDataset { .. })
        ));
    }
}

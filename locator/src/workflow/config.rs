use anyhow::Context;
use firecore::prelude::{AnalysisConfig, GeoPoint, DEFAULT_MOTION_THRESHOLD_KMH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A hotspot export and the lookback window it covers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DatasetSpec {
    pub path: PathBuf,
    pub time_frame: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub observer: GeoPoint,
    #[serde(default = "default_threshold")]
    pub threshold_kmh: f64,
    #[serde(default)]
    pub recent: Option<DatasetSpec>,
    #[serde(default)]
    pub previous: Option<DatasetSpec>,
}

fn default_threshold() -> f64 {
    DEFAULT_MOTION_THRESHOLD_KMH
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        observer: GeoPoint,
        threshold_kmh: f64,
        recent: Option<DatasetSpec>,
        previous: Option<DatasetSpec>,
    ) -> Self {
        Self {
            observer,
            threshold_kmh,
            recent,
            previous,
        }
    }

    pub fn to_analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            observer: self.observer,
            motion_threshold_kmh: self.threshold_kmh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_analysis_config() {
        let cfg = WorkflowConfig::from_args(GeoPoint::new(41.4161, -81.8583), 0.05, None, None);
        let analysis = cfg.to_analysis_config();
        assert_eq!(analysis.observer.lat, 41.4161);
        assert_eq!(analysis.motion_threshold_kmh, 0.05);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"observer:\n  lat: 41.4161\n  lon: -81.8583\nrecent:\n  path: fires_48h.csv\n  time_frame: 48\nprevious:\n  path: fires_7d.csv\n  time_frame: 168\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();

        assert_eq!(cfg.threshold_kmh, DEFAULT_MOTION_THRESHOLD_KMH);
        assert_eq!(
            cfg.recent,
            Some(DatasetSpec {
                path: PathBuf::from("fires_48h.csv"),
                time_frame: 48.0,
            })
        );
        assert_eq!(cfg.previous.map(|spec| spec.time_frame), Some(168.0));
    }

    #[test]
    fn config_load_reports_missing_file() {
        let err = WorkflowConfig::load("/nonexistent/workflow.yaml").unwrap_err();
        assert!(err.to_string().contains("reading workflow config"));
    }
}

pub mod correlation;
pub mod motion;
pub mod ranking;
pub mod tagging;

pub use correlation::{
    correlate, Correlation, Correlator, CorrespondenceStrategy, PositionalCorrespondence,
};
pub use motion::{nearest_moving_fire, select_nearest_moving};
pub use ranking::rank;
pub use tagging::tag;

use crate::prelude::{GeoPoint, TimedFire};

/// Ranks raw `(lon, lat)` points around `observer` and labels them with
/// `time_frame`.
pub fn prepare_dataset(observer: &GeoPoint, points: &[(f64, f64)], time_frame: f64) -> Vec<TimedFire> {
    tag(&rank(observer, points), time_frame)
}

use crate::prelude::{AnalysisError, AnalysisResult, TimedFire, DEFAULT_MOTION_THRESHOLD_KMH};

/// Returns the nearest fire whose velocity is strictly above `threshold`.
///
/// The dataset is re-sorted by distance first, whatever order it arrives in.
/// Fires without a velocity never qualify.
pub fn select_nearest_moving(dataset: &[TimedFire], threshold: f64) -> AnalysisResult<TimedFire> {
    let mut sorted = dataset.to_vec();
    sorted.sort_by(|lhs, rhs| lhs.distance_km.total_cmp(&rhs.distance_km));

    sorted
        .into_iter()
        .find(|fire| fire.velocity_kmh.is_some_and(|velocity| velocity > threshold))
        .ok_or(AnalysisError::NoQualifyingCandidate { threshold })
}

/// [`select_nearest_moving`] with the default motion threshold.
pub fn nearest_moving_fire(dataset: &[TimedFire]) -> AnalysisResult<TimedFire> {
    select_nearest_moving(dataset, DEFAULT_MOTION_THRESHOLD_KMH)
}

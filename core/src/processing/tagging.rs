use crate::prelude::{RankedFire, TimedFire};

/// Labels every ranked fire with the same `time_frame`, keeping order.
pub fn tag(ranked: &[RankedFire], time_frame: f64) -> Vec<TimedFire> {
    ranked
        .iter()
        .map(|fire| TimedFire::from_ranked(fire, time_frame))
        .collect()
}

use crate::geo::KinematicsHelper;
use crate::prelude::{AnalysisError, AnalysisResult, TimedFire};
use crate::telemetry::log::LogManager;

/// Decides which fire in one snapshot is the same physical fire in another.
pub trait CorrespondenceStrategy {
    fn name(&self) -> &'static str;

    /// Returns `(index into a, index into b)` pairs believed to be the same fire.
    fn pair(&self, a: &[TimedFire], b: &[TimedFire]) -> Vec<(usize, usize)>;
}

/// Pairs the i-th fire of one snapshot with the i-th fire of the other.
///
/// Only sound when both snapshots ranked the same fires into the same order.
/// Snapshots with different fire counts are truncated to the shorter one, and
/// any reordering between windows silently mismatches fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalCorrespondence;

impl CorrespondenceStrategy for PositionalCorrespondence {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn pair(&self, a: &[TimedFire], b: &[TimedFire]) -> Vec<(usize, usize)> {
        (0..a.len().min(b.len())).map(|idx| (idx, idx)).collect()
    }
}

/// Outcome of correlating two snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    /// The more recent snapshot.
    pub fires: Vec<TimedFire>,
    pub paired: usize,
    /// Fires in either snapshot that found no counterpart.
    pub unpaired: usize,
}

/// Correspondence & velocity engine.
pub struct Correlator<S = PositionalCorrespondence> {
    strategy: S,
    logger: LogManager,
}

impl Correlator<PositionalCorrespondence> {
    pub fn positional() -> Self {
        Self::new(PositionalCorrespondence)
    }
}

impl Default for Correlator<PositionalCorrespondence> {
    fn default() -> Self {
        Self::positional()
    }
}

impl<S: CorrespondenceStrategy> Correlator<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            strategy,
            logger: LogManager::new("correlation"),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Computes a velocity for every corresponding pair and writes it onto
    /// the fire taken from `b`.
    ///
    /// Returns whichever snapshot has the smaller time frame. Passing the
    /// older snapshot as `a` returns the annotated copy of `b`; the other way
    /// round returns `a` untouched, since annotations always land on `b`.
    pub fn correlate(&self, a: &[TimedFire], b: &[TimedFire]) -> AnalysisResult<Correlation> {
        let a_frame = uniform_time_frame(a)?;
        let b_frame = uniform_time_frame(b)?;
        if a_frame == b_frame {
            return Err(AnalysisError::IdenticalDataset {
                time_frame: a_frame,
            });
        }

        let mut annotated = b.to_vec();
        let mut paired = 0;
        for (a_idx, b_idx) in self.strategy.pair(a, b) {
            if let (Some(older), Some(target)) = (a.get(a_idx), annotated.get_mut(b_idx)) {
                let velocity = KinematicsHelper::velocity(older, target);
                target.velocity_kmh = Some(velocity);
                paired += 1;
            }
        }

        let unpaired = (a.len() + b.len()).saturating_sub(2 * paired);
        if unpaired > 0 {
            self.logger.warn(&format!(
                "{} correspondence left {} fires unpaired ({} vs {})",
                self.strategy.name(),
                unpaired,
                a.len(),
                b.len()
            ));
        }

        let fires = if a_frame > b_frame {
            annotated
        } else {
            self.logger.warn(&format!(
                "time frame {} is more recent than {}; velocities went to the older snapshot",
                a_frame, b_frame
            ));
            a.to_vec()
        };

        self.logger.record(&format!(
            "correlated {} pairs between time frames {} and {}",
            paired, a_frame, b_frame
        ));

        Ok(Correlation {
            fires,
            paired,
            unpaired,
        })
    }
}

/// Positional correlation returning only the more recent snapshot.
pub fn correlate(a: &[TimedFire], b: &[TimedFire]) -> AnalysisResult<Vec<TimedFire>> {
    Correlator::positional()
        .correlate(a, b)
        .map(|correlation| correlation.fires)
}

fn uniform_time_frame(dataset: &[TimedFire]) -> AnalysisResult<f64> {
    let expected = dataset
        .first()
        .map(|fire| fire.time_frame)
        .ok_or(AnalysisError::EmptyDataset)?;

    match dataset
        .iter()
        .enumerate()
        .find(|(_, fire)| fire.time_frame != expected)
    {
        Some((index, fire)) => Err(AnalysisError::MixedTimeFrames {
            expected,
            found: fire.time_frame,
            index,
        }),
        None => Ok(expected),
    }
}

//! Core geospatial analysis for the fire locator.
//!
//! Detected thermal anomalies are ranked by great-circle distance from an
//! observer, tagged with the lookback window they were captured in, and then
//! correlated across two windows to estimate how fast each one is closing on
//! or receding from the observer.

pub mod geo;
pub mod interface;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{AnalysisConfig, AnalysisError, AnalysisResult, GeoPoint, RankedFire, TimedFire};

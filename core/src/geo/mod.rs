pub mod distance;
pub mod kinematics;

pub use distance::{DistanceHelper, EARTH_RADIUS_KM};
pub use kinematics::KinematicsHelper;

use crate::prelude::GeoPoint;

/// Great-circle distance in kilometres between two points.
pub fn distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    DistanceHelper::haversine_km(p1, p2)
}

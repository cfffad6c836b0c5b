use crate::prelude::GeoPoint;

/// Spherical Earth radius in kilometres.
///
/// A single-radius sphere carries a bounded systematic error against the
/// ellipsoid (a few tenths of a percent); swap the model here if that matters.
pub const EARTH_RADIUS_KM: f64 = 6373.0;

pub struct DistanceHelper;

impl DistanceHelper {
    /// Haversine distance on a sphere of [`EARTH_RADIUS_KM`].
    ///
    /// Symmetric in its arguments. Latitude/longitude ranges are not checked.
    pub fn haversine_km(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
        Self::haversine_with_radius(p1, p2, EARTH_RADIUS_KM)
    }

    pub fn haversine_with_radius(p1: &GeoPoint, p2: &GeoPoint, radius_km: f64) -> f64 {
        let lat1 = p1.lat.to_radians();
        let lon1 = p1.lon.to_radians();
        let lat2 = p2.lat.to_radians();
        let lon2 = p2.lon.to_radians();

        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // rounding can push `a` fractionally past 1 for antipodal points
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        radius_km * c
    }
}

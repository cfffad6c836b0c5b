use crate::geo::distance;
use crate::prelude::{GeoPoint, RankedFire};

/// Attaches the distance from `observer` to every `(lon, lat)` point and
/// orders the result nearest first.
///
/// The sort is stable, so equidistant points keep their input order.
pub fn rank(observer: &GeoPoint, points: &[(f64, f64)]) -> Vec<RankedFire> {
    let mut ranked: Vec<RankedFire> = points
        .iter()
        .map(|&pair| {
            let location = GeoPoint::from_lon_lat(pair);
            RankedFire {
                location,
                distance_km: distance(&location, observer),
            }
        })
        .collect();

    ranked.sort_by(|lhs, rhs| lhs.distance_km.total_cmp(&rhs.distance_km));
    ranked
}

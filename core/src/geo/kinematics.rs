use crate::prelude::TimedFire;

pub struct KinematicsHelper;

impl KinematicsHelper {
    /// Change in observer distance per unit of time frame.
    ///
    /// Positive means the fire is nearer in the snapshot with the smaller
    /// time frame, i.e. it is approaching the observer. Equal time frames divide by zero and yield a
    /// non-finite value; correlation rejects that case before calling this.
    pub fn velocity(p1: &TimedFire, p2: &TimedFire) -> f64 {
        (p1.distance_km - p2.distance_km) / (p1.time_frame - p2.time_frame)
    }

    /// Magnitude of [`KinematicsHelper::velocity`].
    pub fn speed(p1: &TimedFire, p2: &TimedFire) -> f64 {
        Self::velocity(p1, p2).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::GeoPoint;

    fn fire(distance_km: f64, time_frame: f64) -> TimedFire {
        TimedFire {
            location: GeoPoint::new(0.0, 0.0),
            distance_km,
            time_frame,
            velocity_kmh: None,
        }
    }

    #[test]
    fn approaching_fire_has_positive_velocity() {
        let d1 = fire(1.0, 1.0);
        let d2 = fire(2.0, 2.0);
        assert_eq!(KinematicsHelper::velocity(&d1, &d2), 1.0);
        assert_eq!(KinematicsHelper::speed(&d1, &d2), 1.0);
    }

    #[test]
    fn receding_fire_has_negative_velocity_but_positive_speed() {
        let d1 = fire(1.0, 1.0);
        let d0 = fire(0.0, 2.0);
        assert_eq!(KinematicsHelper::velocity(&d1, &d0), -1.0);
        assert_eq!(KinematicsHelper::speed(&d1, &d0), 1.0);
    }

    #[test]
    fn argument_order_does_not_change_velocity() {
        let a = fire(12.0, 48.0);
        let b = fire(30.0, 168.0);
        assert_eq!(
            KinematicsHelper::velocity(&a, &b),
            KinematicsHelper::velocity(&b, &a)
        );
    }
}

pub mod distance;

pub use distance::{distance_km, round_km, GeoPoint, EARTH_RADIUS_KM};

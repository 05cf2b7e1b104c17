use crate::geo::distance_km;
use crate::model::{Person, RankedPerson};

/// Keeps the candidates within `radius_km` of `center`, nearest first.
///
/// A radius of zero or less disables filtering: every candidate comes back
/// in input order, still annotated with its distance. Equal distances
/// keep their input order.
pub fn filter_by_radius(center: &Person, candidates: &[Person], radius_km: f64) -> Vec<RankedPerson> {
    let ranked = annotate(center.latitude, center.longitude, candidates);
    if radius_km <= 0.0 {
        return ranked;
    }

    let mut within: Vec<RankedPerson> = ranked
        .into_iter()
        .filter(|entry| entry.distance_km <= radius_km)
        .collect();
    within.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    within
}

/// Annotates every person with its distance from the center and sorts
/// nearest first. NaN distances sort last.
pub fn sort_by_distance(center_lat: f64, center_lon: f64, persons: &[Person]) -> Vec<RankedPerson> {
    let mut ranked = annotate(center_lat, center_lon, persons);
    ranked.sort_by(|a, b| nan_last(a.distance_km, b.distance_km));
    ranked
}

fn annotate(center_lat: f64, center_lon: f64, persons: &[Person]) -> Vec<RankedPerson> {
    persons
        .iter()
        .map(|person| {
            let distance = distance_km(center_lat, center_lon, person.latitude, person.longitude);
            RankedPerson::new(person.clone(), distance)
        })
        .collect()
}

fn nan_last(a: f64, b: f64) -> std::cmp::Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

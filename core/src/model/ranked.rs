use crate::geo::round_km;
use crate::model::Person;
use serde::{Deserialize, Serialize};

/// A person annotated with its distance from some reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPerson {
    #[serde(flatten)]
    pub person: Person,
    pub distance_km: f64,
}

impl RankedPerson {
    pub fn new(person: Person, distance_km: f64) -> Self {
        Self {
            person,
            distance_km,
        }
    }

    pub fn display_distance(&self) -> f64 {
        round_km(self.distance_km)
    }

    pub fn into_person(self) -> Person {
        self.person
    }
}

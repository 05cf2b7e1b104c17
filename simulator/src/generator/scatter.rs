use crate::generator::fixture::{DOBONG_LAT, DOBONG_LON};
use crate::workflow::dataset::Roster;
use anyhow::ensure;
use lmpcore::model::{Gender, Person, PersonType};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const KM_PER_DEGREE_LAT: f64 = 111.32;
const TIME_SLOTS: [&str; 3] = ["weekday_am", "weekday_pm", "weekend"];

/// Configuration for generating a synthetic roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub users: usize,
    pub assistants: usize,
    pub center_lat: f64,
    pub center_lon: f64,
    pub max_radius_km: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            users: 10,
            assistants: 20,
            center_lat: DOBONG_LAT,
            center_lon: DOBONG_LON,
            max_radius_km: 4.0,
            seed: 0,
        }
    }
}

/// Scatters people uniformly over a disk around the configured center.
/// Users get ids 1..=users, assistants follow.
pub fn build_roster(config: &GeneratorConfig) -> anyhow::Result<Roster> {
    ensure!(
        config.max_radius_km > 0.0,
        "max_radius_km must be positive, got {}",
        config.max_radius_km
    );
    ensure!(
        config.center_lat.abs() < 89.0,
        "center latitude {} too close to a pole",
        config.center_lat
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let users = (0..config.users)
        .map(|index| {
            let id = index as u32 + 1;
            let (lat, lon) = scatter_point(&mut rng, config);
            Person::new(
                id,
                format!("이용자 {id}"),
                PersonType::User,
                lat,
                lon,
                format!("synthetic user address {id}"),
            )
            .with_gender(random_gender(&mut rng))
        })
        .collect();

    let assistants = (0..config.assistants)
        .map(|index| {
            let id = (config.users + index) as u32 + 1;
            let (lat, lon) = scatter_point(&mut rng, config);
            let slots = TIME_SLOTS[rng.gen_range(0..TIME_SLOTS.len())];
            Person::new(
                id,
                format!("활동지원사 {id}"),
                PersonType::Assistant,
                lat,
                lon,
                format!("synthetic assistant address {id}"),
            )
            .with_gender(random_gender(&mut rng))
            .with_assistant_profile(rng.gen_bool(0.7), slots, rng.gen_range(0..=12))
        })
        .collect();

    Ok(Roster { users, assistants })
}

fn scatter_point(rng: &mut StdRng, config: &GeneratorConfig) -> (f64, f64) {
    // sqrt keeps the density uniform over the disk
    let radius = config.max_radius_km * rng.gen::<f64>().sqrt();
    let bearing = rng.gen_range(0.0..2.0 * PI);
    let d_lat = radius * bearing.cos() / KM_PER_DEGREE_LAT;
    let d_lon =
        radius * bearing.sin() / (KM_PER_DEGREE_LAT * config.center_lat.to_radians().cos());
    (config.center_lat + d_lat, config.center_lon + d_lon)
}

fn random_gender(rng: &mut StdRng) -> Gender {
    if rng.gen_bool(0.5) {
        Gender::Female
    } else {
        Gender::Male
    }
}

use crate::generator::fixture::{DOBONG_LAT, DOBONG_LON};
use lmpcore::geo::{round_km, GeoPoint};
use lmpcore::matching::{CenterMode, MatchSession};
use lmpcore::model::{Person, PersonType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_ZOOM: u8 = 13;

/// Marker and overlay colors for the map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub user_marker_color: String,
    pub assistant_marker_color: String,
    pub circle_color: String,
    pub circle_opacity: f64,
    pub circle_border_width: u8,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            user_marker_color: "#60A5FA".into(),
            assistant_marker_color: "#FB923C".into(),
            circle_color: "#60A5FA".into(),
            circle_opacity: 0.3,
            circle_border_width: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: u32,
    pub name: String,
    pub kind: PersonType,
    pub latitude: f64,
    pub longitude: f64,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusCircle {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

/// Everything the map page needs to redraw itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapModel {
    pub center: GeoPoint,
    pub zoom: u8,
    pub mode: CenterMode,
    pub circle: Option<RadiusCircle>,
    pub markers: Vec<Marker>,
    pub status: String,
    pub users_in_radius: usize,
    pub assistants_in_radius: usize,
    pub style: MapStyle,
}

impl Default for MapModel {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(DOBONG_LAT, DOBONG_LON),
            zoom: DEFAULT_ZOOM,
            mode: CenterMode::User,
            circle: None,
            markers: Vec::new(),
            status: String::new(),
            users_in_radius: 0,
            assistants_in_radius: 0,
            style: MapStyle::default(),
        }
    }
}

impl MapModel {
    /// Projects the session onto markers.
    ///
    /// With a center selected, its own side shows only the center marker and
    /// the other side shows only the filtered persons. Otherwise everything
    /// is visible.
    pub fn from_session(session: &MatchSession, style: &MapStyle) -> Self {
        let center = session.center();
        let distances: HashMap<u32, f64> = session
            .ranked()
            .unwrap_or_default()
            .iter()
            .map(|entry| (entry.person.id, round_km(entry.distance_km)))
            .collect();

        let filtered_ids: Vec<u32> = match session.mode() {
            CenterMode::User => session.filtered_assistants(),
            CenterMode::Assistant => session.filtered_users(),
        }
        .iter()
        .map(|person| person.id)
        .collect();
        let center_kind = session.mode().center_kind();

        let marker = |person: &Person| {
            let visible = match center {
                None => true,
                Some(selected) if person.kind == center_kind => person.id == selected.id,
                Some(_) => filtered_ids.contains(&person.id),
            };
            Marker {
                id: person.id,
                name: person.name.clone(),
                kind: person.kind,
                latitude: person.latitude,
                longitude: person.longitude,
                visible,
                distance_km: distances.get(&person.id).copied(),
            }
        };
        let markers = session
            .users()
            .iter()
            .chain(session.assistants())
            .map(marker)
            .collect();

        let circle = center
            .filter(|_| session.radius_km() > 0.0)
            .map(|selected| RadiusCircle {
                latitude: selected.latitude,
                longitude: selected.longitude,
                radius_km: session.radius_km(),
            });

        Self {
            center: center
                .map(Person::location)
                .unwrap_or_else(|| GeoPoint::new(DOBONG_LAT, DOBONG_LON)),
            zoom: DEFAULT_ZOOM,
            mode: session.mode(),
            circle,
            markers,
            status: session.status().to_string(),
            users_in_radius: session.users_in_radius(),
            assistants_in_radius: session.assistants_in_radius(),
            style: style.clone(),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.markers.iter().filter(|marker| marker.visible).count()
    }
}

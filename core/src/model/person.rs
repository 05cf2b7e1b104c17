use crate::geo::GeoPoint;
use crate::prelude::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a match a person is on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    /// Care recipient (이용자).
    User,
    /// Caregiver (활동지원사).
    Assistant,
}

impl PersonType {
    pub fn opposite(self) -> Self {
        match self {
            PersonType::User => PersonType::Assistant,
            PersonType::Assistant => PersonType::User,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PersonType::User => "이용자",
            PersonType::Assistant => "활동지원사",
        }
    }
}

impl fmt::Display for PersonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonType::User => f.write_str("user"),
            PersonType::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A user or assistant with a fixed location.
///
/// Distance from a reference point is never stored here; see
/// [`RankedPerson`](crate::model::RankedPerson).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub kind: PersonType,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub has_vehicle: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time_slots: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
}

impl Person {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        kind: PersonType,
        latitude: f64,
        longitude: f64,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            latitude,
            longitude,
            address: address.into(),
            phone: None,
            gender: None,
            has_vehicle: false,
            available_time_slots: None,
            experience_years: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Fills the assistant-only profile fields.
    pub fn with_assistant_profile(
        mut self,
        has_vehicle: bool,
        available_time_slots: impl Into<String>,
        experience_years: u32,
    ) -> Self {
        self.has_vehicle = has_vehicle;
        self.available_time_slots = Some(available_time_slots.into());
        self.experience_years = Some(experience_years);
        self
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn is_user(&self) -> bool {
        self.kind == PersonType::User
    }

    pub fn is_assistant(&self) -> bool {
        self.kind == PersonType::Assistant
    }

    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidPerson {
            id: self.id,
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name is blank"));
        }
        if self.address.trim().is_empty() {
            return Err(invalid("address is blank"));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(invalid(&format!("latitude {} out of range", self.latitude)));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(invalid(&format!(
                "longitude {} out of range",
                self.longitude
            )));
        }
        Ok(())
    }
}

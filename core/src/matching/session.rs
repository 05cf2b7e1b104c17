use crate::matching::radius::filter_by_radius;
use crate::model::{Person, PersonType, RankedPerson};
use crate::prelude::{CoreError, CoreResult};
use crate::telemetry::{LogManager, Metrics, MetricsRecorder};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RADIUS_KM: f64 = 3.0;

/// Which side of the match supplies the center point.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CenterMode {
    /// A selected user is the center; assistants are filtered.
    #[default]
    User,
    /// A selected assistant is the center; users are filtered.
    Assistant,
}

impl CenterMode {
    pub fn center_kind(self) -> PersonType {
        match self {
            CenterMode::User => PersonType::User,
            CenterMode::Assistant => PersonType::Assistant,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            CenterMode::User => CenterMode::Assistant,
            CenterMode::Assistant => CenterMode::User,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CenterMode::User => "이용자 중심",
            CenterMode::Assistant => "활동지원사 중심",
        }
    }
}

/// Summary of what the filtered side currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum FilterStatus {
    All { count: usize },
    Within { radius_km: f64, count: usize },
}

impl fmt::Display for FilterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterStatus::All { count } => write!(f, "전체 {}명", count),
            FilterStatus::Within { radius_km, count } => {
                write!(f, "{}km 내 {}명", radius_km, count)
            }
        }
    }
}

/// State behind the map screen: two rosters, a center mode, one selection
/// per side and the radius applied around the active selection.
///
/// A filtered list of `None` means "the whole roster, no distances".
pub struct MatchSession {
    mode: CenterMode,
    users: Vec<Person>,
    assistants: Vec<Person>,
    selected_user: Option<Person>,
    selected_assistant: Option<Person>,
    radius_km: f64,
    filtered_users: Option<Vec<RankedPerson>>,
    filtered_assistants: Option<Vec<RankedPerson>>,
    users_in_radius: usize,
    assistants_in_radius: usize,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl MatchSession {
    pub fn new() -> Self {
        Self {
            mode: CenterMode::default(),
            users: Vec::new(),
            assistants: Vec::new(),
            selected_user: None,
            selected_assistant: None,
            radius_km: DEFAULT_RADIUS_KM,
            filtered_users: None,
            filtered_assistants: None,
            users_in_radius: 0,
            assistants_in_radius: 0,
            logger: LogManager::new("session"),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Replaces both rosters and resets the filtered views to show everyone.
    pub fn load(&mut self, users: Vec<Person>, assistants: Vec<Person>) {
        self.users = users;
        self.assistants = assistants;
        self.selected_user = None;
        self.selected_assistant = None;
        self.reset_users();
        self.reset_assistants();
        self.logger.record(&format!(
            "loaded {} users, {} assistants",
            self.users.len(),
            self.assistants.len()
        ));
    }

    pub fn toggle_center_mode(&mut self) {
        self.mode = self.mode.toggled();
        match self.mode {
            CenterMode::User => {
                self.selected_assistant = None;
                self.reset_users();
            }
            CenterMode::Assistant => {
                self.selected_user = None;
                self.reset_assistants();
            }
        }
        self.logger.trace(&format!("center mode -> {}", self.mode.label()));
    }

    pub fn select_user(&mut self, id: u32) -> CoreResult<()> {
        let user = find(&self.users, id)?;
        self.selected_user = Some(user);
        if self.mode == CenterMode::User {
            self.filter_assistants();
        }
        Ok(())
    }

    pub fn select_assistant(&mut self, id: u32) -> CoreResult<()> {
        let assistant = find(&self.assistants, id)?;
        self.selected_assistant = Some(assistant);
        if self.mode == CenterMode::Assistant {
            self.filter_users();
        }
        Ok(())
    }

    /// Selects by id on whichever roster the current mode centers on.
    pub fn select_center(&mut self, id: u32) -> CoreResult<()> {
        match self.mode {
            CenterMode::User => self.select_user(id),
            CenterMode::Assistant => self.select_assistant(id),
        }
    }

    /// Applies a new radius. With nothing selected, the first person of the
    /// centered roster is selected automatically.
    pub fn change_radius(&mut self, radius_km: f64) {
        self.radius_km = radius_km;
        let has_center = self.center().is_some();
        match (self.mode, has_center) {
            (CenterMode::User, true) => self.filter_assistants(),
            (CenterMode::Assistant, true) => self.filter_users(),
            (CenterMode::User, false) => {
                if let Some(first) = self.users.first().cloned() {
                    self.selected_user = Some(first);
                    self.filter_assistants();
                }
            }
            (CenterMode::Assistant, false) => {
                if let Some(first) = self.assistants.first().cloned() {
                    self.selected_assistant = Some(first);
                    self.filter_users();
                }
            }
        }
    }

    /// Clears selections and the radius so both rosters show in full.
    pub fn show_all(&mut self) {
        self.radius_km = 0.0;
        self.selected_user = None;
        self.selected_assistant = None;
        self.reset_users();
        self.reset_assistants();
    }

    pub fn status(&self) -> FilterStatus {
        let (selection, count) = match self.mode {
            CenterMode::User => (&self.selected_user, self.filtered_assistant_count()),
            CenterMode::Assistant => (&self.selected_assistant, self.filtered_user_count()),
        };
        if selection.is_none() || self.radius_km <= 0.0 {
            FilterStatus::All { count }
        } else {
            FilterStatus::Within {
                radius_km: self.radius_km,
                count,
            }
        }
    }

    pub fn mode(&self) -> CenterMode {
        self.mode
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn users(&self) -> &[Person] {
        &self.users
    }

    pub fn assistants(&self) -> &[Person] {
        &self.assistants
    }

    pub fn selected_user(&self) -> Option<&Person> {
        self.selected_user.as_ref()
    }

    pub fn selected_assistant(&self) -> Option<&Person> {
        self.selected_assistant.as_ref()
    }

    /// The selection the current mode filters around, if any.
    pub fn center(&self) -> Option<&Person> {
        match self.mode {
            CenterMode::User => self.selected_user.as_ref(),
            CenterMode::Assistant => self.selected_assistant.as_ref(),
        }
    }

    pub fn filtered_users(&self) -> Vec<&Person> {
        visible(&self.users, self.filtered_users.as_deref())
    }

    pub fn filtered_assistants(&self) -> Vec<&Person> {
        visible(&self.assistants, self.filtered_assistants.as_deref())
    }

    /// Distance-annotated view of the filtered side, when a center is set.
    pub fn ranked(&self) -> Option<&[RankedPerson]> {
        match self.mode {
            CenterMode::User => self.filtered_assistants.as_deref(),
            CenterMode::Assistant => self.filtered_users.as_deref(),
        }
    }

    pub fn users_in_radius(&self) -> usize {
        self.users_in_radius
    }

    pub fn assistants_in_radius(&self) -> usize {
        self.assistants_in_radius
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    fn filtered_user_count(&self) -> usize {
        self.filtered_users
            .as_ref()
            .map_or(self.users.len(), Vec::len)
    }

    fn filtered_assistant_count(&self) -> usize {
        self.filtered_assistants
            .as_ref()
            .map_or(self.assistants.len(), Vec::len)
    }

    fn reset_users(&mut self) {
        self.filtered_users = None;
        self.users_in_radius = self.users.len();
    }

    fn reset_assistants(&mut self) {
        self.filtered_assistants = None;
        self.assistants_in_radius = self.assistants.len();
    }

    fn filter_assistants(&mut self) {
        let Some(center) = self.selected_user.as_ref() else {
            self.reset_assistants();
            return;
        };
        let ranked = filter_by_radius(center, &self.assistants, self.radius_km);
        self.logger
            .record_filter(center, self.radius_km, ranked.len(), self.assistants.len());
        self.metrics
            .record_filter(self.assistants.len(), ranked.len());
        self.assistants_in_radius = ranked.len();
        self.filtered_assistants = Some(ranked);
        self.users_in_radius = 1;
    }

    fn filter_users(&mut self) {
        let Some(center) = self.selected_assistant.as_ref() else {
            self.reset_users();
            return;
        };
        let ranked = filter_by_radius(center, &self.users, self.radius_km);
        self.logger
            .record_filter(center, self.radius_km, ranked.len(), self.users.len());
        self.metrics.record_filter(self.users.len(), ranked.len());
        self.users_in_radius = ranked.len();
        self.filtered_users = Some(ranked);
        self.assistants_in_radius = 1;
    }
}

impl Default for MatchSession {
    fn default() -> Self {
        Self::new()
    }
}

fn find(roster: &[Person], id: u32) -> CoreResult<Person> {
    roster
        .iter()
        .find(|person| person.id == id)
        .cloned()
        .ok_or(CoreError::PersonNotFound(id))
}

fn visible<'a>(roster: &'a [Person], ranked: Option<&'a [RankedPerson]>) -> Vec<&'a Person> {
    match ranked {
        Some(entries) => entries.iter().map(|entry| &entry.person).collect(),
        None => roster.iter().collect(),
    }
}

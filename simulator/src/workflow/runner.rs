use crate::generator::fixture::dobong_roster;
use crate::generator::scatter::build_roster;
use crate::workflow::config::WorkflowConfig;
use crate::workflow::dataset::Roster;
use anyhow::Context;
use lmpcore::matching::{FilterStatus, MatchSession};
use lmpcore::model::{Person, RankedPerson};
use lmpcore::telemetry::Metrics;

pub struct WorkflowResult {
    pub center: Option<Person>,
    pub status: FilterStatus,
    pub matches: Vec<RankedPerson>,
    pub users_in_radius: usize,
    pub assistants_in_radius: usize,
    pub metrics: Metrics,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Resolves the roster: explicit dataset, then synthetic, then fixture.
    pub fn roster(&self) -> anyhow::Result<Roster> {
        if let Some(path) = &self.config.dataset {
            return Roster::load(path);
        }
        if let Some(generator) = &self.config.synthetic {
            return build_roster(generator).context("generating synthetic roster");
        }
        Ok(dobong_roster())
    }

    /// Builds a session with the configured mode, center and radius applied.
    pub fn session(&self, roster: &Roster) -> anyhow::Result<MatchSession> {
        let mut session = MatchSession::new();
        session.load(roster.users.clone(), roster.assistants.clone());
        if session.mode() != self.config.center_mode {
            session.toggle_center_mode();
        }
        if let Some(id) = self.config.center_id {
            session
                .select_center(id)
                .with_context(|| format!("selecting center {}", id))?;
        }
        session.change_radius(self.config.radius_km);
        Ok(session)
    }

    pub fn execute(&self, roster: &Roster) -> anyhow::Result<WorkflowResult> {
        let session = self.session(roster).context("preparing match session")?;
        Ok(summarize(&session))
    }
}

pub fn summarize(session: &MatchSession) -> WorkflowResult {
    WorkflowResult {
        center: session.center().cloned(),
        status: session.status(),
        matches: session.ranked().map(<[RankedPerson]>::to_vec).unwrap_or_default(),
        users_in_radius: session.users_in_radius(),
        assistants_in_radius: session.assistants_in_radius(),
        metrics: session.metrics(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lmpcore::matching::CenterMode;
    use lmpcore::model::PersonType;

    #[test]
    fn runner_executes_user_centered_workflow() {
        let cfg = WorkflowConfig::from_args(1.0, CenterMode::User, Some(1));
        let runner = Runner::new(cfg);
        let roster = runner.roster().unwrap();
        let result = runner.execute(&roster).unwrap();

        assert_eq!(result.center.as_ref().map(|p| p.id), Some(1));
        assert!(!result.matches.is_empty());
        assert!(result
            .matches
            .iter()
            .all(|m| m.person.kind == PersonType::Assistant && m.distance_km <= 1.0));
        assert!(result
            .matches
            .windows(2)
            .all(|pair| pair[0].distance_km <= pair[1].distance_km));
        assert_eq!(result.assistants_in_radius, result.matches.len());
        assert_eq!(result.users_in_radius, 1);
        assert!(result.metrics.filters_run >= 1);
    }

    #[test]
    fn runner_defaults_to_first_center_of_the_mode() {
        let cfg = WorkflowConfig::from_args(3.0, CenterMode::Assistant, None);
        let runner = Runner::new(cfg);
        let roster = runner.roster().unwrap();
        let result = runner.execute(&roster).unwrap();
        assert_eq!(result.center.map(|p| p.id), Some(11));
        assert!(result.matches.iter().all(|m| m.person.kind == PersonType::User));
        assert_eq!(
            result.status,
            FilterStatus::Within {
                radius_km: 3.0,
                count: result.matches.len()
            }
        );
    }

    #[test]
    fn runner_rejects_center_from_the_wrong_roster() {
        let cfg = WorkflowConfig::from_args(3.0, CenterMode::User, Some(11));
        let runner = Runner::new(cfg);
        let roster = runner.roster().unwrap();
        let err = runner.execute(&roster).err().unwrap();
        assert!(format!("{:#}", err).contains("person 11 not found"));
    }

    #[test]
    fn runner_uses_synthetic_roster_when_configured() {
        let mut cfg = WorkflowConfig::default();
        cfg.synthetic = Some(crate::generator::scatter::GeneratorConfig {
            users: 2,
            assistants: 5,
            ..Default::default()
        });
        let roster = Runner::new(cfg).roster().unwrap();
        assert_eq!(roster.len(), 7);
    }
}

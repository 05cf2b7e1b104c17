use anyhow::{bail, Context};
use lmpcore::directory::{MemoryDirectory, PersonDirectory};
use lmpcore::model::{Person, PersonType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Both rosters as stored in a JSON backup file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub users: Vec<Person>,
    #[serde(default)]
    pub assistants: Vec<Person>,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.users.len() + self.assistants.len()
    }

    /// Reads and validates a roster backup.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dataset {}", path_ref.display()))?;
        let roster: Roster = serde_json::from_str(&contents)
            .with_context(|| format!("parsing dataset {}", path_ref.display()))?;
        roster
            .validate()
            .with_context(|| format!("validating dataset {}", path_ref.display()))?;
        log::info!(
            "loaded {} users, {} assistants from {}",
            roster.users.len(),
            roster.assistants.len(),
            path_ref.display()
        );
        Ok(roster)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(self).context("serializing dataset")?;
        fs::write(path_ref, json)
            .with_context(|| format!("writing dataset {}", path_ref.display()))?;
        log::info!("exported {} persons to {}", self.len(), path_ref.display());
        Ok(())
    }

    /// Every person must be valid, sit in the section matching its kind, and
    /// carry an id unique across both sections.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        let sections = [
            (PersonType::User, &self.users),
            (PersonType::Assistant, &self.assistants),
        ];
        for (kind, persons) in sections {
            for person in persons.iter() {
                person.validate()?;
                if person.kind != kind {
                    bail!(
                        "person {} is a {} but listed under {}s",
                        person.id,
                        person.kind,
                        kind
                    );
                }
                if !seen.insert(person.id) {
                    bail!("duplicate person id {}", person.id);
                }
            }
        }
        Ok(())
    }

    pub fn from_directory(directory: &impl PersonDirectory) -> Self {
        Self {
            users: directory.users(),
            assistants: directory.assistants(),
        }
    }

    pub fn into_directory(self) -> anyhow::Result<MemoryDirectory> {
        let directory = MemoryDirectory::with_persons(self.users.into_iter().chain(self.assistants))
            .context("building directory from roster")?;
        Ok(directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fixture::dobong_roster;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_preserves_roster() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup/roster.json");
        let roster = dobong_roster();
        roster.save(&path).unwrap();
        let restored = Roster::load(&path).unwrap();
        assert_eq!(restored.len(), roster.len());
        for (before, after) in roster
            .users
            .iter()
            .chain(&roster.assistants)
            .zip(restored.users.iter().chain(&restored.assistants))
        {
            assert_eq!(before.id, after.id);
            assert_eq!(before.name, after.name);
            assert_eq!(before.experience_years, after.experience_years);
            assert!((before.latitude - after.latitude).abs() < 1e-12);
            assert!((before.longitude - after.longitude).abs() < 1e-12);
        }
    }

    #[test]
    fn load_rejects_misfiled_person() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(
            &path,
            r#"{"users":[{"id":1,"name":"김지원","kind":"assistant","latitude":37.67,
                "longitude":127.05,"address":"서울 도봉구"}]}"#,
        )
        .unwrap();
        let err = Roster::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("listed under users"));
    }

    #[test]
    fn validate_rejects_duplicate_ids_across_sections() {
        let mut roster = dobong_roster();
        let mut clash = roster.assistants[0].clone();
        clash.id = roster.users[0].id;
        roster.assistants.push(clash);
        let err = roster.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate person id 1"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Roster::load("/nonexistent/roster.json").unwrap_err();
        assert!(err.to_string().starts_with("reading dataset"));
    }

    #[test]
    fn directory_round_trip_keeps_sections() {
        let roster = dobong_roster();
        let directory = roster.clone().into_directory().unwrap();
        assert_eq!(directory.len(), roster.len());
        assert_eq!(Roster::from_directory(&directory), roster);
    }
}

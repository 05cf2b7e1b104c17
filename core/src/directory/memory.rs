use super::PersonDirectory;
use crate::model::Person;
use crate::prelude::{CoreError, CoreResult};
use crate::telemetry::LogManager;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory directory for the offline driver and tests.
#[derive(Clone)]
pub struct MemoryDirectory {
    persons: Arc<Mutex<BTreeMap<u32, Person>>>,
    logger: Arc<LogManager>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            persons: Arc::new(Mutex::new(BTreeMap::new())),
            logger: Arc::new(LogManager::new("directory")),
        }
    }

    /// Builds a directory from an existing roster, validating every entry.
    pub fn with_persons(persons: impl IntoIterator<Item = Person>) -> CoreResult<Self> {
        let directory = Self::new();
        for person in persons {
            directory.create(person)?;
        }
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.persons().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every write is a single map operation, so a poisoned map is still whole.
    fn persons(&self) -> MutexGuard<'_, BTreeMap<u32, Person>> {
        self.persons.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonDirectory for MemoryDirectory {
    fn list(&self) -> Vec<Person> {
        self.persons().values().cloned().collect()
    }

    fn get(&self, id: u32) -> Option<Person> {
        self.persons().get(&id).cloned()
    }

    fn create(&self, mut person: Person) -> CoreResult<Person> {
        let mut persons = self.persons();
        if person.id == 0 {
            person.id = match persons.keys().next_back() {
                Some(last) => last.checked_add(1).ok_or(CoreError::IdsExhausted)?,
                None => 1,
            };
        }
        person.validate()?;
        if persons.contains_key(&person.id) {
            return Err(CoreError::DuplicateId(person.id));
        }
        persons.insert(person.id, person.clone());
        self.logger
            .trace(&format!("created {} {} ({})", person.kind, person.id, person.name));
        Ok(person)
    }

    fn update(&self, person: Person) -> CoreResult<Person> {
        person.validate()?;
        let mut persons = self.persons();
        let slot = persons
            .get_mut(&person.id)
            .ok_or(CoreError::PersonNotFound(person.id))?;
        *slot = person.clone();
        self.logger.trace(&format!("updated {}", person.id));
        Ok(person)
    }

    fn upsert(&self, person: Person) -> CoreResult<Person> {
        if person.id != 0 && self.get(person.id).is_some() {
            self.update(person)
        } else {
            self.create(person)
        }
    }

    fn delete(&self, id: u32) -> bool {
        let removed = self.persons().remove(&id).is_some();
        if removed {
            self.logger.trace(&format!("deleted {}", id));
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonType;

    fn person(id: u32, kind: PersonType) -> Person {
        Person::new(id, format!("p{id}"), kind, 37.66, 127.04, "서울 도봉구")
    }

    #[test]
    fn create_assigns_next_id_when_zero() {
        let directory = MemoryDirectory::new();
        assert_eq!(directory.create(person(0, PersonType::User)).unwrap().id, 1);
        directory.create(person(10, PersonType::User)).unwrap();
        assert_eq!(directory.create(person(0, PersonType::User)).unwrap().id, 11);
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn create_reports_exhausted_ids_and_stays_usable() {
        let directory = MemoryDirectory::new();
        directory.create(person(u32::MAX, PersonType::User)).unwrap();
        assert_eq!(
            directory.create(person(0, PersonType::Assistant)),
            Err(CoreError::IdsExhausted)
        );

        directory.create(person(7, PersonType::Assistant)).unwrap();
        assert_eq!(directory.len(), 2);
        assert!(directory.get(u32::MAX).is_some());
    }

    #[test]
    fn create_rejects_duplicates_and_invalid_persons() {
        let directory = MemoryDirectory::with_persons(vec![person(1, PersonType::User)]).unwrap();
        assert_eq!(
            directory.create(person(1, PersonType::Assistant)),
            Err(CoreError::DuplicateId(1))
        );

        let mut invalid = person(2, PersonType::User);
        invalid.latitude = 120.0;
        assert!(matches!(
            directory.create(invalid),
            Err(CoreError::InvalidPerson { id: 2, .. })
        ));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn listings_split_by_kind_in_id_order() {
        let directory = MemoryDirectory::with_persons(vec![
            person(12, PersonType::Assistant),
            person(2, PersonType::User),
            person(11, PersonType::Assistant),
            person(1, PersonType::User),
        ])
        .unwrap();

        let ids = |persons: Vec<Person>| persons.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(directory.list()), vec![1, 2, 11, 12]);
        assert_eq!(ids(directory.users()), vec![1, 2]);
        assert_eq!(ids(directory.assistants()), vec![11, 12]);
    }

    #[test]
    fn update_requires_existing_id() {
        let directory = MemoryDirectory::new();
        assert_eq!(
            directory.update(person(5, PersonType::User)),
            Err(CoreError::PersonNotFound(5))
        );

        directory.create(person(5, PersonType::User)).unwrap();
        let mut renamed = person(5, PersonType::User);
        renamed.name = "이철수".into();
        directory.update(renamed).unwrap();
        assert_eq!(directory.get(5).unwrap().name, "이철수");
    }

    #[test]
    fn upsert_inserts_then_replaces() {
        let directory = MemoryDirectory::new();
        directory.upsert(person(3, PersonType::Assistant)).unwrap();
        let mut moved = person(3, PersonType::Assistant);
        moved.address = "서울 노원구".into();
        directory.upsert(moved).unwrap();
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get(3).unwrap().address, "서울 노원구");
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let directory = MemoryDirectory::with_persons(vec![person(1, PersonType::User)]).unwrap();
        assert!(directory.delete(1));
        assert!(!directory.delete(1));
        assert!(directory.is_empty());
    }
}

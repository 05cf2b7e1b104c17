//! Person storage behind a small CRUD trait.

pub mod memory;

pub use memory::MemoryDirectory;

use crate::model::{Person, PersonType};
use crate::prelude::CoreResult;

/// CRUD access to the person roster. Listings are ordered by id.
pub trait PersonDirectory {
    fn list(&self) -> Vec<Person>;

    fn list_kind(&self, kind: PersonType) -> Vec<Person> {
        self.list()
            .into_iter()
            .filter(|person| person.kind == kind)
            .collect()
    }

    fn users(&self) -> Vec<Person> {
        self.list_kind(PersonType::User)
    }

    fn assistants(&self) -> Vec<Person> {
        self.list_kind(PersonType::Assistant)
    }

    fn get(&self, id: u32) -> Option<Person>;

    /// Stores a new person. An id of 0 asks the directory to assign one.
    fn create(&self, person: Person) -> CoreResult<Person>;

    fn update(&self, person: Person) -> CoreResult<Person>;

    fn upsert(&self, person: Person) -> CoreResult<Person>;

    fn delete(&self, id: u32) -> bool;
}

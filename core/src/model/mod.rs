pub mod person;
pub mod ranked;

pub use person::{Gender, Person, PersonType};
pub use ranked::RankedPerson;

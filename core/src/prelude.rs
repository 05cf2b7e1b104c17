pub use crate::geo::{distance_km, GeoPoint};
pub use crate::model::{Gender, Person, PersonType, RankedPerson};

/// Common error type for the matching core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid person {id}: {reason}")]
    InvalidPerson { id: u32, reason: String },
    #[error("person {0} not found")]
    PersonNotFound(u32),
    #[error("duplicate person id {0}")]
    DuplicateId(u32),
    #[error("no person ids left to assign")]
    IdsExhausted,
}

pub type CoreResult<T> = Result<T, CoreError>;

use crate::model::{Person, PersonType};
use serde::{Deserialize, Serialize};

/// Roster filter by kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    User,
    Assistant,
}

impl TypeFilter {
    pub fn accepts(self, kind: PersonType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::User => kind == PersonType::User,
            TypeFilter::Assistant => kind == PersonType::Assistant,
        }
    }
}

/// Case-insensitive substring search over name and address.
///
/// Blank text matches every person that passes `type_filter`.
pub fn search<'a>(persons: &'a [Person], type_filter: TypeFilter, text: &str) -> Vec<&'a Person> {
    let needle = text.trim().to_lowercase();
    persons
        .iter()
        .filter(|person| type_filter.accepts(person.kind))
        .filter(|person| {
            needle.is_empty()
                || person.name.to_lowercase().contains(&needle)
                || person.address.to_lowercase().contains(&needle)
        })
        .collect()
}

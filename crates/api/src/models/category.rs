//! Product category types.

use serde::Serialize;

/// A product category as exposed to clients.
///
/// `slug` is the stable identifier; products refer to it by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// A category to be inserted by the seed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl From<NewCategory> for Category {
    fn from(new: NewCategory) -> Self {
        Self {
            name: new.name,
            slug: new.slug,
            description: new.description,
            icon: new.icon,
        }
    }
}

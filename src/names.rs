//! Canonical name records
//!
//! The entity kinds that carry a canonical name (suppliers, materials,
//! products) and the records passed between the registry and the matcher.

use crate::error::PetalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of record a canonical name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameKind {
    Supplier,
    Material,
    Product,
}

impl NameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Supplier => "supplier",
            NameKind::Material => "material",
            NameKind::Product => "product",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameKind {
    type Err = PetalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supplier" | "suppliers" => Ok(NameKind::Supplier),
            "material" | "materials" => Ok(NameKind::Material),
            "product" | "products" => Ok(NameKind::Product),
            other => Err(PetalError::UnknownKind(other.to_string())),
        }
    }
}

/// An existing named record, read-only to the matcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalNameEntry {
    pub id: String,
    pub name: String,
}

impl CanonicalNameEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A typed name together with the existing names it might duplicate.
///
/// Built per save attempt and dropped once the user has picked a
/// [`Resolution`](crate::resolution::Resolution).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCandidate {
    pub input_name: String,
    pub similar_items: Vec<CanonicalNameEntry>,
}

impl DuplicateCandidate {
    pub fn has_duplicates(&self) -> bool {
        !self.similar_items.is_empty()
    }

    pub fn find_item(&self, id: &str) -> Option<&CanonicalNameEntry> {
        self.similar_items.iter().find(|item| item.id == id)
    }
}

//! Duplicate Resolution
//!
//! The confirmation step that follows a duplicate warning. The user's
//! choice is passed in explicitly and folded into an [`Outcome`] the
//! caller can persist.

use crate::error::{PetalError, PetalResult};
use crate::names::{CanonicalNameEntry, DuplicateCandidate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// What the user chose when shown similar names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "choice", content = "id")]
pub enum Resolution {
    /// Save the name exactly as typed
    KeepTyped,
    /// Replace the typed name with one of the offered entries
    UseExisting(String),
    /// Abort the enclosing save
    Cancel,
}

/// Result of applying a [`Resolution`] to a [`DuplicateCandidate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Persist a new canonical name
    Create(String),
    /// Reuse an existing canonical name
    Reuse(CanonicalNameEntry),
    /// Nothing to persist
    Aborted,
}

impl Outcome {
    /// Name the caller ends up storing, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Outcome::Create(name) => Some(name),
            Outcome::Reuse(entry) => Some(&entry.name),
            Outcome::Aborted => None,
        }
    }
}

/// Fold the user's choice into an outcome.
///
/// `UseExisting` must point at one of the offered similar names.
pub fn resolve(candidate: &DuplicateCandidate, resolution: Resolution) -> PetalResult<Outcome> {
    let outcome = match resolution {
        Resolution::Cancel => Outcome::Aborted,
        Resolution::KeepTyped => {
            let name = candidate.input_name.trim();
            if name.is_empty() {
                return Err(PetalError::EmptyName);
            }
            Outcome::Create(name.to_string())
        }
        Resolution::UseExisting(id) => match candidate.find_item(&id) {
            Some(entry) => Outcome::Reuse(entry.clone()),
            None => return Err(PetalError::UnknownSelection(id)),
        },
    };

    info!(
        "Resolved '{}' ({} similar): {:?}",
        candidate.input_name,
        candidate.similar_items.len(),
        outcome
    );
    Ok(outcome)
}

/// Resolution to use when no choice was supplied: names without
/// duplicates are saved as typed, anything else is cancelled.
pub fn default_resolution(candidate: &DuplicateCandidate) -> Resolution {
    if candidate.has_duplicates() {
        Resolution::Cancel
    } else {
        Resolution::KeepTyped
    }
}

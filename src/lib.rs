//! Petalbook Library
//!
//! Duplicate-name guard for the flower-shop back office: fuzzy matching of
//! newly typed supplier, material and product names against the canonical
//! names already on record.

pub mod audit;
pub mod config;
pub mod error;
pub mod matcher;
pub mod names;
pub mod registry;
pub mod resolution;

pub use error::{PetalError, PetalResult};
pub use matcher::{find_duplicates, find_similar, similarity, SimilarName};
pub use names::{CanonicalNameEntry, DuplicateCandidate, NameKind};
pub use registry::NameRegistry;
pub use resolution::{resolve, Outcome, Resolution};

//! Canonical name registry
//!
//! SQLite store of supplier, material and product names. Names can be
//! global (headquarters) or scoped to a single branch.

use crate::error::{PetalError, PetalResult};
use crate::matcher::{find_duplicates, find_same_name};
use crate::names::{CanonicalNameEntry, DuplicateCandidate, NameKind};
use crate::resolution::Outcome;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stored value of the branch column for global names
const GLOBAL_BRANCH: &str = "";

pub struct NameRegistry {
    db_path: PathBuf,
}

impl NameRegistry {
    /// Open (and create if needed) the registry database at `db_path`
    pub fn open(db_path: impl AsRef<Path>) -> PetalResult<Self> {
        let registry = Self {
            db_path: db_path.as_ref().to_path_buf(),
        };
        registry.init_db()?;
        Ok(registry)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> PetalResult<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    fn init_db(&self) -> PetalResult<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS canonical_names (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                branch TEXT NOT NULL DEFAULT '',
                name TEXT NOT NULL,
                UNIQUE (kind, branch, name)
            )",
            [],
        )?;
        debug!("Name registry ready at {:?}", self.db_path);
        Ok(())
    }

    /// Names visible for `kind`.
    ///
    /// With a branch: global names plus that branch's own. Without one:
    /// every name of the kind.
    pub fn list(&self, kind: NameKind, branch: Option<&str>) -> PetalResult<Vec<CanonicalNameEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, name FROM canonical_names
             WHERE kind = ?1 AND (?2 IS NULL OR branch = '' OR branch = ?2)
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![kind.as_str(), branch], |row| {
            Ok(CanonicalNameEntry {
                id: row.get::<_, i64>(0)?.to_string(),
                name: row.get(1)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Store a canonical name. Storing the same name twice returns the
    /// existing row.
    pub fn insert(
        &self,
        kind: NameKind,
        branch: Option<&str>,
        name: &str,
    ) -> PetalResult<CanonicalNameEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PetalError::EmptyName);
        }
        let branch = branch.unwrap_or(GLOBAL_BRANCH);

        let conn = self.connect()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO canonical_names (kind, branch, name) VALUES (?1, ?2, ?3)",
            params![kind.as_str(), branch, name],
        )?;
        let id: i64 = conn.query_row(
            "SELECT id FROM canonical_names WHERE kind = ?1 AND branch = ?2 AND name = ?3",
            params![kind.as_str(), branch, name],
            |row| row.get(0),
        )?;

        if inserted > 0 {
            info!("➕ Added {} '{}' (id {})", kind, name, id);
        }
        Ok(CanonicalNameEntry::new(id.to_string(), name))
    }

    pub fn get(&self, id: &str) -> PetalResult<CanonicalNameEntry> {
        let row_id = parse_id(id)?;
        let conn = self.connect()?;
        let name: Option<String> = conn
            .query_row(
                "SELECT name FROM canonical_names WHERE id = ?1",
                [row_id],
                |row| row.get(0),
            )
            .optional()?;
        name.map(|name| CanonicalNameEntry::new(id, name))
            .ok_or_else(|| PetalError::NotFound(id.to_string()))
    }

    pub fn remove(&self, id: &str) -> PetalResult<()> {
        let row_id = parse_id(id)?;
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM canonical_names WHERE id = ?1", [row_id])?;
        if removed == 0 {
            return Err(PetalError::NotFound(id.to_string()));
        }
        info!("➖ Removed canonical name {}", id);
        Ok(())
    }

    /// Check whether this exact spelling is already stored
    pub fn exists(&self, kind: NameKind, branch: Option<&str>, name: &str) -> PetalResult<bool> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT 1 FROM canonical_names
             WHERE kind = ?1 AND (?2 IS NULL OR branch = '' OR branch = ?2) AND name = ?3
             LIMIT 1",
        )?;
        Ok(stmt.exists(params![kind.as_str(), branch, name.trim()])?)
    }

    /// Compare a typed name against every name visible to `branch`
    pub fn check(
        &self,
        kind: NameKind,
        branch: Option<&str>,
        candidate: &str,
    ) -> PetalResult<DuplicateCandidate> {
        let existing = self.list(kind, branch)?;
        Ok(find_duplicates(candidate, &existing))
    }

    /// Stored name equal to `name` once whitespace and case are ignored
    pub fn find_same_name(
        &self,
        kind: NameKind,
        branch: Option<&str>,
        name: &str,
    ) -> PetalResult<Option<CanonicalNameEntry>> {
        let existing = self.list(kind, branch)?;
        Ok(find_same_name(name, &existing).cloned())
    }

    /// Persist a resolved outcome and return the name record the caller
    /// should use, if any.
    ///
    /// Creating a name already stored under another spacing or case
    /// returns the stored entry instead of adding a second record.
    pub fn commit(
        &self,
        kind: NameKind,
        branch: Option<&str>,
        outcome: &Outcome,
    ) -> PetalResult<Option<CanonicalNameEntry>> {
        match outcome {
            Outcome::Create(name) => match self.find_same_name(kind, branch, name)? {
                Some(entry) => {
                    info!("'{}' is already stored as '{}' (id {})", name, entry.name, entry.id);
                    Ok(Some(entry))
                }
                None => self.insert(kind, branch, name).map(Some),
            },
            Outcome::Reuse(entry) => Ok(Some(entry.clone())),
            Outcome::Aborted => Ok(None),
        }
    }
}

fn parse_id(id: &str) -> PetalResult<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| PetalError::NotFound(id.to_string()))
}

use crate::error::PetalResult;
use crate::names::{DuplicateCandidate, NameKind};
use crate::resolution::Outcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Write an entry to `audit.log` under `log_dir`
pub fn log(log_dir: &Path, entry: &str) -> PetalResult<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_path = log_dir.join("audit.log");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        entry
    )?;
    Ok(())
}

/// Record how a duplicate warning was resolved
pub fn log_resolution(
    log_dir: &Path,
    kind: NameKind,
    branch: Option<&str>,
    candidate: &DuplicateCandidate,
    outcome: &Outcome,
) -> PetalResult<()> {
    let similar: Vec<&str> = candidate
        .similar_items
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    let decision = match outcome {
        Outcome::Create(name) => format!("CREATE '{}'", name),
        Outcome::Reuse(entry) => format!("REUSE '{}' (id {})", entry.name, entry.id),
        Outcome::Aborted => "CANCEL".to_string(),
    };

    log(
        log_dir,
        &format!(
            "[{}@{}] TYPED: '{}' | SIMILAR: [{}] | DECISION: {}",
            kind,
            branch.unwrap_or("hq"),
            candidate.input_name,
            similar.join(", "),
            decision
        ),
    )
}

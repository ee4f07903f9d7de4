//! Petalbook - duplicate-name guard for flower-shop records
//!
//! Checks a typed supplier, material or product name against the names
//! already on record before saving it.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use petalbook::config::Config;
use petalbook::matcher::{find_similar, MAX_SIMILAR_RESULTS};
use petalbook::resolution::default_resolution;
use petalbook::{audit, resolve, NameKind, NameRegistry, Outcome, Resolution};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Registry database (overrides config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file (defaults to the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show existing names similar to NAME
    Check {
        kind: NameKind,
        name: String,
        #[arg(short, long)]
        branch: Option<String>,
    },
    /// Save NAME, asking for a decision when similar names exist
    Add {
        kind: NameKind,
        name: String,
        #[arg(short, long)]
        branch: Option<String>,
        /// Save the name as typed even if similar names exist
        #[arg(long, conflicts_with = "use_id")]
        keep: bool,
        /// Reuse the existing name with this id instead
        #[arg(long = "use", value_name = "ID")]
        use_id: Option<String>,
    },
    /// List names of a kind
    List {
        kind: NameKind,
        #[arg(short, long)]
        branch: Option<String>,
    },
    /// Remove a name by id
    Remove { id: String },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config warnings are reported before the configured level is known
    let bootstrap = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    let config = tracing::subscriber::with_default(bootstrap, || match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    })?;

    // Setup logging
    let configured_level = config.tracing_level();
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured_level.as_ref().map_or(Level::INFO, |l| *l)
    };
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = &configured_level {
        warn!("⚠️ {}, using INFO", e);
    }

    debug!("🌸 Petalbook v{} starting...", env!("CARGO_PKG_VERSION"));

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.db_path));
    let registry = NameRegistry::open(&db_path)?;

    match args.command {
        Cmd::Check { kind, name, branch } => {
            let branch = branch.or_else(|| config.default_branch.clone());
            let existing = registry.list(kind, branch.as_deref())?;
            let matches = find_similar(&name, &existing);
            if matches.is_empty() {
                println!("No similar {} names for '{}'", kind, name);
            }
            for m in matches.into_iter().take(MAX_SIMILAR_RESULTS) {
                println!("{:>6}  {:.2}  {}", m.entry.id, m.score, m.entry.name);
            }
        }
        Cmd::Add {
            kind,
            name,
            branch,
            keep,
            use_id,
        } => {
            let branch = branch.or_else(|| config.default_branch.clone());
            let audit_dir = config
                .audit_enabled
                .then(|| PathBuf::from(&config.audit_dir));
            add_name(
                &registry,
                kind,
                branch.as_deref(),
                &name,
                keep,
                use_id,
                audit_dir.as_deref(),
            )?;
        }
        Cmd::List { kind, branch } => {
            let branch = branch.or_else(|| config.default_branch.clone());
            for entry in registry.list(kind, branch.as_deref())? {
                println!("{:>6}  {}", entry.id, entry.name);
            }
        }
        Cmd::Remove { id } => {
            registry.remove(&id)?;
            println!("Removed {}", id);
        }
    }

    Ok(())
}

fn add_name(
    registry: &NameRegistry,
    kind: NameKind,
    branch: Option<&str>,
    name: &str,
    keep: bool,
    use_id: Option<String>,
    audit_dir: Option<&Path>,
) -> Result<()> {
    let candidate = registry.check(kind, branch, name)?;

    // Same name modulo spacing and case is a reuse, whatever was asked
    let outcome = match registry.find_same_name(kind, branch, name)? {
        Some(entry) => Outcome::Reuse(entry),
        None => {
            if candidate.has_duplicates() {
                println!("Similar {} names already exist:", kind);
                for item in &candidate.similar_items {
                    println!("{:>6}  {}", item.id, item.name);
                }
            }

            let resolution = match (use_id, keep) {
                (Some(id), _) => Resolution::UseExisting(id),
                (None, true) => Resolution::KeepTyped,
                (None, false) => default_resolution(&candidate),
            };
            resolve(&candidate, resolution)?
        }
    };

    let saved = registry.commit(kind, branch, &outcome)?;

    if let Some(dir) = audit_dir {
        if let Err(e) = audit::log_resolution(dir, kind, branch, &candidate, &outcome) {
            warn!("Could not write audit log: {}", e);
        }
    }

    match saved {
        Some(entry) => {
            if matches!(outcome, Outcome::Reuse(_)) {
                info!("Reusing existing {} '{}'", kind, entry.name);
            }
            println!("{:>6}  {}", entry.id, entry.name);
            Ok(())
        }
        None => bail!("Save cancelled: pass --keep to save as typed or --use ID to reuse a name"),
    }
}

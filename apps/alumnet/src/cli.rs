//! # CLI Module
//!
//! Command-line interface for Alumnet.
//!
//! Every subcommand is backed by a public `cmd_*` function so the commands
//! can be driven directly from integration tests.

use crate::error::{CliError, CliResult};
use alumnet_core::directory::{companies, search};
use alumnet_core::formats::{export_ledger, import_ledger};
use alumnet_core::{
    AchievementProfile, College, CollegeCatalog, ConnectionLedger, CriteriaEvaluator,
    CriteriaReport, Directory, DirectoryQuery, LedgerStore, Notice, RedbLedger, StaticDirectory,
    TargetId, attempt_connect,
};
use alumnet_core::primitives::MAX_SUGGESTIONS;
use clap::{Args, Parser, Subcommand};
use fs4::fs_std::FileExt;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Listings bundled with the binary, used when no `--directory` is given.
const SAMPLE_DIRECTORY: &str = include_str!("../data/alumni.json");

/// Standing of the sample student when no profile is supplied.
pub const DEFAULT_ACTOR: AchievementProfile = AchievementProfile::new(450, 1650, 6, 280);

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Alumnet - gate alumni connections on coding achievements.
#[derive(Debug, Parser)]
#[command(name = "alumnet", version, about)]
pub struct Cli {
    /// Directory JSON file (array of listings). Defaults to the bundled sample.
    #[arg(long, global = true, env = "ALUMNET_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Ledger location.
    #[arg(long, global = true, env = "ALUMNET_LEDGER", default_value = "alumnet.ledger")]
    pub ledger: PathBuf,

    /// Ledger backend: "file" (binary snapshot) or "redb".
    #[arg(long, global = true, env = "ALUMNET_BACKEND", default_value = "file")]
    pub backend: String,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub actor: ProfileArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// The acting student's achievement profile.
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// JSON profile file; overrides the individual flags.
    #[arg(long, global = true, env = "ALUMNET_PROFILE")]
    pub profile: Option<PathBuf>,

    /// GitHub contributions.
    #[arg(long, global = true, default_value_t = DEFAULT_ACTOR.github_contributions)]
    pub github: u32,

    /// CodeChef rating.
    #[arg(long, global = true, default_value_t = DEFAULT_ACTOR.codechef_rating)]
    pub codechef: u32,

    /// Completed projects.
    #[arg(long, global = true, default_value_t = DEFAULT_ACTOR.projects)]
    pub projects: u32,

    /// LeetCode problems solved.
    #[arg(long, global = true, default_value_t = DEFAULT_ACTOR.leetcode_solved)]
    pub leetcode: u32,
}

impl Default for ProfileArgs {
    fn default() -> Self {
        Self {
            profile: None,
            github: DEFAULT_ACTOR.github_contributions,
            codechef: DEFAULT_ACTOR.codechef_rating,
            projects: DEFAULT_ACTOR.projects,
            leetcode: DEFAULT_ACTOR.leetcode_solved,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty ledger.
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Search listings by name, company, college or expertise.
    Search {
        #[arg(long, short)]
        query: Option<String>,
        /// Exact company name.
        #[arg(long, short)]
        company: Option<String>,
    },
    /// List distinct companies.
    Companies,
    /// Show per-dimension progress toward a listing's criteria.
    Progress {
        #[arg(long, short)]
        target: String,
    },
    /// Send a connection request.
    Connect {
        #[arg(long, short)]
        target: String,
    },
    /// Show requested connections.
    Status,
    /// Suggest colleges from a catalog dump.
    Colleges {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long, short)]
        query: String,
        #[arg(long, default_value_t = MAX_SUGGESTIONS)]
        limit: usize,
    },
}

// =============================================================================
// BACKENDS
// =============================================================================

/// Ledger backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    File,
    Redb,
}

impl FromStr for Backend {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Backend::File),
            "redb" => Ok(Backend::Redb),
            other => Err(CliError::UnknownBackend(other.to_string())),
        }
    }
}

/// An opened ledger of either backend.
pub enum LedgerHandle {
    File {
        path: PathBuf,
        ledger: ConnectionLedger,
    },
    Redb(RedbLedger),
}

impl LedgerHandle {
    /// Write pending changes. The redb backend commits per request.
    pub fn persist(&self) -> CliResult<()> {
        match self {
            LedgerHandle::File { path, ledger } => save_ledger(ledger, path),
            LedgerHandle::Redb(_) => Ok(()),
        }
    }

    fn store(&mut self) -> &mut dyn LedgerStore {
        match self {
            LedgerHandle::File { ledger, .. } => ledger,
            LedgerHandle::Redb(db) => db,
        }
    }

    /// Requested ids in sorted order.
    pub fn requested(&mut self) -> CliResult<Vec<TargetId>> {
        Ok(self.store().requested()?)
    }
}

/// Open the ledger at `path`. A missing file-backend ledger starts empty.
pub fn open_ledger(path: &Path, backend: &str) -> CliResult<LedgerHandle> {
    match backend.parse::<Backend>()? {
        Backend::File => {
            let ledger = if path.exists() {
                let data = fs::read(path)?;
                import_ledger(&data)?
            } else {
                tracing::debug!(path = %path.display(), "no ledger file yet, starting empty");
                ConnectionLedger::new()
            };
            Ok(LedgerHandle::File {
                path: path.to_path_buf(),
                ledger,
            })
        }
        Backend::Redb => Ok(LedgerHandle::Redb(RedbLedger::open(path)?)),
    }
}

/// Write a file-backend ledger snapshot, replacing any previous one.
///
/// The snapshot is written to a uniquely named temp file next to `path` and
/// renamed over it, so readers never observe a partial file.
pub fn save_ledger(ledger: &ConnectionLedger, path: &Path) -> CliResult<()> {
    let data = export_ledger(ledger)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(&data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), entries = ledger.len(), "ledger saved");
    Ok(())
}

/// Exclusive advisory lock on a ledger, held until dropped.
///
/// The lock lives on a `<ledger>.lock` sidecar so it survives the snapshot
/// being renamed over the ledger file.
#[derive(Debug)]
pub struct LedgerLock {
    file: File,
    path: PathBuf,
}

impl LedgerLock {
    /// Sidecar lock path for `ledger_path`.
    pub fn path_for(ledger_path: &Path) -> PathBuf {
        let mut name = ledger_path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Block until the ledger at `ledger_path` is exclusively ours.
    pub fn acquire(ledger_path: &Path) -> CliResult<Self> {
        let path = Self::path_for(ledger_path);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        FileExt::lock_exclusive(&file)?;
        tracing::trace!(path = %path.display(), "ledger lock acquired");
        Ok(Self { file, path })
    }
}

impl Drop for LedgerLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release ledger lock");
        }
    }
}

// =============================================================================
// INPUTS
// =============================================================================

/// Load listings from `path`, or the bundled sample when `None`.
pub fn load_directory(path: Option<&Path>) -> CliResult<StaticDirectory> {
    let directory = match path {
        Some(path) => StaticDirectory::from_json_str(&fs::read_to_string(path)?)?,
        None => StaticDirectory::from_json_str(SAMPLE_DIRECTORY)?,
    };
    tracing::debug!(listings = directory.len(), "directory loaded");
    Ok(directory)
}

/// Resolve the actor's profile from a JSON file or the individual flags.
pub fn load_profile(args: &ProfileArgs) -> CliResult<AchievementProfile> {
    match &args.profile {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(AchievementProfile::new(
            args.github,
            args.codechef,
            args.projects,
            args.leetcode,
        )),
    }
}

fn find_listing<'a>(
    directory: &'a StaticDirectory,
    target: &str,
) -> CliResult<&'a alumnet_core::AlumniRecord> {
    directory
        .find(&TargetId::new(target))
        .ok_or_else(|| CliError::UnknownTarget(target.to_string()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Create an empty ledger at `path`.
pub fn cmd_init(path: &Path, backend: &str, force: bool) -> CliResult<()> {
    let backend = backend.parse::<Backend>()?;

    if path.exists() {
        if !force {
            return Err(CliError::LedgerExists(path.to_path_buf()));
        }
        fs::remove_file(path)?;
    }

    match backend {
        Backend::File => save_ledger(&ConnectionLedger::new(), path)?,
        Backend::Redb => {
            RedbLedger::open(path)?;
        }
    }

    tracing::info!(path = %path.display(), ?backend, "ledger initialized");
    Ok(())
}

/// One row of search output.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    pub company: String,
    pub position: String,
    pub college: String,
    pub eligible: bool,
}

/// Search the directory and report each hit's lock state for `actor`.
pub fn cmd_search(
    directory: &StaticDirectory,
    actor: &AchievementProfile,
    query: &DirectoryQuery,
    json: bool,
) -> CliResult<Vec<SearchHit>> {
    let hits: Vec<SearchHit> = search(directory, query)
        .into_iter()
        .map(|r| SearchHit {
            id: r.id().to_string(),
            name: r.name().to_string(),
            company: r.company.clone(),
            position: r.position.clone(),
            college: r.college.clone(),
            eligible: CriteriaEvaluator::is_eligible(actor, r.criteria()),
        })
        .collect();

    tracing::debug!(query = %query.text, company = ?query.company, hits = hits.len(), "search");

    if json {
        print_json(&hits)?;
    } else if hits.is_empty() {
        println!("No alumni found matching your criteria. Try adjusting your search.");
    } else {
        for hit in &hits {
            let lock = if hit.eligible { "unlocked" } else { "locked" };
            println!(
                "{:>4}  {:<20} {:<28} {:<12} {:<16} [{}]",
                hit.id, hit.name, hit.position, hit.company, hit.college, lock
            );
        }
    }

    Ok(hits)
}

/// List distinct companies in listing order.
pub fn cmd_companies(directory: &StaticDirectory, json: bool) -> CliResult<Vec<String>> {
    let names: Vec<String> = companies(directory).into_iter().map(str::to_string).collect();

    if json {
        print_json(&names)?;
    } else {
        for name in &names {
            println!("{name}");
        }
    }

    Ok(names)
}

/// Show how `actor` stands against one listing's criteria.
pub fn cmd_progress(
    directory: &StaticDirectory,
    actor: &AchievementProfile,
    target: &str,
    json: bool,
) -> CliResult<CriteriaReport> {
    let listing = find_listing(directory, target)?;
    let report = CriteriaEvaluator::report(actor, listing.criteria());

    if json {
        print_json(&report)?;
    } else {
        let heading = if report.is_eligible() {
            "Requirements Met"
        } else {
            "Requirements to Connect"
        };
        println!("{} ({}): {}", listing.name(), listing.company, heading);
        for d in &report.dimensions {
            let mark = if d.met { "ok" } else { "--" };
            println!(
                "  {:<9} {:>6}/{:<6} {:>6}%  {}",
                d.dimension.label(),
                d.actual,
                d.required,
                d.progress,
                mark
            );
        }
    }

    Ok(report)
}

/// Attempt a connection and persist the ledger.
pub fn cmd_connect(
    directory: &StaticDirectory,
    ledger_path: &Path,
    backend: &str,
    actor: &AchievementProfile,
    target: &str,
    json: bool,
) -> CliResult<Notice> {
    let listing = find_listing(directory, target)?;
    backend.parse::<Backend>()?;

    // Held across read, attempt and write so concurrent connects on the same
    // ledger cannot drop each other's requests.
    let _lock = LedgerLock::acquire(ledger_path)?;
    let mut handle = open_ledger(ledger_path, backend)?;

    let outcome = attempt_connect(handle.store(), listing.id(), actor, listing.criteria())?;
    handle.persist()?;

    tracing::info!(listing = %listing.id(), ?outcome, "connection attempt");

    let notice = Notice::for_outcome(outcome, listing.name());
    if json {
        print_json(&notice)?;
    } else {
        println!("{notice}");
    }

    Ok(notice)
}

/// List requested connections.
///
/// A ledger that does not exist yet is reported as empty and is not created.
pub fn cmd_status(ledger_path: &Path, backend: &str, json: bool) -> CliResult<Vec<TargetId>> {
    backend.parse::<Backend>()?;
    let requested = if ledger_path.exists() {
        open_ledger(ledger_path, backend)?.requested()?
    } else {
        tracing::debug!(path = %ledger_path.display(), "no ledger yet, nothing requested");
        Vec::new()
    };

    if json {
        print_json(&requested)?;
    } else {
        println!("Requested connections: {}", requested.len());
        for id in &requested {
            println!("  {id}");
        }
    }

    Ok(requested)
}

/// Suggest colleges from a catalog dump.
///
/// An unreadable or malformed catalog yields no suggestions rather than an
/// error, matching the autocomplete's behaviour when the list fails to load.
pub fn cmd_colleges(
    catalog_path: &Path,
    query: &str,
    limit: usize,
    json: bool,
) -> CliResult<Vec<College>> {
    let catalog = match fs::read_to_string(catalog_path)
        .map_err(CliError::from)
        .and_then(|raw| CollegeCatalog::parse(&raw).map_err(CliError::from))
    {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::warn!(path = %catalog_path.display(), error = %err, "college catalog unavailable");
            CollegeCatalog::default()
        }
    };

    let suggestions: Vec<College> = catalog.suggest(query, limit).into_iter().cloned().collect();

    if json {
        print_json(&suggestions)?;
    } else {
        for c in &suggestions {
            println!("{}  ({}, {})", c.name, c.district, c.state);
        }
    }

    Ok(suggestions)
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> CliResult<()> {
    let Cli {
        directory,
        ledger,
        backend,
        json,
        actor,
        command,
    } = cli;

    match command {
        Command::Init { force } => cmd_init(&ledger, &backend, force),
        Command::Search { query, company } => {
            let dir = load_directory(directory.as_deref())?;
            let actor = load_profile(&actor)?;
            let query = DirectoryQuery {
                text: query.unwrap_or_default(),
                company,
            };
            cmd_search(&dir, &actor, &query, json).map(|_| ())
        }
        Command::Companies => {
            let dir = load_directory(directory.as_deref())?;
            cmd_companies(&dir, json).map(|_| ())
        }
        Command::Progress { target } => {
            let dir = load_directory(directory.as_deref())?;
            let actor = load_profile(&actor)?;
            cmd_progress(&dir, &actor, &target, json).map(|_| ())
        }
        Command::Connect { target } => {
            let dir = load_directory(directory.as_deref())?;
            let actor = load_profile(&actor)?;
            cmd_connect(&dir, &ledger, &backend, &actor, &target, json).map(|_| ())
        }
        Command::Status => cmd_status(&ledger, &backend, json).map(|_| ()),
        Command::Colleges {
            catalog,
            query,
            limit,
        } => cmd_colleges(&catalog, &query, limit, json).map(|_| ()),
    }
}

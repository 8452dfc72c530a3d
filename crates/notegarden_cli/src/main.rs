//! Command-line driver for the notes garden core.
//!
//! # Responsibility
//! - Seed and inspect a local notes database.
//! - Drive the catalog page headlessly for deep-link and share checks.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use notegarden_core::db::open_db;
use notegarden_core::{
    cards_for, core_version, default_log_level, init_logging, GardenConfig, Key,
    LocationProvider, MemoryClipboard, MemoryLocation, NoteRecord, NoteStore,
    NotesPage, OverlayState, PageEvent, ShareOutcome, SqliteNoteStore, SystemClock, Topic,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "notegarden", version, about = "Notes catalog and deep-link tools")]
struct Cli {
    /// JSON page config; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert a JSON array of note records into the database.
    Import {
        #[arg(long)]
        db: PathBuf,
        json: PathBuf,
    },
    /// Print the catalog cards for a topic and search text.
    List {
        #[arg(long)]
        db: PathBuf,
        #[arg(long, default_value = "All")]
        topic: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Print the featured notes shown on the homepage.
    Featured {
        #[arg(long)]
        db: PathBuf,
        #[arg(long, default_value_t = notegarden_core::FEATURED_PREVIEW_LIMIT)]
        limit: u32,
    },
    /// Load the page at a path and report the overlay and final location.
    Open {
        #[arg(long)]
        db: PathBuf,
        path: String,
        /// Press Escape after loading.
        #[arg(long)]
        escape: bool,
    },
    /// Copy the deep link for a slug and report the notification.
    Share {
        #[arg(long)]
        db: PathBuf,
        slug: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GardenConfig::load(path)?,
        None => GardenConfig::default(),
    };
    start_logging(&cli, &config)?;

    match cli.command {
        Command::Import { db, json } => import(&db, &json),
        Command::List { db, topic, search } => list(&config, &db, &topic, &search),
        Command::Featured { db, limit } => featured(&db, limit),
        Command::Open { db, path, escape } => open(&config, &db, &path, escape),
        Command::Share { db, slug } => share(&config, &db, &slug),
    }
}

fn start_logging(cli: &Cli, config: &GardenConfig) -> Result<()> {
    let Some(log_dir) = &cli.log_dir else {
        return Ok(());
    };
    let level = cli
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or(default_log_level());
    let log_dir = log_dir
        .to_str()
        .context("log directory must be valid UTF-8")?;
    init_logging(level, log_dir)?;
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );
    Ok(())
}

fn import(db: &Path, json: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(json)
        .with_context(|| format!("failed to read {}", json.display()))?;
    let records: Vec<NoteRecord> =
        serde_json::from_str(&raw).context("expected a JSON array of note records")?;

    let conn = open_db(db)?;
    let imported = SqliteNoteStore::new(&conn)
        .insert_notes(&records)
        .with_context(|| format!("failed to import {}; nothing was written", json.display()))?;
    println!("imported {imported} note(s)");
    Ok(())
}

fn list(config: &GardenConfig, db: &Path, topic: &str, search: &str) -> Result<()> {
    let conn = open_db(db)?;
    let mut page = headless_page(config, &config.base_path);
    page.load_from(&SqliteNoteStore::new(&conn));
    page.dispatch(PageEvent::TopicSelected(Topic::parse_or_all(topic)));
    page.dispatch(PageEvent::SearchChanged(search.to_string()));

    let view = page.view();
    println!("{} notes so far.", view.total);
    let counts = view
        .counts
        .iter()
        .map(|(topic, count)| format!("{topic}={count}"))
        .collect::<Vec<_>>();
    println!("topics: {}", counts.join(" "));

    let cards = cards_for(&view);
    if cards.is_empty() {
        println!("No notes found matching this filter.");
    }
    for card in cards {
        let mut badges = Vec::new();
        if card.is_pinned {
            badges.push("pinned");
        }
        if card.is_latest {
            badges.push("latest");
        }
        println!(
            "- {} [{}] {} · {} min read{}",
            card.title,
            card.slug,
            card.date_label,
            card.reading_minutes,
            if badges.is_empty() {
                String::new()
            } else {
                format!(" ({})", badges.join(", "))
            }
        );
    }
    Ok(())
}

fn featured(db: &Path, limit: u32) -> Result<()> {
    let conn = open_db(db)?;
    for record in SqliteNoteStore::new(&conn).fetch_featured_notes(limit)? {
        println!("- {} [{}]", record.title, record.slug);
    }
    Ok(())
}

fn open(config: &GardenConfig, db: &Path, path: &str, escape: bool) -> Result<()> {
    let conn = open_db(db)?;
    let mut page = headless_page(config, path);
    page.load_from(&SqliteNoteStore::new(&conn));
    if escape {
        page.dispatch(PageEvent::KeyPressed(Key::Escape));
    }

    match page.overlay() {
        OverlayState::Open(record) => println!("overlay: open {} ({})", record.slug, record.title),
        OverlayState::Closed => println!("overlay: closed"),
    }
    println!("location: {}", page.location().path());
    Ok(())
}

fn share(config: &GardenConfig, db: &Path, slug: &str) -> Result<()> {
    let conn = open_db(db)?;
    let mut page = headless_page(config, &config.base_path);
    page.load_from(&SqliteNoteStore::new(&conn));

    let Some(outcome) = page.share(slug) else {
        bail!("no note with slug `{slug}`");
    };
    let message = page
        .active_toast()
        .map(|toast| toast.message.clone())
        .unwrap_or_default();
    match outcome {
        ShareOutcome::Copied { url } => println!("{message}: {url}"),
        ShareOutcome::Failed { url, error } => println!("{message}: {url} ({error})"),
    }
    Ok(())
}

fn headless_page(
    config: &GardenConfig,
    path: &str,
) -> NotesPage<MemoryLocation, MemoryClipboard, SystemClock> {
    NotesPage::new(
        config,
        MemoryLocation::new(config.origin.clone(), path),
        MemoryClipboard::new(),
        SystemClock,
    )
}

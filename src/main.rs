use anyhow::{bail, Context, Result};
use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;

use woodshed::filter::DateFilter;
use woodshed::list::SessionList;
use woodshed::selection::SelectionEngine;
use woodshed::session::SessionId;
use woodshed::store::SessionDb;
use woodshed::timeunit::{Day, Minutes};
use woodshed::{logging, render, summary};

#[derive(Parser)]
#[command(name = "woodshed")]
#[command(about = "Practice session log book", long_about = None)]
struct Cli {
    /// Data directory (default: $WOODSHED_DATA_DIR, else ./.woodshed)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a practice session
    Add {
        /// What was practised (piece, etude, exercise)
        #[arg(long)]
        piece: String,
        /// Duration in minutes
        #[arg(long)]
        minutes: i64,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Start time (RFC3339 or 'YYYY-MM-DD HH:MM' local). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
    /// List sessions, newest first
    List {
        /// Inclusive lower bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Exclusive upper bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Page offset (clamped to the current result set)
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long, default_value_t = 20)]
        page_size: usize,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove sessions by id or in bulk
    Remove {
        /// Session ids to remove (comma-separated)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
        /// Remove every session in range
        #[arg(long)]
        all: bool,
        /// Ids to keep when using --all (comma-separated)
        #[arg(long, value_delimiter = ',')]
        keep: Vec<i64>,
        /// Inclusive lower bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Exclusive upper bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Aggregate totals for a date range
    Summary {
        /// Inclusive lower bound (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Exclusive upper bound (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);
    logging::init_logging(&data_dir)?;

    let db = SessionDb::init(&data_dir)?;

    match cli.command {
        Commands::Add {
            piece,
            minutes,
            notes,
            at,
        } => run_add(&db, &piece, minutes, notes.as_deref(), at.as_deref()),
        Commands::List {
            from,
            to,
            offset,
            page_size,
            json,
        } => run_list(&db, from.as_deref(), to.as_deref(), offset, page_size, json),
        Commands::Remove {
            ids,
            all,
            keep,
            from,
            to,
            yes,
        } => run_remove(&db, &ids, all, &keep, from.as_deref(), to.as_deref(), yes),
        Commands::Summary { from, to, json } => {
            run_summary(&db, from.as_deref(), to.as_deref(), json)
        }
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("WOODSHED_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".woodshed"))
}

fn run_add(
    db: &SessionDb,
    piece: &str,
    minutes: i64,
    notes: Option<&str>,
    at: Option<&str>,
) -> Result<()> {
    if piece.trim().is_empty() {
        bail!("--piece must not be empty");
    }
    if minutes <= 0 {
        bail!("--minutes must be positive");
    }

    let started_ms = match at {
        Some(s) => parse_started_at(s)?,
        None => Local::now().timestamp_millis(),
    };
    let started_at = Minutes::from_millis(started_ms);
    let day = Day::from_millis_in(started_ms, &Local);

    let id = db.insert(piece.trim(), minutes, notes, started_at, day)?;
    tracing::info!(%id, piece, minutes, "session added");
    println!("Added session {} ({} min of {}, {})", id, minutes, piece.trim(), day);
    Ok(())
}

fn run_list(
    db: &SessionDb,
    from: Option<&str>,
    to: Option<&str>,
    offset: usize,
    page_size: usize,
    json: bool,
) -> Result<()> {
    let mut list = SessionList::new(page_size.max(1));
    list.set_filter(parse_filter(from, to)?);
    list.set_offset(offset);
    let page = list.refresh(db)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!(
            "{}",
            render::session_table(&page, std::io::stdout().is_terminal())
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_remove(
    db: &SessionDb,
    ids: &[i64],
    all: bool,
    keep: &[i64],
    from: Option<&str>,
    to: Option<&str>,
    yes: bool,
) -> Result<()> {
    if ids.is_empty() && !all {
        bail!("Nothing to remove: pass --ids or --all");
    }
    if !ids.is_empty() && all {
        bail!("--ids and --all are mutually exclusive");
    }
    if !keep.is_empty() && !all {
        bail!("--keep only makes sense with --all");
    }

    let mut list = SessionList::new(1);
    list.set_filter(parse_filter(from, to)?);
    let today = Day::today_in(&Local);
    let range = list.resolved_range(db, today)?;
    let count = db.count_in(&range)?;

    // Drive the selection engine the way a list view would: long-press the
    // explicit ids, or select-all and tap the ids to keep.
    let mut engine = SelectionEngine::new(count);
    if all {
        engine.select_all();
        for id in keep {
            engine.click(SessionId(*id), |_| {}, || {});
        }
    } else {
        for id in ids {
            engine.long_click(SessionId(*id), |_| {});
        }
    }

    let selected = engine.selected_from(db.ids_in(&range)?);
    if selected.is_empty() {
        println!("No matching sessions in range; nothing removed.");
        return Ok(());
    }

    if !yes {
        let confirmed = inquire::Confirm::new(&format!(
            "Remove {} session(s) between {} and {}?",
            selected.len(),
            range.start,
            range.end
        ))
        .with_default(false)
        .prompt()
        .context("Confirmation prompt failed")?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let deleted = db.delete(&selected)?;
    tracing::info!(deleted, "sessions removed");
    println!("Removed {} session(s).", deleted);
    Ok(())
}

fn run_summary(db: &SessionDb, from: Option<&str>, to: Option<&str>, json: bool) -> Result<()> {
    let mut list = SessionList::new(1);
    list.set_filter(parse_filter(from, to)?);
    let range = list.resolved_range(db, Day::today_in(&Local))?;
    let sessions = db.all_in(&range)?;
    let summary = summary::build(range, &sessions);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render::summary_text(&summary));
    }
    Ok(())
}

fn parse_filter(from: Option<&str>, to: Option<&str>) -> Result<DateFilter> {
    Ok(DateFilter {
        from: from.map(parse_day).transpose()?,
        to_exclusive: to.map(parse_day).transpose()?,
    })
}

fn parse_day(s: &str) -> Result<Day> {
    Day::parse(s).with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD.", s))
}

fn parse_started_at(s: &str) -> Result<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        if let Some(dt) = Local.from_local_datetime(&naive).earliest() {
            return Ok(dt.timestamp_millis());
        }
    }
    bail!("Invalid time '{}'. Use RFC3339 or 'YYYY-MM-DD HH:MM'.", s)
}

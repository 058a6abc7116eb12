// Clinic Agenda
// Prints the day report (conflicts, occupancy, free windows per lane) for a
// JSON snapshot of events and resources.
//
// Usage: clinic-agenda <snapshot.json> [YYYY-MM-DD] [--config <agenda.toml>]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use clinic_agenda::models::event::Event;
use clinic_agenda::models::resource::Resource;
use clinic_agenda::services::agenda::Agenda;
use clinic_agenda::services::grouping::GroupingOptions;
use clinic_agenda::services::settings::SettingsService;

#[derive(Debug, Deserialize)]
struct Snapshot {
    events: Vec<Event>,
    #[serde(default)]
    resources: Vec<Resource>,
}

struct Args {
    snapshot: PathBuf,
    day: Option<NaiveDate>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut snapshot = None;
    let mut day = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            _ if snapshot.is_none() => snapshot = Some(PathBuf::from(arg)),
            _ if day.is_none() => {
                let parsed = NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
                    .with_context(|| format!("Invalid day '{}', expected YYYY-MM-DD", arg))?;
                day = Some(parsed);
            }
            _ => bail!("Unexpected argument '{}'", arg),
        }
    }

    let snapshot = snapshot
        .context("Usage: clinic-agenda <snapshot.json> [YYYY-MM-DD] [--config <agenda.toml>]")?;
    Ok(Args {
        snapshot,
        day,
        config,
    })
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&data)
        .with_context(|| format!("Failed to deserialize snapshot from {}", path.display()))?;

    for event in &snapshot.events {
        if let Err(e) = event.validate() {
            bail!("Invalid event '{}' in {}: {}", event.id, path.display(), e);
        }
    }
    Ok(snapshot)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let settings_service = match args.config {
        Some(path) => SettingsService::new(path),
        None => SettingsService::with_default_path()?,
    };
    let settings = settings_service.load()?;
    let snapshot = load_snapshot(&args.snapshot)?;

    let day = match args.day {
        Some(day) => day,
        None => match snapshot.events.iter().map(Event::day).min() {
            Some(day) => day,
            None => {
                println!("Snapshot has no events");
                return Ok(());
            }
        },
    };

    log::info!(
        "Loaded {} events and {} resources",
        snapshot.events.len(),
        snapshot.resources.len()
    );
    let agenda = Agenda::new(settings)?.with_snapshot(snapshot.events, snapshot.resources);
    print_report(&agenda, day);
    Ok(())
}

fn print_report(agenda: &Agenda, day: NaiveDate) {
    let summary = agenda.day_summary(day, None);
    println!("Agenda for {}", day.format("%A %Y-%m-%d"));
    println!(
        "  {} appointments, {} booked minutes, occupancy {}%",
        summary.total_events, summary.booked_minutes, summary.occupancy_rate
    );

    let conflicts = agenda.conflicts_for(day);
    if conflicts.is_empty() {
        println!("  No conflicts");
    } else {
        println!("  Conflicts:");
        for conflict in &conflicts {
            println!(
                "    [{:?}] {:?} {} <-> {} ({} min)",
                conflict.severity,
                conflict.kind,
                conflict.first,
                conflict.second,
                conflict.overlap_minutes
            );
        }
    }

    println!("  Free windows:");
    for window in agenda.free_windows(day, None) {
        println!("    {} ({} min)", window, window.duration_minutes());
    }

    let grid = agenda.grid();
    let policy = &agenda.settings().policy;
    let lanes = agenda.lanes(
        day,
        GroupingOptions {
            unassigned_lane: true,
        },
    );
    if agenda.resources().is_empty() {
        return;
    }
    println!("  Lanes:");
    for lane in &lanes {
        println!(
            "    {:<20} {:>3} appointments, occupancy {}%",
            lane.label(),
            lane.events.len(),
            lane.occupancy(day, grid, policy)
        );
    }
}

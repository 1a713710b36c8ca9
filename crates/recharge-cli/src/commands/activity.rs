//! Activity logging commands.

use chrono::Utc;
use clap::Subcommand;

use recharge_core::notify::LogSink;
use recharge_core::{ActivityRecord, ActivityType};

use super::common::{self, Error};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Log an activity for today
    Add {
        /// Activity type (see `activity types`)
        activity_type: String,
        /// Duration in minutes
        minutes: u32,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },
    /// List today's activities
    List,
    /// List available activity types and their fatigue weights
    Types,
}

pub fn run(action: ActivityAction) -> Result<(), Error> {
    match action {
        ActivityAction::Add {
            activity_type,
            minutes,
            note,
        } => add(&activity_type, minutes, note),
        ActivityAction::List => list(),
        ActivityAction::Types => types(),
    }
}

fn add(type_name: &str, minutes: u32, note: Option<String>) -> Result<(), Error> {
    let activity_type: ActivityType = type_name.parse()?;
    let config = common::load_config()?;
    let state = common::open_state()?;
    let mut session = common::roll_to_today(&state, &config);

    let now = Utc::now();
    let mut record = ActivityRecord::new(activity_type, minutes, now)?;
    if let Some(note) = note {
        record = record.with_note(note);
    }
    session.log_record(record);
    state.save_daily(session.data());

    let report = session.report();
    println!(
        "Logged {} {} for {minutes} min.",
        activity_type.emoji(),
        activity_type.label()
    );
    println!("Fatigue: {}", common::gauge(report.score));
    println!("{}", report.message);

    // High-fatigue alert, rate-limited by the persisted cooldown map.
    if config.notifications.enabled {
        let mut scheduler = state.load_scheduler();
        if let Some(request) = scheduler.decide_fatigue_alert(report.score, now) {
            println!("\n⚠ {} -- {}", request.title, request.body);
            scheduler.send(&LogSink, request, now);
            state.save_scheduler(&scheduler);
        }
    }
    Ok(())
}

fn list() -> Result<(), Error> {
    let config = common::load_config()?;
    let state = common::open_state()?;
    let session = common::roll_to_today(&state, &config);

    let data = session.data();
    println!("Activities for {}:", data.date);
    if data.activities.is_empty() {
        println!("  (none logged yet)");
        return Ok(());
    }
    for activity in &data.activities {
        let note = activity
            .note
            .as_deref()
            .map(|n| format!("  # {n}"))
            .unwrap_or_default();
        println!(
            "  {} {:<12} {:>4} min{note}",
            activity.activity_type.emoji(),
            activity.activity_type.label(),
            activity.duration_minutes,
        );
    }
    println!("\nFatigue: {}", common::gauge(session.score()));
    Ok(())
}

fn types() -> Result<(), Error> {
    println!("{:<14} {:>10}  {}", "type", "weight/h", "effect");
    for ty in ActivityType::all() {
        let effect = if ty.is_recovery() { "recovery" } else { "fatigue" };
        println!(
            "{:<14} {:>+10.2}  {} {}",
            ty.label().to_lowercase().replace(' ', "-"),
            ty.fatigue_weight() * 100.0,
            ty.emoji(),
            effect
        );
    }
    Ok(())
}

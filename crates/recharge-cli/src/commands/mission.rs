//! Daily mission commands.

use clap::Subcommand;
use rand::thread_rng;

use recharge_core::{apply_streak_bonus, DailyMissionSet, MissionEngine};

use super::common::{self, Error};

#[derive(Subcommand)]
pub enum MissionAction {
    /// Show today's missions, assigning them on first call
    Today,
    /// Complete a mission by template id
    Complete {
        /// Template id (shown by `mission today`)
        id: String,
    },
    /// Show the mission ledger
    History,
}

pub fn run(action: MissionAction) -> Result<(), Error> {
    match action {
        MissionAction::Today => today(),
        MissionAction::Complete { id } => complete(&id),
        MissionAction::History => history(),
    }
}

/// Load today's mission set, drawing a fresh one after rollover.
fn today_set(
    state: &recharge_core::StateStore<recharge_core::SqliteStore>,
    session: &recharge_core::FatigueSession,
) -> DailyMissionSet {
    if let Some(set) = state.load_missions() {
        if set.date == session.date() {
            return set;
        }
    }
    let engine = MissionEngine::new();
    let missions = engine.assign(
        session.score(),
        &state.load_mission_history(),
        &mut thread_rng(),
    );
    let set = DailyMissionSet::new(session.date(), missions);
    state.save_missions(&set);
    set
}

fn today() -> Result<(), Error> {
    let config = common::load_config()?;
    let state = common::open_state()?;
    let session = common::roll_to_today(&state, &config);
    let set = today_set(&state, &session);

    println!("Missions for {} (fatigue {}):", set.date, session.score());
    for mission in &set.missions {
        let mark = if mission.completed { "✔" } else { " " };
        println!(
            "  [{mark}] {} {} ({}, {}, +{} exp)",
            mission.emoji, mission.title, mission.category, mission.difficulty, mission.exp_reward
        );
        println!("       {}  --  id: {}", mission.description, mission.template_id);
    }
    if set.all_completed() {
        println!("\nAll missions done today. 🎉");
    }
    Ok(())
}

fn complete(id: &str) -> Result<(), Error> {
    let config = common::load_config()?;
    let state = common::open_state()?;
    let session = common::roll_to_today(&state, &config);
    let mut set = today_set(&state, &session);

    let Some(base_exp) = set.complete(id) else {
        return Err(format!("no open mission with id '{id}' today").into());
    };
    state.save_missions(&set);

    // The streak counts the day once; the exp bonus uses the updated value.
    let streak = state.load_streak().complete_on(session.date());
    state.save_streak(&streak);

    let reward = apply_streak_bonus(base_exp, streak.current_streak);
    let result = state.load_character().add_exp(reward);
    state.save_character(&result.character);

    println!("Mission complete! +{reward} exp");
    if streak.bonus_percent() > 0 {
        println!(
            "  ({base_exp} base, +{}% streak bonus at {} days)",
            streak.bonus_percent(),
            streak.current_streak
        );
    }
    if result.leveled_up {
        println!("🎉 Ppoom reached level {}!", result.new_level);
        for costume in &result.unlocked_costumes {
            println!("   New costume unlocked: {costume}");
        }
    }
    if set.all_completed() {
        println!("All missions done today. 🎉");
    }
    Ok(())
}

fn history() -> Result<(), Error> {
    let state = common::open_state()?;
    let history = state.load_mission_history();
    if history.is_empty() {
        println!("No closed mission days yet.");
        return Ok(());
    }
    for record in &history {
        let done = record.missions.iter().filter(|m| m.completed).count();
        let status = if record.all_completed { "✔ all" } else { "" };
        println!(
            "{}  fatigue {:>3}  {}/{} missions {status}",
            record.date,
            record.fatigue_percentage,
            done,
            record.missions.len()
        );
    }
    Ok(())
}
